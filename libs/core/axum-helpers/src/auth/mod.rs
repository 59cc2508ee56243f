//! Stateless JWT authentication.
//!
//! [`JwtAuth`] signs and verifies HS256 bearer tokens against a shared
//! secret; [`AuthUser`] is the extractor handlers take as a typed
//! precondition. Verification has no side effects.

mod extractor;
mod jwt;

pub use extractor::AuthUser;
pub use jwt::{AuthError, JwtAuth, JwtClaims, JwtConfig};
