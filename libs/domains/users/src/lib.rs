//! Users Domain
//!
//! Account registration and login for the storefront chat API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /auth/register, /auth/login (JWT issuance)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Argon2 hashing, credential verification
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory + Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```

pub mod auth_handlers;
pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use auth_handlers::{AuthApiDoc, AuthState};
pub use error::{UserError, UserResult};
pub use models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
