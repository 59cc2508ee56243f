//! # Axum Helpers
//!
//! Utilities, extractors and middleware shared by the Voltcart HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT verification and the [`AuthUser`] extractor
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown
//! - **[`errors`]**: structured error response payloads
//! - **[`extractors`]**: validated JSON extraction
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router(api_routes, ApiDoc::openapi())?;
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod health;
pub mod server;

// Re-export auth types
pub use auth::{AuthError, AuthUser, JwtAuth, JwtClaims, JwtConfig};

// Re-export server types
pub use server::{create_app, create_router, shutdown_signal};

// Re-export error types
pub use errors::ErrorResponse;

// Re-export extractors
pub use extractors::ValidatedJson;

// Re-export health types
pub use health::HealthResponse;
