//! Application state management.
//!
//! Shared state handed to the route constructors. Cloning is cheap: the
//! database handle is a pool and [`axum_helpers::JwtAuth`] is a small
//! shared struct.

use axum_helpers::JwtAuth;
use database::DatabaseConnection;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    /// Stateless JWT signer/verifier (the Auth Gate)
    pub jwt_auth: JwtAuth,
}
