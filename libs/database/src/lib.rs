//! Database connectivity for Voltcart services.
//!
//! PostgreSQL (SeaORM) connection configuration, pooling and
//! connect-with-retry helpers. Domain crates own their entities and
//! repositories; this crate only hands out connections.

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
pub use postgres::{PostgresConfig, connect_from_config, connect_from_config_with_retry};

// Re-export so callers don't need a direct sea-orm dependency for the handle type
pub use sea_orm::DatabaseConnection;
