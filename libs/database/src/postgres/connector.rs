use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseResult, RetryConfig, retry_with_backoff};

/// Connect using a [`PostgresConfig`].
pub async fn connect_from_config(config: PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    connect_with_options(config.into_connect_options()).await
}

/// Connect with custom connection options.
pub async fn connect_with_options(options: ConnectOptions) -> DatabaseResult<DatabaseConnection> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Connect using a [`PostgresConfig`], retrying with exponential backoff.
///
/// Intended for service startup, where the database container may still be
/// coming up. Pass `None` to use the default [`RetryConfig`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    let retry = retry.unwrap_or_default();

    retry_with_backoff(&retry, "postgres connect", || {
        connect_from_config(config.clone())
    })
    .await
}
