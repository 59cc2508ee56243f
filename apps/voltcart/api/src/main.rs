use axum_helpers::JwtAuth;
use axum_helpers::server::{create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::{Migrator, MigratorTrait};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        name = config.app.name,
        version = config.app.version,
        "Starting Voltcart API"
    );

    let db = database::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    // Idempotent startup migration; request handling never touches the schema
    Migrator::up(&db, None)
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;
    info!("Database migrations applied");

    let jwt_auth = JwtAuth::new(&config.jwt);

    let state = AppState {
        config: config.clone(),
        db,
        jwt_auth,
    };

    let routes = api::routes(&state)?;
    let router = create_router(routes, openapi::openapi())?;

    create_app(router, &config.server).await?;

    Ok(())
}
