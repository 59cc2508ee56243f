use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application configuration, composed from shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - fails if DATABASE_URL is unset
        let server = ServerConfig::from_env()?; // Defaults: HOST=0.0.0.0, PORT=8080
        let jwt = JwtConfig::from_env()?; // Required - fails if JWT_SECRET is unset

        Ok(Self {
            app: app_info!(),
            database,
            server,
            jwt,
            environment,
        })
    }
}
