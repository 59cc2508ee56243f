pub mod server;
pub mod tracing;

use std::env;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment (dev = local, prod = deployed)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load an environment variable or return an error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Helper to parse an environment variable into a target type, with a default
pub fn env_parse_or_default<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("could not parse '{}'", raw),
        }),
        Err(_) => Ok(default),
    }
}

/// Static application metadata, captured from the calling crate
#[derive(Clone, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Capture the calling crate's name and version as [`AppInfo`]
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production() {
        temp_env::with_var("APP_ENV", Some("production"), || {
            assert!(Environment::from_env().is_production());
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("VOLTCART_TEST_MISSING", || {
            let err = env_required("VOLTCART_TEST_MISSING").unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(_)));
        });
    }

    #[test]
    fn test_env_parse_or_default() {
        temp_env::with_var("VOLTCART_TEST_PORT", Some("9000"), || {
            let port: u16 = env_parse_or_default("VOLTCART_TEST_PORT", 8080).unwrap();
            assert_eq!(port, 9000);
        });
        temp_env::with_var("VOLTCART_TEST_PORT", Some("not-a-port"), || {
            let result: Result<u16, _> = env_parse_or_default("VOLTCART_TEST_PORT", 8080);
            assert!(result.is_err());
        });
    }
}
