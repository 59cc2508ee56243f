use crate::Environment;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in main(), before any fallible operations. Safe to call
/// multiple times; later installs are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing with environment-aware configuration.
///
/// - **Production** (`APP_ENV=production`): JSON output for log aggregation,
///   module targets hidden.
/// - **Development** (default): pretty-printed output with targets.
///
/// Both include [`ErrorLayer`] so span traces are captured when errors
/// surface through eyre. `RUST_LOG` overrides the default filter.
///
/// Safe to call multiple times (common in tests); later calls are ignored.
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("info,sea_orm=warn,sqlx=warn")
        } else {
            EnvFilter::new("debug,tower_http=debug,sea_orm=info")
        }
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .with(ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .with(ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already initialized, skipping");
    }
}
