//! Logging setup for applications embedding the crate

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Install a global fmt subscriber
///
/// `RUST_LOG` wins over `config.log_level`; an unparsable level falls back to
/// "info". Returns `false` if a subscriber was already installed.
pub fn init(config: &AppConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = %config.log_level, "Logging initialized");
    }
    installed
}
