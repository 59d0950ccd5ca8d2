//! Tracing subscriber setup for hosts that do not install their own.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use chronicle_core::config::GeneralConfig;
use chronicle_core::{ChronicleError, Result};

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` wins over `general.log_level` when set. `general.log_format`
/// picks human-readable (`pretty`) or JSON lines (`json`).
///
/// # Errors
/// `Config` if the level is not a valid filter or a global subscriber is
/// already installed.
pub fn init_tracing(general: &GeneralConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&general.log_level)
            .map_err(|e| ChronicleError::Config(format!("general.log_level: {e}")))?,
    };

    let installed = if general.log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
    };
    installed.map_err(|e| ChronicleError::Config(format!("tracing already initialised: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_an_error_not_a_panic() {
        let general = GeneralConfig {
            log_format: "json".to_string(),
            ..GeneralConfig::default()
        };
        let _ = init_tracing(&general);
        assert!(matches!(init_tracing(&general), Err(ChronicleError::Config(_))));
    }
}
