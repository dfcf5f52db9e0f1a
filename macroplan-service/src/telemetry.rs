//! Logging setup.

use std::env;
use std::io;

use macroplan_core::config::{GeneralConfig, LogFormat};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` when set, otherwise the configured level,
/// with HTTP client noise held at `warn`.
fn env_filter(config: &GeneralConfig) -> EnvFilter {
    let base = env::var("RUST_LOG").map_or_else(
        |_| EnvFilter::new(&config.log_level),
        |directive| EnvFilter::new(&directive),
    );
    ["hyper=warn", "reqwest=warn"]
        .into_iter()
        .filter_map(|d| d.parse::<Directive>().ok())
        .fold(base, EnvFilter::add_directive)
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed; the existing one
/// is kept, so calling this more than once is harmless.
pub fn init(config: &GeneralConfig) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let installed = match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().with_target(true).with_writer(io::stdout).json())
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_writer(io::stdout))
            .try_init(),
    };

    match installed {
        Ok(()) => {
            tracing::debug!(level = %config.log_level, format = ?config.log_format, "logging initialised");
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        let config = GeneralConfig::default();
        let _ = init(&config);
        assert!(!init(&config));
    }
}
