//! Process-wide tracing setup for the assessment service and CLI.

use crate::config::{LogFormat, TelemetryConfig};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Dependencies that log at info on every request; capped unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: [&str; 2] = ["hyper=warn", "axum_prometheus=warn"];

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { directive: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directive, .. } => {
                write!(f, "APP_LOG_LEVEL '{directive}' is not a valid tracing filter")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "tracing subscriber already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Resolve the event filter. A parseable `RUST_LOG` wins outright; otherwise the configured
/// level applies with noisy dependencies capped at warn.
pub fn filter_for(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directive = std::iter::once(config.log_level.trim())
        .chain(QUIET_TARGETS)
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::try_new(&directive).map_err(|source| TelemetryError::InvalidFilter {
        directive: config.log_level.clone(),
        source,
    })
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_for(config)?)
        .with_target(false);

    let installed = match config.log_format {
        LogFormat::Compact => builder.compact().with_ansi(false).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: level.to_string(),
            log_format: LogFormat::Compact,
        }
    }

    #[test]
    fn configured_level_caps_noisy_targets() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = filter_for(&config("debug")).expect("filter builds");
        let rendered = filter.to_string();
        assert!(rendered.contains("debug"));
        assert!(rendered.contains("hyper=warn"));
    }

    #[test]
    fn invalid_level_names_the_setting() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        match filter_for(&config("loud=banana")) {
            Err(err @ TelemetryError::InvalidFilter { .. }) => {
                assert!(err.to_string().contains("loud=banana"));
            }
            other => panic!("expected invalid filter error, got {other:?}"),
        }
    }
}
