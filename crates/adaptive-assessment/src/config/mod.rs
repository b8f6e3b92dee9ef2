use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("APP_LOG_FORMAT")
            .map(|raw| LogFormat::parse(&raw))
            .unwrap_or_default();

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            engine: EngineConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Line layout for the fmt subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    /// Multi-line events with span context, for local runs.
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Scoring and adaptation dials shared by every engine component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Category pass mark as a percentage.
    pub category_threshold: f64,
    /// Fraction of max points a free-text answer must exceed to count as correct.
    pub correctness_ratio: f64,
    /// Fraction of max points awarded to coding answers with no evaluator result.
    pub coding_placeholder_ratio: f64,
    pub theme_limit: usize,
    pub promote_threshold: f64,
    pub demote_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            category_threshold: 60.0,
            correctness_ratio: 0.6,
            coding_placeholder_ratio: 0.8,
            theme_limit: 10,
            promote_threshold: 0.8,
            demote_threshold: 0.4,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            category_threshold: env_or("ENGINE_CATEGORY_THRESHOLD", defaults.category_threshold)?,
            correctness_ratio: env_or("ENGINE_CORRECTNESS_RATIO", defaults.correctness_ratio)?,
            coding_placeholder_ratio: env_or(
                "ENGINE_CODING_PLACEHOLDER_RATIO",
                defaults.coding_placeholder_ratio,
            )?,
            theme_limit: env_or("ENGINE_THEME_LIMIT", defaults.theme_limit)?,
            promote_threshold: env_or("ENGINE_PROMOTE_THRESHOLD", defaults.promote_threshold)?,
            demote_threshold: env_or("ENGINE_DEMOTE_THRESHOLD", defaults.demote_threshold)?,
        })
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidEngineSetting { key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidEngineSetting { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidEngineSetting { key, value } => {
                write!(f, "{key} has an unparseable value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidEngineSetting { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "ENGINE_CATEGORY_THRESHOLD",
            "ENGINE_CORRECTNESS_RATIO",
            "ENGINE_CODING_PLACEHOLDER_RATIO",
            "ENGINE_THEME_LIMIT",
            "ENGINE_PROMOTE_THRESHOLD",
            "ENGINE_DEMOTE_THRESHOLD",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_format, LogFormat::Compact);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn pretty_log_format_is_opt_in() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOG_FORMAT", " Pretty ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
        env::set_var("APP_LOG_FORMAT", "json");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.telemetry.log_format, LogFormat::Compact);
        reset_env();
    }

    #[test]
    fn engine_overrides_are_parsed() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ENGINE_CATEGORY_THRESHOLD", "70");
        env::set_var("ENGINE_THEME_LIMIT", "5");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.engine.category_threshold, 70.0);
        assert_eq!(config.engine.theme_limit, 5);
        reset_env();
    }

    #[test]
    fn rejects_unparseable_engine_setting() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ENGINE_PROMOTE_THRESHOLD", "high");
        let err = AppConfig::load().expect_err("threshold must be numeric");
        assert!(err.to_string().contains("ENGINE_PROMOTE_THRESHOLD"));
        reset_env();
    }
}
