use crate::error::AppError;
use config::{builder::DefaultState, ConfigBuilder, Environment, File};
use serde::Deserialize;

/// Listener settings shared by every service binary.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging settings consumed by [`crate::observability::init_tracing`].
#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// OTLP collector endpoint. No exporter is installed when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

/// Start a layered configuration builder.
///
/// Loads `.env`, then stacks an optional `configuration` file from the working
/// directory and `APP_`-prefixed environment variables (`__` separates nested
/// keys, e.g. `APP_SERVER__PORT`). Callers add their own defaults and
/// overrides before building.
pub fn layered() -> ConfigBuilder<DefaultState> {
    dotenvy::dotenv().ok();

    config::Config::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
}

/// Read an optional port override from a conventional variable such as `PORT`.
pub fn port_from_env(key: &str) -> Result<Option<u16>, AppError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<u16>().map(Some).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} must be a valid port: {}", key, e))
        }),
        Err(_) => Ok(None),
    }
}
