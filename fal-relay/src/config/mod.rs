use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config::{self as core_config, LogConfig};
use service_core::error::AppError;
use std::path::PathBuf;
use std::time::Duration;

/// FAL queue endpoint all jobs are submitted to.
pub const DEFAULT_FAL_BASE_URL: &str = "https://queue.fal.run";

/// Model/app path appended to the queue base URL.
pub const DEFAULT_MODEL_PATH: &str = "fal-ai/flux-kontext-lora";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: core_config::Config,
    pub fal: FalSettings,
    #[serde(default)]
    pub static_files: StaticSettings,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FalSettings {
    /// Sent upstream as `Authorization: Key <api_key>`.
    pub api_key: Secret<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// Outbound request timeout. `0` waits on the upstream indefinitely.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_FAL_BASE_URL.to_string()
}

fn default_model_path() -> String {
    DEFAULT_MODEL_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl FalSettings {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: base_url.into(),
            model_path: default_model_path(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticSettings {
    #[serde(default = "default_static_root")]
    pub root: PathBuf,
    #[serde(default = "default_index")]
    pub index: String,
}

fn default_static_root() -> PathBuf {
    PathBuf::from("static")
}

fn default_index() -> String {
    "index.html".to_string()
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self {
            root: default_static_root(),
            index: default_index(),
        }
    }
}

impl StaticSettings {
    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index)
    }
}

impl RelayConfig {
    /// Load from `.env`, the optional `configuration` file and `APP_*`
    /// variables. `FAL_API_KEY` and `PORT` take precedence over all of them.
    pub fn load() -> Result<Self, AppError> {
        let builder = core_config::layered();

        let api_key = std::env::var("FAL_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let port = core_config::port_from_env("PORT")?;

        let settings = builder
            .set_default("fal.base_url", DEFAULT_FAL_BASE_URL)?
            .set_default("fal.model_path", DEFAULT_MODEL_PATH)?
            .set_override_option("fal.api_key", api_key)?
            .set_override_option("server.port", port.map(i64::from))?
            .build()?;

        let config: RelayConfig = settings.try_deserialize().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "{}. Make sure FAL_API_KEY is set in the environment or .env file",
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.fal.api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "FAL_API_KEY is required but empty"
            )));
        }
        if self.fal.base_url.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "fal.base_url must not be empty"
            )));
        }
        Ok(())
    }
}
