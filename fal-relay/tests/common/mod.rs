#![allow(dead_code)]

use fal_relay::config::{FalSettings, RelayConfig, StaticSettings};
use fal_relay::startup::Application;
use service_core::config::{Config, LogConfig};
use std::path::PathBuf;
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-fal-key";
pub const MODEL_PATH: &str = "/fal-ai/flux-kontext-lora";

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(upstream_base_url: &str) -> Self {
        Self::spawn_with_timeout(upstream_base_url, 5).await
    }

    pub async fn spawn_with_timeout(upstream_base_url: &str, timeout_secs: u64) -> Self {
        let mut fal = FalSettings::new(TEST_API_KEY, upstream_base_url);
        fal.timeout_secs = timeout_secs;

        let config = RelayConfig {
            server: Config {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            fal,
            static_files: StaticSettings {
                root: static_root(),
                index: "index.html".to_string(),
            },
            log: LogConfig::default(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to build test client");

        Self { address, client }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

pub fn static_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

/// A base URL nothing is listening on: bind an ephemeral port, then release it.
pub fn unreachable_upstream() -> String {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener
        .local_addr()
        .expect("Failed to read local address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub async fn error_message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    body["error"]
        .as_str()
        .expect("error field must be a string")
        .to_string()
}
