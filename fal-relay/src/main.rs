use anyhow::Context;
use fal_relay::config::RelayConfig;
use fal_relay::services::metrics::init_metrics;
use fal_relay::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RelayConfig::load()?;

    init_tracing("fal-relay", &config.log);
    init_metrics();

    let app = Application::build(config)
        .await
        .context("Failed to start fal-relay")?;

    app.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    tracing::info!("Service shutdown complete");
    Ok(())
}
