//! `RelayConfig::load` against the process environment.
//!
//! Everything runs in one test so the environment is never mutated
//! concurrently.

use fal_relay::config::RelayConfig;
use secrecy::ExposeSecret;
use std::env;
use std::time::Duration;

const VARS: [&str; 5] = [
    "FAL_API_KEY",
    "PORT",
    "APP_FAL__API_KEY",
    "APP_FAL__TIMEOUT_SECS",
    "APP_SERVER__PORT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn load_layers_environment_and_requires_an_api_key() {
    clear_env();

    // Conventional variables win over their APP_* equivalents.
    env::set_var("FAL_API_KEY", "from-env");
    env::set_var("APP_FAL__API_KEY", "from-app");
    env::set_var("APP_FAL__TIMEOUT_SECS", "7");
    env::set_var("APP_SERVER__PORT", "5000");
    env::set_var("PORT", "4321");

    let config = RelayConfig::load().expect("Failed to load configuration");
    assert_eq!(config.fal.api_key.expose_secret(), "from-env");
    assert_eq!(config.fal.timeout(), Some(Duration::from_secs(7)));
    assert_eq!(config.server.port, 4321);
    assert_eq!(config.fal.base_url, "https://queue.fal.run");
    assert_eq!(config.fal.model_path, "fal-ai/flux-kontext-lora");

    // APP_* applies when the conventional variable is absent.
    env::remove_var("FAL_API_KEY");
    env::remove_var("PORT");
    let config = RelayConfig::load().expect("Failed to load configuration");
    assert_eq!(config.fal.api_key.expose_secret(), "from-app");
    assert_eq!(config.server.port, 5000);

    // A port that does not parse is a configuration error.
    env::set_var("PORT", "not-a-port");
    let err = RelayConfig::load().unwrap_err();
    assert!(err.to_string().contains("PORT"), "{}", err);
    env::remove_var("PORT");

    // No key anywhere aborts startup.
    env::remove_var("APP_FAL__API_KEY");
    let err = RelayConfig::load().unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Configuration error"), "{}", message);
    assert!(message.contains("FAL_API_KEY"), "{}", message);

    // An empty conventional variable does not count as a key either.
    env::set_var("FAL_API_KEY", "   ");
    assert!(RelayConfig::load().is_err());

    clear_env();
}
