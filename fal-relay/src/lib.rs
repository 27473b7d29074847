pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod startup;

use config::StaticSettings;
use services::FalClient;
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub fal: Arc<FalClient>,
    pub static_files: Arc<StaticSettings>,
}

impl AppState {
    pub fn new(fal: Arc<FalClient>, static_files: StaticSettings) -> Self {
        Self {
            fal,
            static_files: Arc::new(static_files),
        }
    }
}
