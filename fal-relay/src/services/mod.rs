pub mod fal_client;
pub mod metrics;

pub use fal_client::{FalClient, JsonDocument, Operation};
