pub mod actor;
pub mod client;
pub mod models;

pub use actor::{ApiCommand, ApiEvent, spawn_api_actor};
pub use client::{ApiClient, ApiClientConfig};
