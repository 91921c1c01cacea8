//! Error types shared across the crate.

mod api;
mod app;

pub use api::ApiError;
pub use app::{AppError, SettingsError};
