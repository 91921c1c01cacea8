pub mod api;
pub mod app;
pub mod core;
pub mod domain;
pub mod error;
pub mod logging;
pub mod messages;
pub mod settings;
pub mod ui;
