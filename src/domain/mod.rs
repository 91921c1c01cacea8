pub mod account;
pub mod browser_config;
pub mod model;
pub mod spotify;
pub mod status;
pub mod time;
pub mod transfer;

pub use status::{StatusTone, bar_width, clamp_percentage};
