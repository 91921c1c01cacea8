pub mod store;

pub use store::{AppSettings, load_settings, save_settings, settings_path, try_load_settings};
