pub mod cli;
pub mod commands;
pub mod tui;

pub use cli::{Cli, Command};
pub use commands::run_command;
pub use tui::run_tui;
