mod accounts_view;
mod dashboard_view;
mod event_loop;
mod guard;
mod header;
mod keyboard;
mod login_view;
mod overlays;
mod playlists_view;
mod spotify_picker;
mod styles;
mod toast;
mod transfer_modal;
mod transfers_view;
mod views;
mod widgets;

use crate::app::App;
use crate::messages::app::{AppCommand, AppEvent};
use std::io;
use tokio::sync::mpsc;

/// Runs the interactive client until the user quits.
pub async fn run_tui(
    app: App,
    tx: mpsc::Sender<AppCommand>,
    rx: mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    event_loop::run_tui_internal(app, tx, rx).await
}
