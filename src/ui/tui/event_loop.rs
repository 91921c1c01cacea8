use super::guard::TuiGuard;
use super::keyboard::handle_key;
use super::toast::Toast;
use super::views::draw_ui;
use crate::app::App;
use crate::messages::app::{AppCommand, AppEvent};
use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

pub(super) async fn run_tui_internal(
    mut app: App,
    tx: mpsc::Sender<AppCommand>,
    mut rx: mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    let _guard = TuiGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let _ = tx.send(AppCommand::Bootstrap).await;

    let tick_rate = Duration::from_millis(200);
    let mut toast: Option<Toast> = None;

    loop {
        while let Ok(evt) = rx.try_recv() {
            match evt {
                AppEvent::State(s) => app = *s,
                AppEvent::Toast(msg) => toast = Some(Toast::info(msg)),
                AppEvent::Error(msg) => toast = Some(Toast::error(msg)),
            }
        }
        if toast.as_ref().is_some_and(Toast::is_expired) {
            toast = None;
        }

        terminal.draw(|f| draw_ui(f, &app, toast.as_ref()))?;

        if event::poll(tick_rate)?
            && let Event::Key(key) = event::read()?
            && handle_key(&app, key, &tx).await
        {
            break;
        }
    }

    Ok(())
}
