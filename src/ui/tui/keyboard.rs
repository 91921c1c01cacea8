use crate::app::{App, View};
use crate::messages::app::AppCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

/// Sends the command for `key`; true means the loop should exit.
pub(super) async fn handle_key(app: &App, key: KeyEvent, tx: &mpsc::Sender<AppCommand>) -> bool {
    let Some(cmd) = map_key(app, key) else {
        return false;
    };
    let quit = matches!(cmd, AppCommand::Quit);
    if let Err(e) = tx.send(cmd).await {
        tracing::warn!(err = %e, "core actor channel closed");
        return true;
    }
    quit
}

pub(super) fn map_key(app: &App, key: KeyEvent) -> Option<AppCommand> {
    // Some terminals report both press and release.
    if matches!(key.kind, KeyEventKind::Release) {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return Some(AppCommand::Quit);
    }

    if app.help_visible {
        return match key.code {
            KeyCode::Char('?') | KeyCode::Esc => Some(AppCommand::ToggleHelp),
            _ => None,
        };
    }

    if let KeyCode::F(k @ 1..=4) = key.code {
        return Some(AppCommand::TabTo {
            index: usize::from(k) - 1,
        });
    }

    // Ctrl+Tab switches views even while typing.
    if ctrl {
        match key.code {
            KeyCode::Tab => return Some(AppCommand::TabNext),
            KeyCode::BackTab => return Some(AppCommand::TabPrev),
            _ => {}
        }
    }

    if app.view == View::Login {
        return match key.code {
            KeyCode::Down | KeyCode::Tab => Some(AppCommand::LoginSwitchField { back: false }),
            KeyCode::Up | KeyCode::BackTab => Some(AppCommand::LoginSwitchField { back: true }),
            KeyCode::Char('r') if ctrl => Some(AppCommand::LoginToggleMode),
            KeyCode::Enter => Some(AppCommand::InputSubmit),
            KeyCode::Backspace => Some(AppCommand::InputBackspace),
            KeyCode::Char(c) if !ctrl => Some(AppCommand::InputChar { c }),
            _ => None,
        };
    }

    if app.is_typing() {
        return match key.code {
            KeyCode::Esc => Some(AppCommand::Back),
            KeyCode::Enter => Some(AppCommand::InputSubmit),
            KeyCode::Backspace => Some(AppCommand::InputBackspace),
            KeyCode::Char(c) if !ctrl => Some(AppCommand::InputChar { c }),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => return Some(AppCommand::Quit),
        KeyCode::Char('?') => return Some(AppCommand::ToggleHelp),
        KeyCode::Char('L') => return Some(AppCommand::Logout),
        KeyCode::Esc => return Some(AppCommand::Back),
        KeyCode::Tab => return Some(AppCommand::TabNext),
        KeyCode::BackTab => return Some(AppCommand::TabPrev),
        _ => {}
    }

    match app.view {
        View::Login => None,
        View::Dashboard => match key.code {
            KeyCode::Char('r') => Some(AppCommand::DashboardRefresh),
            _ => None,
        },
        View::Playlists if app.transfer_modal.is_some() => match key.code {
            KeyCode::Char('r') => Some(AppCommand::TransferModalRefresh),
            KeyCode::Char('c') => Some(AppCommand::TransferModalCancelJob),
            _ => None,
        },
        View::Playlists if app.spotify_picker.is_some() => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(AppCommand::PickerMoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppCommand::PickerMoveDown),
            KeyCode::Enter => Some(AppCommand::PickerImport),
            KeyCode::Char('u') => Some(AppCommand::PickerPasteLink),
            KeyCode::Char('r') => Some(AppCommand::PickerReload),
            KeyCode::Char('b') => Some(AppCommand::Back),
            _ => None,
        },
        View::Playlists => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(AppCommand::PlaylistsMoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppCommand::PlaylistsMoveDown),
            KeyCode::Enter => Some(AppCommand::PlaylistsOpenSelected),
            KeyCode::Char('b') => Some(AppCommand::Back),
            KeyCode::Char('i') => Some(AppCommand::PlaylistsStartImport),
            KeyCode::Char('t') => Some(AppCommand::PlaylistsOpenTransfer),
            KeyCode::Char('e') => Some(AppCommand::PlaylistsExportCsv),
            KeyCode::Char('r') => Some(AppCommand::PlaylistsReload),
            _ => None,
        },
        View::Transfers => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(AppCommand::TransfersMoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppCommand::TransfersMoveDown),
            KeyCode::Enter => Some(AppCommand::TransfersOpenDetail),
            KeyCode::Char('p') => Some(AppCommand::TransfersRefreshProgress),
            KeyCode::Char('c') => Some(AppCommand::TransfersCancelSelected),
            KeyCode::Char('r') => Some(AppCommand::TransfersReload),
            _ => None,
        },
        View::Accounts => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(AppCommand::AccountsMoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppCommand::AccountsMoveDown),
            KeyCode::Enter => Some(AppCommand::AccountsActivate),
            KeyCode::Char('a') => Some(AppCommand::AccountsSpotifyAuthUrl),
            KeyCode::Char('d') => Some(AppCommand::AccountsDisconnect),
            KeyCode::Char('t') => Some(AppCommand::AccountsTestYouTube),
            KeyCode::Char('r') => Some(AppCommand::AccountsRefresh),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{InputKind, SpotifyPicker, TransferModal};
    use crate::domain::model::{Playlist, TransferJob};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view(view: View) -> App {
        App {
            view,
            logged_in: true,
            ..App::default()
        }
    }

    #[test]
    fn q_types_into_login_form() {
        let app = App::default();
        assert!(matches!(
            map_key(&app, press(KeyCode::Char('q'))),
            Some(AppCommand::InputChar { c: 'q' })
        ));
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = view(View::Playlists);
        app.input = Some(InputKind::ImportRef);
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(map_key(&app, key), Some(AppCommand::Quit)));
    }

    #[test]
    fn q_quits_outside_inputs() {
        let app = view(View::Transfers);
        assert!(matches!(
            map_key(&app, press(KeyCode::Char('q'))),
            Some(AppCommand::Quit)
        ));
    }

    #[test]
    fn modal_keys_depend_on_phase() {
        let mut app = view(View::Playlists);
        app.transfer_modal = Some(TransferModal::new(&Playlist::default()));
        assert!(matches!(
            map_key(&app, press(KeyCode::Char('r'))),
            Some(AppCommand::InputChar { c: 'r' })
        ));

        if let Some(modal) = app.transfer_modal.as_mut() {
            modal.job = Some(TransferJob::default());
        }
        assert!(matches!(
            map_key(&app, press(KeyCode::Char('r'))),
            Some(AppCommand::TransferModalRefresh)
        ));
        assert!(matches!(
            map_key(&app, press(KeyCode::Char('c'))),
            Some(AppCommand::TransferModalCancelJob)
        ));
    }

    #[test]
    fn function_keys_pick_tabs() {
        let app = view(View::Dashboard);
        assert!(matches!(
            map_key(&app, press(KeyCode::F(3))),
            Some(AppCommand::TabTo { index: 2 })
        ));
    }

    #[test]
    fn ctrl_tab_switches_views_from_anywhere() {
        let ctrl_tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::CONTROL);
        let ctrl_back = KeyEvent::new(
            KeyCode::BackTab,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );

        let mut app = view(View::Playlists);
        app.input = Some(InputKind::ImportRef);
        assert!(matches!(map_key(&app, ctrl_tab), Some(AppCommand::TabNext)));
        assert!(matches!(map_key(&app, ctrl_back), Some(AppCommand::TabPrev)));

        let app = view(View::Accounts);
        assert!(matches!(map_key(&app, ctrl_tab), Some(AppCommand::TabNext)));
    }

    #[test]
    fn login_form_keys() {
        let app = App::default();
        assert!(matches!(
            map_key(&app, press(KeyCode::Up)),
            Some(AppCommand::LoginSwitchField { back: true })
        ));
        assert!(matches!(
            map_key(&app, press(KeyCode::Tab)),
            Some(AppCommand::LoginSwitchField { back: false })
        ));
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert!(matches!(
            map_key(&app, ctrl_r),
            Some(AppCommand::LoginToggleMode)
        ));
        assert!(matches!(
            map_key(&app, press(KeyCode::Char('r'))),
            Some(AppCommand::InputChar { c: 'r' })
        ));
    }

    #[test]
    fn picker_takes_over_playlist_keys() {
        let mut app = view(View::Playlists);
        assert!(matches!(
            map_key(&app, press(KeyCode::Char('i'))),
            Some(AppCommand::PlaylistsStartImport)
        ));

        app.spotify_picker = Some(SpotifyPicker::loading());
        assert!(matches!(
            map_key(&app, press(KeyCode::Enter)),
            Some(AppCommand::PickerImport)
        ));
        assert!(matches!(
            map_key(&app, press(KeyCode::Char('u'))),
            Some(AppCommand::PickerPasteLink)
        ));
        assert!(matches!(
            map_key(&app, press(KeyCode::Down)),
            Some(AppCommand::PickerMoveDown)
        ));
        assert!(matches!(
            map_key(&app, press(KeyCode::Esc)),
            Some(AppCommand::Back)
        ));
    }

    #[test]
    fn release_events_are_ignored() {
        let app = view(View::Dashboard);
        let mut key = press(KeyCode::Char('r'));
        key.kind = KeyEventKind::Release;
        assert!(map_key(&app, key).is_none());
    }
}
