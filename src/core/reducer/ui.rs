use super::{CoreState, UiAction, accounts, dashboard, playlists, session, transfers};
use crate::app::{InputKind, LoginField, PlaylistMode, View, tab_configs, tab_index_for_view};
use crate::core::effects::CoreEffects;
use crate::messages::app::AppCommand;

pub fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    match cmd {
        AppCommand::Quit => UiAction::Quit,
        AppCommand::TabNext | AppCommand::TabPrev | AppCommand::TabTo { .. } => {
            let tabs = tab_configs(state.app.logged_in);
            let current = tab_index_for_view(state.app.view, state.app.logged_in).unwrap_or(0);
            let next = match cmd {
                AppCommand::TabNext => (current + 1) % tabs.len(),
                AppCommand::TabPrev => (current + tabs.len() - 1) % tabs.len(),
                AppCommand::TabTo { index } if *index < tabs.len() => *index,
                _ => return UiAction::Handled,
            };
            if next != current || state.app.view != tabs[next].view {
                switch_view(state, tabs[next].view, effects);
            }
            UiAction::Handled
        }
        AppCommand::ToggleHelp => {
            state.app.help_visible = !state.app.help_visible;
            effects.emit_state(&state.app);
            UiAction::Handled
        }
        AppCommand::Back => {
            back(state);
            effects.emit_state(&state.app);
            UiAction::Handled
        }
        AppCommand::InputChar { c } => {
            let Some(buf) = active_buffer(state) else {
                return UiAction::NotHandled;
            };
            buf.push(*c);
            effects.emit_state(&state.app);
            UiAction::Handled
        }
        AppCommand::InputBackspace => {
            let Some(buf) = active_buffer(state) else {
                return UiAction::NotHandled;
            };
            buf.pop();
            effects.emit_state(&state.app);
            UiAction::Handled
        }
        AppCommand::InputSubmit => {
            if state.app.view == View::Login {
                session::submit_login(state, effects);
            } else if state
                .app
                .transfer_modal
                .as_ref()
                .is_some_and(|m| m.is_editing())
            {
                transfers::submit_modal(state, effects);
            } else {
                match state.app.input {
                    Some(InputKind::ImportRef) => playlists::submit_import(state, effects),
                    Some(InputKind::SpotifyCallback) => accounts::submit_callback(state, effects),
                    Some(InputKind::BrowserConfigPath) => {
                        accounts::submit_browser_config(state, effects)
                    }
                    None => return UiAction::NotHandled,
                }
            }
            UiAction::Handled
        }
        _ => UiAction::NotHandled,
    }
}

/// Moves to `view` and fetches what it shows.
pub(super) fn switch_view(state: &mut CoreState, view: View, effects: &mut CoreEffects) {
    state.app.view = view;
    state.app.input = None;
    state.app.input_buffer.clear();
    state.app.transfer_modal = None;
    state.app.spotify_picker = None;
    state.app.help_visible = false;
    match view {
        View::Login => {}
        View::Dashboard => dashboard::refresh_all(state, effects),
        View::Playlists => {
            if state.app.playlists.is_empty() {
                playlists::reload(state, effects);
            }
        }
        View::Transfers => transfers::reload(state, effects),
        View::Accounts => accounts::refresh(state, effects),
    }
    effects.emit_state(&state.app);
}

fn back(state: &mut CoreState) {
    let app = &mut state.app;
    if app.help_visible {
        app.help_visible = false;
    } else if app.input.is_some() {
        app.input = None;
        app.input_buffer.clear();
    } else if app.transfer_modal.is_some() {
        app.transfer_modal = None;
    } else if app.spotify_picker.is_some() {
        app.spotify_picker = None;
    } else if app.job_detail.is_some() {
        app.job_detail = None;
    } else if app.playlist_mode == PlaylistMode::Songs {
        app.playlist_mode = PlaylistMode::List;
        app.songs.clear();
        app.songs_playlist_id = None;
    }
}

fn active_buffer(state: &mut CoreState) -> Option<&mut String> {
    let app = &mut state.app;
    if app.view == View::Login {
        return Some(match app.login_field {
            LoginField::Username => &mut app.login_username,
            LoginField::Email => &mut app.login_email,
            LoginField::Password => &mut app.login_password,
            LoginField::Confirm => &mut app.login_confirm,
        });
    }
    if app.transfer_modal.as_ref().is_some_and(|m| m.is_editing()) {
        return app.transfer_modal.as_mut().map(|m| &mut m.name);
    }
    if app.input.is_some() {
        return Some(&mut app.input_buffer);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiCommand;
    use crate::app::TransferModal;
    use crate::domain::model::Playlist;

    fn logged_in_state(dir: &std::path::Path) -> CoreState {
        let mut state = CoreState::new(dir);
        state.app.logged_in = true;
        state.app.view = View::Dashboard;
        state
    }

    #[tokio::test]
    async fn tab_next_wraps_and_loads_view() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = logged_in_state(dir.path());
        state.app.view = View::Accounts;
        let mut effects = CoreEffects::default();

        let outcome = handle_ui(&AppCommand::TabNext, &mut state, &mut effects);

        assert!(matches!(outcome, UiAction::Handled));
        assert_eq!(state.app.view, View::Dashboard);
        assert!(
            effects
                .api_commands()
                .any(|c| matches!(c, ApiCommand::TransferJobs { .. }))
        );
    }

    #[tokio::test]
    async fn typing_goes_to_the_focused_login_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = CoreState::new(dir.path());
        let mut effects = CoreEffects::default();

        for c in "ana".chars() {
            handle_ui(&AppCommand::InputChar { c }, &mut state, &mut effects);
        }
        state.app.login_field = LoginField::Password;
        handle_ui(&AppCommand::InputChar { c: 'x' }, &mut state, &mut effects);
        handle_ui(&AppCommand::InputBackspace, &mut state, &mut effects);
        handle_ui(&AppCommand::InputChar { c: 'y' }, &mut state, &mut effects);

        assert_eq!(state.app.login_username, "ana");
        assert_eq!(state.app.login_password, "y");
    }

    #[tokio::test]
    async fn chars_without_input_are_not_handled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = logged_in_state(dir.path());
        let mut effects = CoreEffects::default();

        let outcome = handle_ui(&AppCommand::InputChar { c: 'z' }, &mut state, &mut effects);
        assert!(matches!(outcome, UiAction::NotHandled));
    }

    #[tokio::test]
    async fn register_form_fills_email_and_confirm() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = CoreState::new(dir.path());
        state.app.login_mode = crate::app::LoginMode::Register;
        let mut effects = CoreEffects::default();

        state.app.login_field = LoginField::Email;
        handle_ui(&AppCommand::InputChar { c: 'e' }, &mut state, &mut effects);
        state.app.login_field = LoginField::Confirm;
        handle_ui(&AppCommand::InputChar { c: 'c' }, &mut state, &mut effects);

        assert_eq!(state.app.login_email, "e");
        assert_eq!(state.app.login_confirm, "c");
        assert!(state.app.login_password.is_empty());
    }

    #[tokio::test]
    async fn leaving_playlists_closes_the_picker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = logged_in_state(dir.path());
        state.app.view = View::Playlists;
        state.app.spotify_picker = Some(crate::app::SpotifyPicker::loading());
        let mut effects = CoreEffects::default();

        handle_ui(&AppCommand::TabTo { index: 2 }, &mut state, &mut effects);

        assert_eq!(state.app.view, View::Transfers);
        assert!(state.app.spotify_picker.is_none());
    }

    #[tokio::test]
    async fn back_closes_innermost_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = logged_in_state(dir.path());
        state.app.view = View::Playlists;
        state.app.help_visible = true;
        state.app.transfer_modal = Some(TransferModal::new(&Playlist::default()));
        let mut effects = CoreEffects::default();

        handle_ui(&AppCommand::Back, &mut state, &mut effects);
        assert!(!state.app.help_visible);
        assert!(state.app.transfer_modal.is_some());

        handle_ui(&AppCommand::Back, &mut state, &mut effects);
        assert!(state.app.transfer_modal.is_none());
    }
}
