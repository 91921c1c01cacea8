use super::{CoreState, UiAction, dashboard};
use crate::api::{ApiCommand, ApiEvent};
use crate::app::{LoginField, LoginMode, View};
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::domain::account::NewAccount;
use crate::messages::app::AppCommand;

const LOGIN_HINT: &str =
    "Enter username and password; ↑/↓ switches field, Enter logs in, Ctrl+R creates an account";
const REGISTER_HINT: &str =
    "Email is optional; Enter creates the account, Ctrl+R goes back to log in";

pub fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    match cmd {
        AppCommand::Bootstrap => {
            state.request(RequestKey::Init, effects, |req_id| ApiCommand::Init {
                req_id,
            });
            UiAction::Handled
        }
        AppCommand::LoginSwitchField { back } if state.app.view == View::Login => {
            let app = &mut state.app;
            app.login_field = app.login_field.cycle(app.login_mode, *back);
            effects.emit_state(app);
            UiAction::Handled
        }
        AppCommand::LoginToggleMode if state.app.view == View::Login => {
            let app = &mut state.app;
            let (mode, hint) = match app.login_mode {
                LoginMode::Login => (LoginMode::Register, REGISTER_HINT),
                LoginMode::Register => (LoginMode::Login, LOGIN_HINT),
            };
            app.login_mode = mode;
            app.login_field = LoginField::Username;
            app.login_confirm.clear();
            app.login_status = hint.to_owned();
            effects.emit_state(app);
            UiAction::Handled
        }
        AppCommand::Logout if state.app.logged_in => {
            state.app.dashboard_status = "Logging out...".to_owned();
            effects.emit_state(&state.app);
            state.request(RequestKey::Logout, effects, |req_id| ApiCommand::Logout {
                req_id,
            });
            UiAction::Handled
        }
        _ => UiAction::NotHandled,
    }
}

pub(super) fn submit_login(state: &mut CoreState, effects: &mut CoreEffects) {
    if state.app.login_mode == LoginMode::Register {
        submit_register(state, effects);
        return;
    }
    let username = state.app.login_username.trim().to_owned();
    let password = state.app.login_password.clone();
    if username.is_empty() || password.is_empty() {
        state.app.login_status = "Username and password are required".to_owned();
        effects.emit_state(&state.app);
        return;
    }
    state.app.login_status = format!("Logging in as {username}...");
    effects.emit_state(&state.app);
    state.request(RequestKey::Login, effects, |req_id| ApiCommand::Login {
        req_id,
        username,
        password,
    });
}

/// Checked locally first; the reply is a `LoggedIn` like a normal login.
fn submit_register(state: &mut CoreState, effects: &mut CoreEffects) {
    let app = &mut state.app;
    let account = NewAccount::new(
        &app.login_username,
        &app.login_email,
        &app.login_password,
        &app.login_confirm,
    );
    if let Err(e) = account.validate() {
        app.login_status = e.to_string();
        effects.emit_state(app);
        return;
    }
    app.login_status = format!("Creating account {}...", account.username);
    effects.emit_state(app);
    state.request(RequestKey::Login, effects, |req_id| ApiCommand::Register {
        req_id,
        account,
    });
}

fn enter_session(state: &mut CoreState, username: Option<String>, effects: &mut CoreEffects) {
    state.app.logged_in = true;
    state.app.username = username;
    state.app.login_password.clear();
    state.app.login_confirm.clear();
    state.app.login_mode = LoginMode::Login;
    state.app.login_field = LoginField::Username;
    state.app.view = View::Dashboard;
    dashboard::refresh_all(state, effects);
    effects.emit_state(&state.app);
}

fn leave_session(state: &mut CoreState, status: &str) {
    state.request_tracker.reset_all();
    state.app.clear_user_data();
    state.app.login_status = status.to_owned();
}

pub fn handle_api_event(evt: &ApiEvent, state: &mut CoreState, effects: &mut CoreEffects) -> bool {
    match evt {
        ApiEvent::ClientReady {
            req_id,
            logged_in,
            username,
        } => {
            if !state.request_tracker.accept(&RequestKey::Init, *req_id) {
                return true;
            }
            tracing::debug!(req_id, logged_in, "API client ready");
            if *logged_in {
                enter_session(state, username.clone(), effects);
            } else {
                state.app.login_status = LOGIN_HINT.to_owned();
                effects.emit_state(&state.app);
            }
            true
        }
        ApiEvent::LoggedIn { req_id, user } => {
            if !state.request_tracker.accept(&RequestKey::Login, *req_id) {
                tracing::debug!(req_id, "stale login response dropped");
                return true;
            }
            state.app.login_status.clear();
            effects.toast(format!("Welcome, {}", user.username));
            enter_session(state, Some(user.username.clone()), effects);
            true
        }
        ApiEvent::LoggedOut { req_id } => {
            if !state.request_tracker.accept(&RequestKey::Logout, *req_id) {
                return true;
            }
            leave_session(state, "Logged out. Enter username and password");
            effects.toast("Logged out");
            effects.emit_state(&state.app);
            true
        }
        ApiEvent::SessionExpired { req_id } => {
            tracing::info!(req_id, "session expired, back to login");
            leave_session(state, "Session expired, please log in again");
            effects.error("Session expired, please log in again");
            effects.emit_state(&state.app);
            true
        }
        _ => false,
    }
}

/// Routes an error reply to the status line of the view that asked.
pub fn handle_error_event(evt: &ApiEvent, state: &mut CoreState, effects: &mut CoreEffects) {
    let ApiEvent::Error { req_id, message } = evt else {
        return;
    };
    let Some(key) = state.request_tracker.accept_any(*req_id) else {
        if *req_id == 0 {
            state.app.login_status = message.clone();
            effects.error(message.clone());
            effects.emit_state(&state.app);
        } else {
            tracing::debug!(req_id, "stale error dropped");
        }
        return;
    };

    let app = &mut state.app;
    match key {
        RequestKey::Init | RequestKey::Login | RequestKey::Logout => {
            app.login_status = message.clone();
            if app.logged_in {
                app.dashboard_status = message.clone();
            }
        }
        RequestKey::Playlists
        | RequestKey::PlaylistSongs
        | RequestKey::Import
        | RequestKey::ExportCsv => app.playlists_status = message.clone(),
        RequestKey::SpotifyPlaylists => match app.spotify_picker.as_mut() {
            Some(picker) => {
                picker.loading = false;
                picker.status = format!("{message} (u pastes a link instead)");
            }
            None => app.playlists_status = message.clone(),
        },
        RequestKey::StartTransfer | RequestKey::ModalProgress => match app.transfer_modal.as_mut() {
            Some(modal) => modal.status = message.clone(),
            None => app.playlists_status = message.clone(),
        },
        RequestKey::CancelTransfer => match app.transfer_modal.as_mut() {
            Some(modal) => modal.status = message.clone(),
            None => app.transfers_status = message.clone(),
        },
        RequestKey::TransferJobs | RequestKey::TransferJob | RequestKey::JobProgress => {
            app.transfers_status = message.clone()
        }
        RequestKey::SpotifyStatus
        | RequestKey::SpotifyAuthUrl
        | RequestKey::SpotifyCallback
        | RequestKey::SpotifyDisconnect
        | RequestKey::YouTubeStatus
        | RequestKey::YouTubeConfigure
        | RequestKey::YouTubeTest
        | RequestKey::YouTubeDisconnect => app.accounts_status = message.clone(),
    }
    if app.view == View::Dashboard {
        app.dashboard_status = message.clone();
    }
    effects.error(message.clone());
    effects.emit_state(&state.app);
}
