use super::{CoreState, UiAction};
use crate::api::{ApiCommand, ApiEvent};
use crate::app::{AccountCard, InputKind, View};
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::domain::browser_config;
use crate::domain::spotify::parse_callback;
use crate::messages::app::AppCommand;

pub fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    if state.app.view != View::Accounts {
        return UiAction::NotHandled;
    }
    match cmd {
        AppCommand::AccountsMoveUp | AppCommand::AccountsMoveDown => {
            state.app.account_card = match state.app.account_card {
                AccountCard::Spotify => AccountCard::YouTubeMusic,
                AccountCard::YouTubeMusic => AccountCard::Spotify,
            };
            effects.emit_state(&state.app);
        }
        AppCommand::AccountsActivate => {
            let (kind, hint) = match state.app.account_card {
                AccountCard::Spotify => (
                    InputKind::SpotifyCallback,
                    "Paste the URL Spotify redirected you to, then Enter",
                ),
                AccountCard::YouTubeMusic => (
                    InputKind::BrowserConfigPath,
                    "Path to a browser.json with cookie and user-agent headers",
                ),
            };
            state.app.input = Some(kind);
            state.app.input_buffer.clear();
            state.app.accounts_status = hint.to_owned();
            effects.emit_state(&state.app);
        }
        AppCommand::AccountsSpotifyAuthUrl => {
            state.app.account_card = AccountCard::Spotify;
            state.app.accounts_status = "Requesting Spotify authorization URL...".to_owned();
            effects.emit_state(&state.app);
            state.request(RequestKey::SpotifyAuthUrl, effects, |req_id| {
                ApiCommand::SpotifyAuthUrl { req_id }
            });
        }
        AppCommand::AccountsDisconnect => {
            match state.app.account_card {
                AccountCard::Spotify => {
                    state.app.accounts_status = "Disconnecting Spotify...".to_owned();
                    state.request(RequestKey::SpotifyDisconnect, effects, |req_id| {
                        ApiCommand::SpotifyDisconnect { req_id }
                    });
                }
                AccountCard::YouTubeMusic => {
                    state.app.accounts_status = "Removing YouTube Music configuration...".to_owned();
                    state.request(RequestKey::YouTubeDisconnect, effects, |req_id| {
                        ApiCommand::YouTubeDisconnect { req_id }
                    });
                }
            }
            effects.emit_state(&state.app);
        }
        AppCommand::AccountsTestYouTube => {
            state.app.account_card = AccountCard::YouTubeMusic;
            state.app.youtube_test = None;
            state.app.accounts_status = "Testing YouTube Music connection...".to_owned();
            effects.emit_state(&state.app);
            state.request(RequestKey::YouTubeTest, effects, |req_id| {
                ApiCommand::YouTubeTest { req_id }
            });
        }
        AppCommand::AccountsRefresh => {
            refresh(state, effects);
            effects.emit_state(&state.app);
        }
        _ => return UiAction::NotHandled,
    }
    UiAction::Handled
}

pub(super) fn refresh(state: &mut CoreState, effects: &mut CoreEffects) {
    state.request(RequestKey::SpotifyStatus, effects, |req_id| {
        ApiCommand::SpotifyStatus { req_id }
    });
    state.request(RequestKey::YouTubeStatus, effects, |req_id| {
        ApiCommand::YouTubeStatus { req_id }
    });
}

pub(super) fn submit_callback(state: &mut CoreState, effects: &mut CoreEffects) {
    let code = match parse_callback(&state.app.input_buffer) {
        Ok(code) => code,
        Err(e) => {
            state.app.accounts_status = e.to_string();
            effects.emit_state(&state.app);
            return;
        }
    };
    state.app.input = None;
    state.app.input_buffer.clear();
    state.app.accounts_status = "Connecting Spotify account...".to_owned();
    effects.emit_state(&state.app);
    state.request(RequestKey::SpotifyCallback, effects, |req_id| {
        ApiCommand::SpotifyCallback { req_id, code }
    });
}

/// Reads and checks `browser.json` before anything goes to the backend.
pub(super) fn submit_browser_config(state: &mut CoreState, effects: &mut CoreEffects) {
    let path = state
        .app
        .input_buffer
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_owned();
    if path.is_empty() {
        state.app.accounts_status = "Enter the path to browser.json".to_owned();
        effects.emit_state(&state.app);
        return;
    }
    let checked = std::fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read {path}: {e}"))
        .and_then(|raw| browser_config::validate(&raw).map_err(|e| e.to_string()));
    let browser_data = match checked {
        Ok(v) => v,
        Err(msg) => {
            state.app.accounts_status = msg;
            effects.emit_state(&state.app);
            return;
        }
    };
    state.app.input = None;
    state.app.input_buffer.clear();
    state.app.accounts_status = "Saving YouTube Music configuration...".to_owned();
    effects.emit_state(&state.app);
    state.request(RequestKey::YouTubeConfigure, effects, |req_id| {
        ApiCommand::YouTubeConfigure {
            req_id,
            browser_data,
        }
    });
}

pub fn handle_api_event(evt: &ApiEvent, state: &mut CoreState, effects: &mut CoreEffects) -> bool {
    match evt {
        ApiEvent::SpotifyStatus { req_id, status } => {
            if !state.request_tracker.accept(&RequestKey::SpotifyStatus, *req_id) {
                return true;
            }
            state.app.spotify = Some(status.clone());
            effects.emit_state(&state.app);
            true
        }
        ApiEvent::SpotifyAuthUrl { req_id, url } => {
            if !state.request_tracker.accept(&RequestKey::SpotifyAuthUrl, *req_id) {
                return true;
            }
            state.app.spotify_auth_url = Some(url.clone());
            state.app.accounts_status = if state.settings.open_browser {
                effects.open_url(url.clone());
                "Opened Spotify in your browser; after approving, press Enter and paste the redirect URL"
                    .to_owned()
            } else {
                "Open the URL below, approve, then press Enter and paste the redirect URL".to_owned()
            };
            effects.emit_state(&state.app);
            true
        }
        ApiEvent::SpotifyConnected { req_id, account } => {
            if !state.request_tracker.accept(&RequestKey::SpotifyCallback, *req_id) {
                return true;
            }
            tracing::info!(spotify_id = %account.spotify_id, "Spotify connected");
            state.app.accounts_status = format!("Spotify connected as {}", account.label());
            state.app.spotify_account = Some(account.clone());
            state.app.spotify_auth_url = None;
            effects.toast("Spotify connected");
            effects.emit_state(&state.app);
            state.request(RequestKey::SpotifyStatus, effects, |req_id| {
                ApiCommand::SpotifyStatus { req_id }
            });
            true
        }
        ApiEvent::SpotifyDisconnected { req_id, message } => {
            if !state.request_tracker.accept(&RequestKey::SpotifyDisconnect, *req_id) {
                return true;
            }
            state.app.spotify_account = None;
            state.app.accounts_status = message.clone();
            effects.toast(message.clone());
            effects.emit_state(&state.app);
            state.request(RequestKey::SpotifyStatus, effects, |req_id| {
                ApiCommand::SpotifyStatus { req_id }
            });
            true
        }
        ApiEvent::YouTubeStatus { req_id, status } => {
            if !state.request_tracker.accept(&RequestKey::YouTubeStatus, *req_id) {
                return true;
            }
            state.app.youtube = Some(status.clone());
            effects.emit_state(&state.app);
            true
        }
        ApiEvent::YouTubeConfigured { req_id, message } => {
            if !state.request_tracker.accept(&RequestKey::YouTubeConfigure, *req_id) {
                return true;
            }
            state.app.accounts_status = message.clone();
            effects.toast(message.clone());
            effects.emit_state(&state.app);
            state.request(RequestKey::YouTubeStatus, effects, |req_id| {
                ApiCommand::YouTubeStatus { req_id }
            });
            true
        }
        ApiEvent::YouTubeTested { req_id, result } => {
            if !state.request_tracker.accept(&RequestKey::YouTubeTest, *req_id) {
                return true;
            }
            state.app.accounts_status = result.summary();
            state.app.youtube_test = Some(result.clone());
            effects.emit_state(&state.app);
            true
        }
        ApiEvent::YouTubeDisconnected { req_id, message } => {
            if !state.request_tracker.accept(&RequestKey::YouTubeDisconnect, *req_id) {
                return true;
            }
            state.app.youtube_test = None;
            state.app.accounts_status = message.clone();
            effects.toast(message.clone());
            effects.emit_state(&state.app);
            state.request(RequestKey::YouTubeStatus, effects, |req_id| {
                ApiCommand::YouTubeStatus { req_id }
            });
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::CoreEffect;
    use std::io::Write;

    fn accounts_state(dir: &std::path::Path) -> CoreState {
        let mut state = CoreState::new(dir);
        state.app.logged_in = true;
        state.app.view = View::Accounts;
        state
    }

    #[tokio::test]
    async fn denied_callback_is_reported_locally() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = accounts_state(dir.path());
        state.app.input = Some(InputKind::SpotifyCallback);
        state.app.input_buffer =
            "http://localhost:3000/callback?error=access_denied".to_owned();
        let mut effects = CoreEffects::default();

        submit_callback(&mut state, &mut effects);

        assert_eq!(effects.api_commands().count(), 0);
        assert!(state.app.accounts_status.contains("access_denied"));
    }

    #[tokio::test]
    async fn callback_code_is_forwarded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = accounts_state(dir.path());
        state.app.input = Some(InputKind::SpotifyCallback);
        state.app.input_buffer = "http://localhost:3000/callback?code=AQB42&state=x".to_owned();
        let mut effects = CoreEffects::default();

        submit_callback(&mut state, &mut effects);

        assert!(state.app.input.is_none());
        assert!(effects.api_commands().any(|c| matches!(
            c,
            ApiCommand::SpotifyCallback { code, .. } if code == "AQB42"
        )));
    }

    #[tokio::test]
    async fn browser_config_without_cookie_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("browser.json");
        let mut f = std::fs::File::create(&path).expect("create");
        write!(f, r#"{{"headers": {{"User-Agent": "Mozilla/5.0"}}}}"#).expect("write");

        let mut state = accounts_state(dir.path());
        state.app.input = Some(InputKind::BrowserConfigPath);
        state.app.input_buffer = path.display().to_string();
        let mut effects = CoreEffects::default();

        submit_browser_config(&mut state, &mut effects);

        assert_eq!(effects.api_commands().count(), 0);
        assert_eq!(state.app.input, Some(InputKind::BrowserConfigPath));
    }

    #[tokio::test]
    async fn auth_url_opens_browser_when_enabled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = accounts_state(dir.path());
        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::AccountsSpotifyAuthUrl, &mut state, &mut effects);
        let req_id = state.req_id - 1;

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::SpotifyAuthUrl {
            req_id,
            url: "https://accounts.spotify.com/authorize?client_id=x".to_owned(),
        };
        handle_api_event(&evt, &mut state, &mut effects);

        assert!(
            effects
                .actions
                .iter()
                .any(|e| matches!(e, CoreEffect::OpenUrl(u) if u.starts_with("https://accounts")))
        );
        assert!(state.app.spotify_auth_url.is_some());
    }
}
