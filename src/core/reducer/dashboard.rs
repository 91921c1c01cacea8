use super::{CoreState, UiAction};
use crate::api::ApiCommand;
use crate::app::View;
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::messages::app::AppCommand;

pub fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    match cmd {
        AppCommand::DashboardRefresh if state.app.view == View::Dashboard => {
            refresh_all(state, effects);
            effects.emit_state(&state.app);
            UiAction::Handled
        }
        _ => UiAction::NotHandled,
    }
}

/// Everything the overview shows: both accounts, playlists and jobs.
pub(super) fn refresh_all(state: &mut CoreState, effects: &mut CoreEffects) {
    state.app.dashboard_status = "Loading...".to_owned();
    state.request(RequestKey::SpotifyStatus, effects, |req_id| {
        ApiCommand::SpotifyStatus { req_id }
    });
    state.request(RequestKey::YouTubeStatus, effects, |req_id| {
        ApiCommand::YouTubeStatus { req_id }
    });
    state.request(RequestKey::Playlists, effects, |req_id| {
        ApiCommand::Playlists { req_id }
    });
    state.request(RequestKey::TransferJobs, effects, |req_id| {
        ApiCommand::TransferJobs { req_id }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn refresh_only_on_dashboard() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = CoreState::new(dir.path());
        state.app.logged_in = true;
        state.app.view = View::Playlists;
        let mut effects = CoreEffects::default();

        let outcome = handle_ui(&AppCommand::DashboardRefresh, &mut state, &mut effects);
        assert!(matches!(outcome, UiAction::NotHandled));

        state.app.view = View::Dashboard;
        let outcome = handle_ui(&AppCommand::DashboardRefresh, &mut state, &mut effects);
        assert!(matches!(outcome, UiAction::Handled));
        assert_eq!(effects.api_commands().count(), 4);
    }
}
