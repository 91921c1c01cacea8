use crate::api::{ApiClientConfig, ApiCommand, ApiEvent, spawn_api_actor};
use crate::app::App;
use crate::messages::app::{AppCommand, AppEvent};
use crate::settings::AppSettings;

use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::core::effects::{CoreDispatch, CoreEffects, run_effects};
use crate::core::infra::{RequestKey, RequestTracker};
use crate::core::utils;

mod accounts;
mod dashboard;
mod playlists;
mod session;
mod transfers;
mod ui;

enum CoreMsg {
    Ui(AppCommand),
    Api(ApiEvent),
}

struct CoreState {
    app: App,
    req_id: u64,
    settings: AppSettings,
    request_tracker: RequestTracker<RequestKey>,
}

type UiHandler = fn(&AppCommand, &mut CoreState, &mut CoreEffects) -> UiAction;

enum UiAction {
    Handled,
    NotHandled,
    Quit,
}

impl CoreState {
    #[cfg(test)]
    fn new(_data_dir: &std::path::Path) -> Self {
        Self::new_with_settings(AppSettings::default())
    }

    fn new_with_settings(settings: AppSettings) -> Self {
        Self {
            app: App::default(),
            req_id: 1,
            settings,
            request_tracker: RequestTracker::new(),
        }
    }

    /// Issues a tracked request and queues it for the API actor.
    fn request(
        &mut self,
        key: RequestKey,
        effects: &mut CoreEffects,
        build: impl FnOnce(u64) -> ApiCommand,
    ) {
        let req_id = &mut self.req_id;
        let id = self.request_tracker.issue(key, || utils::next_id(req_id));
        effects.send_api_warn(build(id), "API actor channel closed");
    }

    fn export_dir(&self) -> PathBuf {
        self.settings
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

async fn reduce(msg: CoreMsg, state: &mut CoreState, effects: &mut CoreEffects) -> bool {
    match msg {
        CoreMsg::Ui(cmd) => {
            let handlers: [UiHandler; 6] = [
                ui::handle_ui,
                session::handle_ui,
                dashboard::handle_ui,
                playlists::handle_ui,
                transfers::handle_ui,
                accounts::handle_ui,
            ];
            for handler in handlers {
                match handler(&cmd, state, effects) {
                    UiAction::Quit => return true,
                    UiAction::Handled => return false,
                    UiAction::NotHandled => {}
                }
            }
            tracing::trace!(?cmd, "command ignored in current state");
        }
        CoreMsg::Api(evt) => {
            if session::handle_api_event(&evt, state, effects) {
                return false;
            }
            if playlists::handle_api_event(&evt, state, effects) {
                return false;
            }
            if transfers::handle_api_event(&evt, state, effects) {
                return false;
            }
            if accounts::handle_api_event(&evt, state, effects) {
                return false;
            }
            session::handle_error_event(&evt, state, effects);
        }
    }

    false
}

pub fn spawn_app_actor(
    cfg: ApiClientConfig,
    settings: AppSettings,
) -> (mpsc::Sender<AppCommand>, mpsc::Receiver<AppEvent>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<AppCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<AppEvent>(64);

    let (tx_api, mut rx_api) = spawn_api_actor(cfg);

    tokio::spawn(async move {
        let mut state = CoreState::new_with_settings(settings);
        let dispatch = CoreDispatch {
            tx_api: &tx_api,
            tx_evt: &tx_evt,
        };

        loop {
            let msg = tokio::select! {
                Some(cmd) = rx_cmd.recv() => CoreMsg::Ui(cmd),
                Some(evt) = rx_api.recv() => CoreMsg::Api(evt),
                else => break,
            };

            let mut effects = CoreEffects::default();
            let should_quit = reduce(msg, &mut state, &mut effects).await;
            run_effects(effects, &dispatch).await;
            if should_quit {
                tracing::info!("core actor quitting");
                break;
            }
        }
    });

    (tx_cmd, rx_evt)
}
