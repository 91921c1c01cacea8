//! Transfer modal on the playlists view plus the transfer history view.

use super::{CoreState, UiAction};
use crate::api::{ApiCommand, ApiEvent};
use crate::app::{App, View};
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::domain::model::{TransferJob, TransferProgress};
use crate::domain::transfer::validate_destination_name;
use crate::messages::app::AppCommand;

pub fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    if state.app.transfer_modal.is_some() {
        return handle_modal(cmd, state, effects);
    }
    if state.app.view != View::Transfers {
        return UiAction::NotHandled;
    }
    let app = &mut state.app;
    match cmd {
        AppCommand::TransfersMoveUp => {
            app.jobs_selected = app.jobs_selected.saturating_sub(1);
            effects.emit_state(app);
        }
        AppCommand::TransfersMoveDown => {
            if app.jobs_selected + 1 < app.jobs.len() {
                app.jobs_selected += 1;
            }
            effects.emit_state(app);
        }
        AppCommand::TransfersOpenDetail => {
            let Some(job) = app.selected_job().cloned() else {
                return UiAction::Handled;
            };
            let job_id = job.id;
            app.job_detail = Some(job);
            app.transfers_status = format!("Loading results of job #{job_id}...");
            effects.emit_state(app);
            state.request(RequestKey::TransferJob, effects, |req_id| {
                ApiCommand::TransferJob { req_id, job_id }
            });
        }
        AppCommand::TransfersRefreshProgress => {
            let Some(job_id) = app.selected_job().map(|j| j.id) else {
                return UiAction::Handled;
            };
            app.transfers_status = format!("Refreshing job #{job_id}...");
            effects.emit_state(app);
            state.request(RequestKey::JobProgress, effects, |req_id| {
                ApiCommand::TransferProgress { req_id, job_id }
            });
        }
        AppCommand::TransfersCancelSelected => {
            let Some(job) = app.selected_job() else {
                return UiAction::Handled;
            };
            let job_id = job.id;
            if !job.status.can_cancel() {
                app.transfers_status = format!(
                    "Job #{job_id} is already {}",
                    job.status.label().to_lowercase()
                );
                effects.emit_state(app);
                return UiAction::Handled;
            }
            app.transfers_status = format!("Cancelling job #{job_id}...");
            effects.emit_state(app);
            state.request(RequestKey::CancelTransfer, effects, |req_id| {
                ApiCommand::CancelTransfer { req_id, job_id }
            });
        }
        AppCommand::TransfersReload => {
            reload(state, effects);
            effects.emit_state(&state.app);
        }
        _ => return UiAction::NotHandled,
    }
    UiAction::Handled
}

fn handle_modal(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    let Some(modal) = state.app.transfer_modal.as_mut() else {
        return UiAction::NotHandled;
    };
    let Some(job) = modal.job.as_ref() else {
        return UiAction::NotHandled;
    };
    let job_id = job.id;
    match cmd {
        AppCommand::TransferModalRefresh => {
            modal.status = "Refreshing progress...".to_owned();
            effects.emit_state(&state.app);
            state.request(RequestKey::ModalProgress, effects, |req_id| {
                ApiCommand::TransferProgress { req_id, job_id }
            });
        }
        AppCommand::TransferModalCancelJob => {
            if !job.status.can_cancel() {
                modal.status = "This transfer can no longer be cancelled".to_owned();
                effects.emit_state(&state.app);
                return UiAction::Handled;
            }
            modal.status = "Cancelling...".to_owned();
            effects.emit_state(&state.app);
            state.request(RequestKey::CancelTransfer, effects, |req_id| {
                ApiCommand::CancelTransfer { req_id, job_id }
            });
        }
        _ => return UiAction::NotHandled,
    }
    UiAction::Handled
}

pub(super) fn reload(state: &mut CoreState, effects: &mut CoreEffects) {
    state.app.transfers_status = "Loading transfers...".to_owned();
    state.request(RequestKey::TransferJobs, effects, |req_id| {
        ApiCommand::TransferJobs { req_id }
    });
}

/// Validates the destination name and starts the job.
pub(super) fn submit_modal(state: &mut CoreState, effects: &mut CoreEffects) {
    let Some(modal) = state.app.transfer_modal.as_mut() else {
        return;
    };
    let name = match validate_destination_name(&modal.name) {
        Ok(name) => name,
        Err(e) => {
            modal.status = e.to_string();
            effects.emit_state(&state.app);
            return;
        }
    };
    let playlist_id = modal.playlist_id;
    modal.status = format!("Starting transfer to \"{name}\"...");
    effects.emit_state(&state.app);
    state.request(RequestKey::StartTransfer, effects, |req_id| {
        ApiCommand::StartTransfer {
            req_id,
            playlist_id,
            youtube_playlist_name: name,
        }
    });
}

fn upsert_job(app: &mut App, job: &TransferJob) {
    match app.jobs.iter_mut().find(|j| j.id == job.id) {
        Some(slot) => *slot = job.clone(),
        None => app.jobs.insert(0, job.clone()),
    }
    if let Some(detail) = app.job_detail.as_mut().filter(|d| d.id == job.id) {
        *detail = job.clone();
    }
    if let Some(current) = app
        .transfer_modal
        .as_mut()
        .and_then(|m| m.job.as_mut())
        .filter(|j| j.id == job.id)
    {
        *current = job.clone();
    }
}

fn apply_progress(app: &mut App, progress: &TransferProgress) {
    for job in app.jobs.iter_mut() {
        job.apply_progress(progress);
    }
    if let Some(detail) = app.job_detail.as_mut() {
        detail.apply_progress(progress);
    }
    if let Some(job) = app.transfer_modal.as_mut().and_then(|m| m.job.as_mut()) {
        job.apply_progress(progress);
    }
}

fn progress_line(progress: &TransferProgress) -> String {
    format!(
        "{} {}/{} songs, {} transferred, {} failed",
        progress.status.badge(),
        progress.processed_songs,
        progress.total_songs,
        progress.successful_transfers,
        progress.failed_transfers
    )
}

pub fn handle_api_event(evt: &ApiEvent, state: &mut CoreState, effects: &mut CoreEffects) -> bool {
    match evt {
        ApiEvent::TransferJobs { req_id, jobs } => {
            if !state.request_tracker.accept(&RequestKey::TransferJobs, *req_id) {
                tracing::debug!(req_id, "stale transfer list dropped");
                return true;
            }
            let app = &mut state.app;
            app.jobs = jobs.clone();
            app.jobs_selected = app.jobs_selected.min(app.jobs.len().saturating_sub(1));
            app.transfers_status = match app.jobs.len() {
                0 => "No transfers yet".to_owned(),
                n => format!("{n} transfers, {} active", app.active_job_count()),
            };
            app.dashboard_status = format!("Updated {}", chrono::Local::now().format("%H:%M:%S"));
            effects.emit_state(app);
            true
        }
        ApiEvent::TransferJob { req_id, job } => {
            if !state.request_tracker.accept(&RequestKey::TransferJob, *req_id) {
                return true;
            }
            let app = &mut state.app;
            upsert_job(app, job);
            if app.job_detail.is_some() {
                app.job_detail = Some(job.clone());
            }
            app.transfers_status = format!("{} song results", job.song_results.len());
            effects.emit_state(app);
            true
        }
        ApiEvent::TransferStarted { req_id, job } => {
            if !state.request_tracker.accept(&RequestKey::StartTransfer, *req_id) {
                return true;
            }
            tracing::info!(job_id = job.id, "transfer started");
            let app = &mut state.app;
            if let Some(modal) = app.transfer_modal.as_mut() {
                modal.job = Some(job.clone());
                modal.status = "Transfer started; r refreshes progress, c cancels".to_owned();
            }
            upsert_job(app, job);
            effects.toast(format!("Transfer #{} started", job.id));
            effects.emit_state(app);
            true
        }
        ApiEvent::TransferProgress { req_id, progress } => {
            let for_modal = state
                .request_tracker
                .accept(&RequestKey::ModalProgress, *req_id);
            if !for_modal && !state.request_tracker.accept(&RequestKey::JobProgress, *req_id) {
                tracing::debug!(req_id, "stale progress dropped");
                return true;
            }
            let app = &mut state.app;
            apply_progress(app, progress);
            let line = progress_line(progress);
            match app.transfer_modal.as_mut() {
                Some(modal) if for_modal => modal.status = line,
                _ => app.transfers_status = format!("Job #{}: {line}", progress.id),
            }
            effects.emit_state(app);
            true
        }
        ApiEvent::TransferCancelled { req_id, job } => {
            if !state.request_tracker.accept(&RequestKey::CancelTransfer, *req_id) {
                return true;
            }
            tracing::info!(job_id = job.id, "transfer cancelled");
            let app = &mut state.app;
            upsert_job(app, job);
            if let Some(modal) = app.transfer_modal.as_mut() {
                modal.status = "Transfer cancelled".to_owned();
            }
            app.transfers_status = format!("Job #{} cancelled", job.id);
            effects.toast("Transfer cancelled");
            effects.emit_state(app);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TransferModal;
    use crate::domain::model::{Playlist, TransferStatus};

    fn modal_state(dir: &std::path::Path) -> CoreState {
        let mut state = CoreState::new(dir);
        state.app.logged_in = true;
        state.app.view = View::Playlists;
        state.app.transfer_modal = Some(TransferModal::new(&Playlist {
            id: 4,
            name: "Gym".to_owned(),
            ..Default::default()
        }));
        state
    }

    fn started_job() -> TransferJob {
        TransferJob {
            id: 11,
            status: TransferStatus::Processing,
            total_songs: 10,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn blank_destination_is_rejected_locally() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = modal_state(dir.path());
        if let Some(modal) = state.app.transfer_modal.as_mut() {
            modal.name = "   ".to_owned();
        }
        let mut effects = CoreEffects::default();

        submit_modal(&mut state, &mut effects);

        assert_eq!(effects.api_commands().count(), 0);
    }

    #[tokio::test]
    async fn start_then_progress_updates_modal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = modal_state(dir.path());
        let mut effects = CoreEffects::default();
        submit_modal(&mut state, &mut effects);
        assert!(effects.api_commands().any(|c| matches!(
            c,
            ApiCommand::StartTransfer { playlist_id: 4, youtube_playlist_name, .. } if youtube_playlist_name == "Gym"
        )));
        let start_id = state.req_id - 1;

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::TransferStarted {
            req_id: start_id,
            job: started_job(),
        };
        assert!(handle_api_event(&evt, &mut state, &mut effects));
        assert_eq!(state.app.jobs.len(), 1);

        let mut effects = CoreEffects::default();
        let outcome = handle_ui(&AppCommand::TransferModalRefresh, &mut state, &mut effects);
        assert!(matches!(outcome, UiAction::Handled));
        let progress_id = state.req_id - 1;

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::TransferProgress {
            req_id: progress_id,
            progress: TransferProgress {
                id: 11,
                status: TransferStatus::Processing,
                progress_percentage: 40,
                processed_songs: 4,
                total_songs: 10,
                successful_transfers: 3,
                failed_transfers: 1,
                youtube_playlist_id: String::new(),
            },
        };
        assert!(handle_api_event(&evt, &mut state, &mut effects));

        let modal = state.app.transfer_modal.as_ref().expect("modal");
        let job = modal.job.as_ref().expect("job");
        assert_eq!(job.progress_percentage, 40);
        assert_eq!(job.processed_songs, 4);
        assert_eq!(state.app.jobs[0].progress_percentage, 40);
    }

    #[tokio::test]
    async fn finished_jobs_are_not_cancelled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = CoreState::new(dir.path());
        state.app.logged_in = true;
        state.app.view = View::Transfers;
        state.app.jobs = vec![TransferJob {
            id: 3,
            status: TransferStatus::Completed,
            ..Default::default()
        }];
        let mut effects = CoreEffects::default();

        handle_ui(&AppCommand::TransfersCancelSelected, &mut state, &mut effects);

        assert_eq!(effects.api_commands().count(), 0);
        assert!(state.app.transfers_status.contains("completed"));
    }

    #[tokio::test]
    async fn cancelled_job_replaces_list_entry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = CoreState::new(dir.path());
        state.app.logged_in = true;
        state.app.view = View::Transfers;
        state.app.jobs = vec![started_job()];
        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::TransfersCancelSelected, &mut state, &mut effects);
        let req_id = state.req_id - 1;

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::TransferCancelled {
            req_id,
            job: TransferJob {
                status: TransferStatus::Failed,
                error_message: "Cancelled by the user".to_owned(),
                ..started_job()
            },
        };
        handle_api_event(&evt, &mut state, &mut effects);

        assert_eq!(state.app.jobs.len(), 1);
        assert_eq!(state.app.jobs[0].status, TransferStatus::Failed);
    }
}
