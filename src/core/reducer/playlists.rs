use super::{CoreState, UiAction};
use crate::api::models::ImportReq;
use crate::api::{ApiCommand, ApiEvent};
use crate::app::{InputKind, PlaylistMode, SpotifyPicker, TransferModal, View};
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::domain::spotify::parse_playlist_ref;
use crate::messages::app::AppCommand;

pub fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    if state.app.view != View::Playlists || state.app.transfer_modal.is_some() {
        return UiAction::NotHandled;
    }
    let app = &mut state.app;
    match cmd {
        AppCommand::PlaylistsMoveUp => {
            match app.playlist_mode {
                PlaylistMode::List => app.playlists_selected = app.playlists_selected.saturating_sub(1),
                PlaylistMode::Songs => app.songs_selected = app.songs_selected.saturating_sub(1),
            }
            effects.emit_state(app);
        }
        AppCommand::PlaylistsMoveDown => {
            match app.playlist_mode {
                PlaylistMode::List => {
                    if app.playlists_selected + 1 < app.playlists.len() {
                        app.playlists_selected += 1;
                    }
                }
                PlaylistMode::Songs => {
                    if app.songs_selected + 1 < app.songs.len() {
                        app.songs_selected += 1;
                    }
                }
            }
            effects.emit_state(app);
        }
        AppCommand::PlaylistsOpenSelected if app.playlist_mode == PlaylistMode::List => {
            let Some(playlist) = app.selected_playlist() else {
                return UiAction::Handled;
            };
            let playlist_id = playlist.id;
            app.playlists_status = format!("Loading songs of {}...", playlist.name);
            app.playlist_mode = PlaylistMode::Songs;
            app.songs.clear();
            app.songs_selected = 0;
            app.songs_playlist_id = Some(playlist_id);
            effects.emit_state(app);
            state.request(RequestKey::PlaylistSongs, effects, |req_id| {
                ApiCommand::PlaylistSongs {
                    req_id,
                    playlist_id,
                }
            });
        }
        AppCommand::PlaylistsReload => {
            reload(state, effects);
            effects.emit_state(&state.app);
        }
        AppCommand::PlaylistsStartImport | AppCommand::PickerReload => {
            app.spotify_picker = Some(SpotifyPicker::loading());
            effects.emit_state(app);
            state.request(RequestKey::SpotifyPlaylists, effects, |req_id| {
                ApiCommand::SpotifyPlaylists { req_id }
            });
        }
        AppCommand::PickerMoveUp => {
            if let Some(picker) = app.spotify_picker.as_mut() {
                picker.selected = picker.selected.saturating_sub(1);
                effects.emit_state(app);
            }
        }
        AppCommand::PickerMoveDown => {
            if let Some(picker) = app.spotify_picker.as_mut() {
                if picker.selected + 1 < picker.playlists.len() {
                    picker.selected += 1;
                }
                effects.emit_state(app);
            }
        }
        AppCommand::PickerImport => {
            let Some(chosen) = app
                .spotify_picker
                .as_ref()
                .and_then(SpotifyPicker::selected_playlist)
            else {
                return UiAction::Handled;
            };
            let spotify_playlist_id = chosen.id.clone();
            let label = chosen.name.clone();
            app.spotify_picker = None;
            request_import(state, effects, spotify_playlist_id, &label);
        }
        AppCommand::PickerPasteLink => {
            app.spotify_picker = None;
            app.input = Some(InputKind::ImportRef);
            app.input_buffer.clear();
            app.playlists_status = "Paste a Spotify playlist URL, URI or ID, then Enter".to_owned();
            effects.emit_state(app);
        }
        AppCommand::PlaylistsExportCsv => {
            let Some(playlist) = app.selected_playlist() else {
                return UiAction::Handled;
            };
            let playlist_id = playlist.id;
            let playlist_name = playlist.name.clone();
            app.playlists_status = format!("Exporting {playlist_name}...");
            effects.emit_state(app);
            let export_dir = state.export_dir();
            state.request(RequestKey::ExportCsv, effects, |req_id| ApiCommand::ExportCsv {
                req_id,
                playlist_id,
                playlist_name,
                export_dir,
            });
        }
        AppCommand::PlaylistsOpenTransfer => {
            let Some(playlist) = app.selected_playlist() else {
                return UiAction::Handled;
            };
            app.transfer_modal = Some(TransferModal::new(playlist));
            effects.emit_state(app);
        }
        _ => return UiAction::NotHandled,
    }
    UiAction::Handled
}

pub(super) fn reload(state: &mut CoreState, effects: &mut CoreEffects) {
    state.app.playlists_status = "Loading playlists...".to_owned();
    state.request(RequestKey::Playlists, effects, |req_id| {
        ApiCommand::Playlists { req_id }
    });
}

/// Rejects malformed references locally; nothing is sent for them.
pub(super) fn submit_import(state: &mut CoreState, effects: &mut CoreEffects) {
    let spotify_playlist_id = match parse_playlist_ref(&state.app.input_buffer) {
        Ok(id) => id,
        Err(e) => {
            state.app.playlists_status = e.to_string();
            effects.emit_state(&state.app);
            return;
        }
    };
    state.app.input = None;
    state.app.input_buffer.clear();
    let label = spotify_playlist_id.clone();
    request_import(state, effects, spotify_playlist_id, &label);
}

fn request_import(
    state: &mut CoreState,
    effects: &mut CoreEffects,
    spotify_playlist_id: String,
    label: &str,
) {
    state.app.playlists_status = format!("Importing {label} from Spotify...");
    effects.emit_state(&state.app);
    state.request(RequestKey::Import, effects, |req_id| ApiCommand::ImportPlaylist {
        req_id,
        req: ImportReq {
            spotify_playlist_id,
            name: None,
            description: None,
        },
    });
}

pub fn handle_api_event(evt: &ApiEvent, state: &mut CoreState, effects: &mut CoreEffects) -> bool {
    match evt {
        ApiEvent::Playlists { req_id, playlists } => {
            if !state.request_tracker.accept(&RequestKey::Playlists, *req_id) {
                tracing::debug!(req_id, "stale playlists response dropped");
                return true;
            }
            let app = &mut state.app;
            app.playlists = playlists.clone();
            app.playlists_selected = app
                .playlists_selected
                .min(app.playlists.len().saturating_sub(1));
            app.playlists_status = match app.playlists.len() {
                0 => "No playlists yet, press i to import one from Spotify".to_owned(),
                1 => "1 playlist".to_owned(),
                n => format!("{n} playlists"),
            };
            effects.emit_state(app);
            true
        }
        ApiEvent::SpotifyPlaylists { req_id, playlists } => {
            if !state.request_tracker.accept(&RequestKey::SpotifyPlaylists, *req_id) {
                return true;
            }
            let app = &mut state.app;
            let fresh = playlists
                .iter()
                .filter(|p| !p.is_imported(&app.playlists))
                .count();
            let Some(picker) = app.spotify_picker.as_mut() else {
                return true;
            };
            picker.playlists = playlists.clone();
            picker.loading = false;
            picker.selected = picker.selected.min(playlists.len().saturating_sub(1));
            picker.status = match playlists.len() {
                0 => "No playlists on this Spotify account, u pastes a link".to_owned(),
                n => format!("{n} on Spotify, {fresh} not imported yet. Enter imports, u pastes a link"),
            };
            effects.emit_state(app);
            true
        }
        ApiEvent::PlaylistSongs {
            req_id,
            playlist_id,
            songs,
        } => {
            if !state.request_tracker.accept(&RequestKey::PlaylistSongs, *req_id) {
                return true;
            }
            let app = &mut state.app;
            if app.songs_playlist_id != Some(*playlist_id) {
                return true;
            }
            app.songs = songs.clone();
            app.songs_selected = 0;
            app.playlists_status = format!("{} songs, b or Esc goes back", app.songs.len());
            effects.emit_state(app);
            true
        }
        ApiEvent::PlaylistImported { req_id, playlist } => {
            if !state.request_tracker.accept(&RequestKey::Import, *req_id) {
                return true;
            }
            let app = &mut state.app;
            let idx = match app.playlists.iter().position(|p| p.id == playlist.id) {
                Some(idx) => {
                    app.playlists[idx] = playlist.clone();
                    idx
                }
                None => {
                    app.playlists.insert(0, playlist.clone());
                    0
                }
            };
            app.playlists_selected = idx;
            app.playlist_mode = PlaylistMode::List;
            app.playlists_status = format!(
                "Imported {} ({} tracks)",
                playlist.name, playlist.total_tracks
            );
            tracing::info!(playlist_id = playlist.id, "playlist imported");
            effects.toast(format!("Imported {}", playlist.name));
            effects.emit_state(app);
            true
        }
        ApiEvent::CsvExported { req_id, path } => {
            if !state.request_tracker.accept(&RequestKey::ExportCsv, *req_id) {
                return true;
            }
            state.app.playlists_status = format!("CSV saved to {}", path.display());
            effects.toast("CSV exported");
            effects.emit_state(&state.app);
            true
        }
        _ => false,
    }
}
