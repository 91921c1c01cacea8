use crate::api::client::{ApiClient, ApiClientConfig};
use crate::api::models::ImportReq;
use crate::domain::account::NewAccount;
use crate::domain::model::{
    ConnectionTest, Playlist, Song, SpotifyAccount, SpotifyPlaylist, SpotifyStatus, TransferJob,
    TransferProgress, User, YouTubeMusicStatus,
};
use crate::domain::transfer::export_file_name;
use crate::error::ApiError;

use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum ApiCommand {
    Init {
        req_id: u64,
    },
    Login {
        req_id: u64,
        username: String,
        password: String,
    },
    /// Answered with `LoggedIn`, like `Login`.
    Register {
        req_id: u64,
        account: NewAccount,
    },
    Logout {
        req_id: u64,
    },
    Playlists {
        req_id: u64,
    },
    PlaylistSongs {
        req_id: u64,
        playlist_id: i64,
    },
    ImportPlaylist {
        req_id: u64,
        req: ImportReq,
    },
    ExportCsv {
        req_id: u64,
        playlist_id: i64,
        playlist_name: String,
        export_dir: PathBuf,
    },
    TransferJobs {
        req_id: u64,
    },
    TransferJob {
        req_id: u64,
        job_id: i64,
    },
    StartTransfer {
        req_id: u64,
        playlist_id: i64,
        youtube_playlist_name: String,
    },
    TransferProgress {
        req_id: u64,
        job_id: i64,
    },
    CancelTransfer {
        req_id: u64,
        job_id: i64,
    },
    SpotifyStatus {
        req_id: u64,
    },
    SpotifyAuthUrl {
        req_id: u64,
    },
    SpotifyPlaylists {
        req_id: u64,
    },
    SpotifyCallback {
        req_id: u64,
        code: String,
    },
    SpotifyDisconnect {
        req_id: u64,
    },
    YouTubeStatus {
        req_id: u64,
    },
    YouTubeConfigure {
        req_id: u64,
        browser_data: serde_json::Value,
    },
    YouTubeTest {
        req_id: u64,
    },
    YouTubeDisconnect {
        req_id: u64,
    },
}

#[derive(Debug)]
pub enum ApiEvent {
    ClientReady {
        req_id: u64,
        logged_in: bool,
        username: Option<String>,
    },
    LoggedIn {
        req_id: u64,
        user: User,
    },
    LoggedOut {
        req_id: u64,
    },
    Playlists {
        req_id: u64,
        playlists: Vec<Playlist>,
    },
    PlaylistSongs {
        req_id: u64,
        playlist_id: i64,
        songs: Vec<Song>,
    },
    PlaylistImported {
        req_id: u64,
        playlist: Playlist,
    },
    CsvExported {
        req_id: u64,
        path: PathBuf,
    },
    TransferJobs {
        req_id: u64,
        jobs: Vec<TransferJob>,
    },
    TransferJob {
        req_id: u64,
        job: TransferJob,
    },
    TransferStarted {
        req_id: u64,
        job: TransferJob,
    },
    TransferProgress {
        req_id: u64,
        progress: TransferProgress,
    },
    TransferCancelled {
        req_id: u64,
        job: TransferJob,
    },
    SpotifyStatus {
        req_id: u64,
        status: SpotifyStatus,
    },
    SpotifyAuthUrl {
        req_id: u64,
        url: String,
    },
    SpotifyPlaylists {
        req_id: u64,
        playlists: Vec<SpotifyPlaylist>,
    },
    SpotifyConnected {
        req_id: u64,
        account: SpotifyAccount,
    },
    SpotifyDisconnected {
        req_id: u64,
        message: String,
    },
    YouTubeStatus {
        req_id: u64,
        status: YouTubeMusicStatus,
    },
    YouTubeConfigured {
        req_id: u64,
        message: String,
    },
    YouTubeTested {
        req_id: u64,
        result: ConnectionTest,
    },
    YouTubeDisconnected {
        req_id: u64,
        message: String,
    },
    /// The backend rejected the token; it has already been cleared.
    SessionExpired {
        req_id: u64,
    },
    Error {
        req_id: u64,
        message: String,
    },
}

async fn emit_error(tx_evt: &mpsc::Sender<ApiEvent>, req_id: u64, ctx: &'static str, err: ApiError) {
    if matches!(err, ApiError::Unauthorized) {
        tracing::info!(req_id, ctx, "session expired");
        let _ = tx_evt.send(ApiEvent::SessionExpired { req_id }).await;
        return;
    }
    tracing::warn!(req_id, ctx, err = %err, "API request failed");
    let _ = tx_evt
        .send(ApiEvent::Error {
            req_id,
            message: err.to_string(),
        })
        .await;
}

/// Runs the client on its own task. Commands are served strictly in order.
pub fn spawn_api_actor(cfg: ApiClientConfig) -> (mpsc::Sender<ApiCommand>, mpsc::Receiver<ApiEvent>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<ApiCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<ApiEvent>(64);

    tokio::spawn(async move {
        let mut client = match ApiClient::new(cfg) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(err = %e, "failed to build API client");
                let _ = tx_evt
                    .send(ApiEvent::Error {
                        req_id: 0,
                        message: format!("startup failed: {e}"),
                    })
                    .await;
                return;
            }
        };

        while let Some(cmd) = rx_cmd.recv().await {
            let (req_id, ctx, res) = handle(&mut client, cmd).await;
            match res {
                Ok(evt) => {
                    let _ = tx_evt.send(evt).await;
                }
                Err(e) => emit_error(&tx_evt, req_id, ctx, e).await,
            }
        }
        tracing::debug!("API actor stopped");
    });

    (tx_cmd, rx_evt)
}

async fn handle(
    client: &mut ApiClient,
    cmd: ApiCommand,
) -> (u64, &'static str, Result<ApiEvent, ApiError>) {
    match cmd {
        ApiCommand::Init { req_id } => (
            req_id,
            "Init",
            Ok(ApiEvent::ClientReady {
                req_id,
                logged_in: client.is_authenticated(),
                username: client.username().map(str::to_owned),
            }),
        ),
        ApiCommand::Login {
            req_id,
            username,
            password,
        } => (
            req_id,
            "Login",
            client
                .login(&username, &password)
                .await
                .map(|user| ApiEvent::LoggedIn { req_id, user }),
        ),
        ApiCommand::Register { req_id, account } => (
            req_id,
            "Register",
            client
                .register(&account)
                .await
                .map(|user| ApiEvent::LoggedIn { req_id, user }),
        ),
        ApiCommand::Logout { req_id } => (
            req_id,
            "Logout",
            client.logout().await.map(|()| ApiEvent::LoggedOut { req_id }),
        ),
        ApiCommand::Playlists { req_id } => (
            req_id,
            "Playlists",
            client
                .list_playlists()
                .await
                .map(|playlists| ApiEvent::Playlists { req_id, playlists }),
        ),
        ApiCommand::PlaylistSongs {
            req_id,
            playlist_id,
        } => (
            req_id,
            "PlaylistSongs",
            client
                .playlist_songs(playlist_id)
                .await
                .map(|songs| ApiEvent::PlaylistSongs {
                    req_id,
                    playlist_id,
                    songs,
                }),
        ),
        ApiCommand::ImportPlaylist { req_id, req } => (
            req_id,
            "ImportPlaylist",
            client
                .import_from_spotify(&req)
                .await
                .map(|playlist| ApiEvent::PlaylistImported { req_id, playlist }),
        ),
        ApiCommand::ExportCsv {
            req_id,
            playlist_id,
            playlist_name,
            export_dir,
        } => {
            let res = async {
                let csv = client.export_csv(playlist_id).await?;
                tokio::fs::create_dir_all(&export_dir).await?;
                let path = export_dir.join(export_file_name(&playlist_name));
                tokio::fs::write(&path, csv).await?;
                tracing::info!(playlist_id, path = %path.display(), "CSV exported");
                Ok(ApiEvent::CsvExported { req_id, path })
            }
            .await;
            (req_id, "ExportCsv", res)
        }
        ApiCommand::TransferJobs { req_id } => (
            req_id,
            "TransferJobs",
            client
                .list_transfer_jobs()
                .await
                .map(|jobs| ApiEvent::TransferJobs { req_id, jobs }),
        ),
        ApiCommand::TransferJob { req_id, job_id } => (
            req_id,
            "TransferJob",
            client
                .get_transfer_job(job_id)
                .await
                .map(|job| ApiEvent::TransferJob { req_id, job }),
        ),
        ApiCommand::StartTransfer {
            req_id,
            playlist_id,
            youtube_playlist_name,
        } => (
            req_id,
            "StartTransfer",
            client
                .start_transfer(playlist_id, &youtube_playlist_name)
                .await
                .map(|job| ApiEvent::TransferStarted { req_id, job }),
        ),
        ApiCommand::TransferProgress { req_id, job_id } => (
            req_id,
            "TransferProgress",
            client
                .transfer_progress(job_id)
                .await
                .map(|progress| ApiEvent::TransferProgress { req_id, progress }),
        ),
        ApiCommand::CancelTransfer { req_id, job_id } => (
            req_id,
            "CancelTransfer",
            client
                .cancel_transfer(job_id)
                .await
                .map(|job| ApiEvent::TransferCancelled { req_id, job }),
        ),
        ApiCommand::SpotifyStatus { req_id } => (
            req_id,
            "SpotifyStatus",
            client
                .spotify_status()
                .await
                .map(|status| ApiEvent::SpotifyStatus { req_id, status }),
        ),
        ApiCommand::SpotifyAuthUrl { req_id } => (
            req_id,
            "SpotifyAuthUrl",
            client
                .spotify_auth_url()
                .await
                .map(|url| ApiEvent::SpotifyAuthUrl { req_id, url }),
        ),
        ApiCommand::SpotifyPlaylists { req_id } => (
            req_id,
            "SpotifyPlaylists",
            client
                .spotify_playlists()
                .await
                .map(|playlists| ApiEvent::SpotifyPlaylists { req_id, playlists }),
        ),
        ApiCommand::SpotifyCallback { req_id, code } => (
            req_id,
            "SpotifyCallback",
            client
                .spotify_callback(&code)
                .await
                .map(|account| ApiEvent::SpotifyConnected { req_id, account }),
        ),
        ApiCommand::SpotifyDisconnect { req_id } => (
            req_id,
            "SpotifyDisconnect",
            client
                .spotify_disconnect()
                .await
                .map(|message| ApiEvent::SpotifyDisconnected { req_id, message }),
        ),
        ApiCommand::YouTubeStatus { req_id } => (
            req_id,
            "YouTubeStatus",
            client
                .youtube_music_status()
                .await
                .map(|status| ApiEvent::YouTubeStatus { req_id, status }),
        ),
        ApiCommand::YouTubeConfigure {
            req_id,
            browser_data,
        } => (
            req_id,
            "YouTubeConfigure",
            client
                .youtube_music_configure(&browser_data)
                .await
                .map(|message| ApiEvent::YouTubeConfigured { req_id, message }),
        ),
        ApiCommand::YouTubeTest { req_id } => (
            req_id,
            "YouTubeTest",
            client
                .youtube_music_test_connection()
                .await
                .map(|result| ApiEvent::YouTubeTested { req_id, result }),
        ),
        ApiCommand::YouTubeDisconnect { req_id } => (
            req_id,
            "YouTubeDisconnect",
            client
                .youtube_music_disconnect()
                .await
                .map(|message| ApiEvent::YouTubeDisconnected { req_id, message }),
        ),
    }
}
