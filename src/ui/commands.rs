//! One-shot subcommands. Each builds its own `ApiClient`, validates input
//! locally and prints a plain-text result.

use super::cli::{Command, SpotifyCommand, YtMusicCommand};
use crate::api::ApiClient;
use crate::api::ApiClientConfig;
use crate::api::models::ImportReq;
use crate::domain::account::NewAccount;
use crate::domain::browser_config;
use crate::domain::model::{Playlist, Song, SpotifyPlaylist, TransferJob, TransferProgress};
use crate::domain::spotify::{parse_callback, parse_playlist_ref};
use crate::domain::time::format_opt;
use crate::domain::transfer::{export_file_name, validate_destination_name};
use crate::error::{ApiError, AppError};
use crate::settings::AppSettings;
use std::path::PathBuf;

pub async fn run_command(
    cmd: Command,
    cfg: ApiClientConfig,
    settings: &AppSettings,
) -> Result<(), AppError> {
    let mut client = ApiClient::new(cfg)?;

    match cmd {
        Command::Tui => Err(AppError::Other("tui is not a one-shot command".to_owned())),
        Command::Login { username, password } => {
            let user = client.login(&username, &password).await?;
            println!("Logged in as {}", user.username);
            Ok(())
        }
        Command::Register {
            username,
            email,
            password,
            password_confirm,
        } => {
            let confirm = password_confirm.as_deref().unwrap_or(&password);
            let account = NewAccount::new(&username, &email, &password, confirm);
            account.validate().map_err(AppError::input)?;
            let user = client.register(&account).await?;
            println!("Account created, logged in as {}", user.username);
            Ok(())
        }
        Command::Logout => {
            client.logout().await?;
            println!("Logged out");
            Ok(())
        }
        Command::Playlists => {
            require_login(&client)?;
            let playlists = client.list_playlists().await?;
            if playlists.is_empty() {
                println!("No playlists imported yet");
            }
            for p in &playlists {
                println!("{}", playlist_row(p));
            }
            Ok(())
        }
        Command::Import {
            playlist,
            name,
            description,
        } => {
            let spotify_playlist_id = parse_playlist_ref(&playlist).map_err(AppError::input)?;
            require_login(&client)?;
            let imported = client
                .import_from_spotify(&ImportReq {
                    spotify_playlist_id,
                    name: non_blank(name),
                    description: non_blank(description),
                })
                .await?;
            println!("Imported {}", playlist_row(&imported));
            Ok(())
        }
        Command::Songs { playlist_id } => {
            require_login(&client)?;
            let songs = client.playlist_songs(playlist_id).await?;
            for (i, s) in songs.iter().enumerate() {
                println!("{}", song_row(i, s));
            }
            Ok(())
        }
        Command::ExportCsv {
            playlist_id,
            output,
        } => {
            require_login(&client)?;
            let path = match output {
                Some(p) => p,
                None => {
                    let playlist = client.get_playlist(playlist_id).await?;
                    export_dir(settings).join(export_file_name(&playlist.name))
                }
            };
            let csv = client.export_csv(playlist_id).await?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, csv).await?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Command::Transfer { playlist_id, name } => {
            let local_name = name.as_deref().map(validate_destination_name).transpose();
            let local_name = local_name.map_err(AppError::input)?;
            require_login(&client)?;
            let name = match local_name {
                Some(n) => n,
                None => {
                    let playlist = client.get_playlist(playlist_id).await?;
                    validate_destination_name(&playlist.name).map_err(AppError::input)?
                }
            };
            let job = client.start_transfer(playlist_id, &name).await?;
            println!("Started job #{}: {}", job.id, job_row(&job));
            Ok(())
        }
        Command::Progress { job_id } => {
            require_login(&client)?;
            let progress = client.transfer_progress(job_id).await?;
            println!("{}", progress_row(&progress));
            Ok(())
        }
        Command::Cancel { job_id } => {
            require_login(&client)?;
            let job = client.cancel_transfer(job_id).await?;
            println!("Job #{}: {}", job.id, job_row(&job));
            Ok(())
        }
        Command::History => {
            require_login(&client)?;
            let jobs = client.list_transfer_jobs().await?;
            if jobs.is_empty() {
                println!("No transfers yet");
            }
            for job in &jobs {
                println!("#{:<5} {}", job.id, job_row(job));
            }
            Ok(())
        }
        Command::Spotify(sub) => {
            if let SpotifyCommand::Callback { input } = &sub {
                // Checked before the login check so a typo never needs a round trip.
                parse_callback(input).map_err(AppError::input)?;
            }
            require_login(&client)?;
            run_spotify(&mut client, sub, settings).await
        }
        Command::Ytmusic(sub) => {
            let browser_data = match &sub {
                YtMusicCommand::Configure { file } => {
                    let raw = tokio::fs::read_to_string(file).await?;
                    Some(browser_config::validate(&raw).map_err(AppError::input)?)
                }
                _ => None,
            };
            require_login(&client)?;
            run_ytmusic(&mut client, sub, browser_data).await
        }
    }
}

async fn run_spotify(
    client: &mut ApiClient,
    sub: SpotifyCommand,
    settings: &AppSettings,
) -> Result<(), AppError> {
    match sub {
        SpotifyCommand::Status => {
            let s = client.spotify_status().await?;
            if !s.is_connected {
                println!("Spotify: not connected");
            } else {
                let who = s
                    .spotify_display_name
                    .or(s.spotify_user_id)
                    .unwrap_or_default();
                let note = if s.needs_reconnection {
                    " (needs reconnection)"
                } else {
                    ""
                };
                println!("Spotify: connected as {who}{note}");
            }
        }
        SpotifyCommand::Playlists => {
            let on_spotify = client.spotify_playlists().await?;
            if on_spotify.is_empty() {
                println!("No playlists on the linked Spotify account");
                return Ok(());
            }
            let imported = client.list_playlists().await?;
            for p in &on_spotify {
                println!("{}", spotify_playlist_row(p, p.is_imported(&imported)));
            }
        }
        SpotifyCommand::Url => {
            let url = client.spotify_auth_url().await?;
            println!("{url}");
            if settings.open_browser
                && let Err(e) = webbrowser::open(&url)
            {
                tracing::warn!(err = %e, "could not open browser");
            }
        }
        SpotifyCommand::Callback { input } => {
            let code = parse_callback(&input).map_err(AppError::input)?;
            let account = client.spotify_callback(&code).await?;
            println!("Spotify connected: {}", account.label());
        }
        SpotifyCommand::Disconnect => println!("{}", client.spotify_disconnect().await?),
    }
    Ok(())
}

async fn run_ytmusic(
    client: &mut ApiClient,
    sub: YtMusicCommand,
    browser_data: Option<serde_json::Value>,
) -> Result<(), AppError> {
    match (sub, browser_data) {
        (YtMusicCommand::Status, _) => {
            let s = client.youtube_music_status().await?;
            if s.is_configured {
                println!(
                    "YouTube Music: configured at {}",
                    format_opt(s.configured_at.as_deref())
                );
            } else {
                println!("YouTube Music: not configured");
            }
        }
        (YtMusicCommand::Configure { .. }, Some(data)) => {
            println!("{}", client.youtube_music_configure(&data).await?);
        }
        (YtMusicCommand::Configure { file }, None) => {
            return Err(AppError::Input(format!(
                "no browser data read from {}",
                file.display()
            )));
        }
        (YtMusicCommand::Test, _) => {
            let result = client.youtube_music_test_connection().await?;
            println!("{}", result.summary());
            if !result.success {
                return Err(AppError::Other("YouTube Music connection test failed".to_owned()));
            }
        }
        (YtMusicCommand::Disconnect, _) => {
            println!("{}", client.youtube_music_disconnect().await?);
        }
    }
    Ok(())
}

fn require_login(client: &ApiClient) -> Result<(), AppError> {
    if client.is_authenticated() {
        Ok(())
    } else {
        Err(ApiError::NotAuthenticated.into())
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

fn export_dir(settings: &AppSettings) -> PathBuf {
    settings
        .export_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
}

fn playlist_row(p: &Playlist) -> String {
    let mark = if p.is_transferred() {
        "  [on YouTube]"
    } else {
        ""
    };
    format!("#{:<5} {} ({} tracks){mark}", p.id, p.name, p.total_tracks)
}

fn spotify_playlist_row(p: &SpotifyPlaylist, imported: bool) -> String {
    let mut line = format!("{:<24} {} ({} tracks)", p.id, p.name, p.track_count);
    if let Some(owner) = p.owner.as_deref().filter(|o| !o.is_empty()) {
        line.push_str(&format!(" by {owner}"));
    }
    if imported {
        line.push_str("  [imported]");
    }
    line
}

fn song_row(i: usize, s: &Song) -> String {
    format!("{:>3}. {} - {} [{}]", i + 1, s.name, s.artist, s.duration_text())
}

fn job_row(job: &TransferJob) -> String {
    format!(
        "{} {}% {} -> {} ({}/{}, {} failed) {}",
        job.status.badge(),
        crate::domain::clamp_percentage(job.progress_percentage),
        job.playlist_name(),
        job.youtube_playlist_name,
        job.processed_songs,
        job.total_songs,
        job.failed_transfers,
        format_opt(job.created_at.as_deref()),
    )
}

fn progress_row(p: &TransferProgress) -> String {
    let mut line = format!(
        "Job #{}: {} {}% ({}/{} processed, {} ok, {} failed)",
        p.id,
        p.status.badge(),
        crate::domain::clamp_percentage(p.progress_percentage),
        p.processed_songs,
        p.total_songs,
        p.successful_transfers,
        p.failed_transfers
    );
    if !p.youtube_playlist_id.is_empty() {
        line.push_str(&format!(
            "\nhttps://music.youtube.com/playlist?list={}",
            p.youtube_playlist_id
        ));
    }
    line
}
