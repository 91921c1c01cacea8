use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub spotify_id: String,
    #[serde(default)]
    pub youtube_video_id: String,
    #[serde(default)]
    pub duration_ms: Option<i64>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub spotify_url: Option<String>,
}

impl Song {
    /// `m:ss`, or `--:--` when the backend has no duration.
    pub fn duration_text(&self) -> String {
        match self.duration_ms {
            Some(ms) if ms > 0 => {
                let secs = ms / 1000;
                format!("{}:{:02}", secs / 60, secs % 60)
            }
            _ => "--:--".to_owned(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub id: i64,
    pub song: Song,
    pub position: i64,
    #[serde(default)]
    pub added_at: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    #[serde(default)]
    pub spotify_id: String,
    #[serde(default)]
    pub youtube_playlist_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_tracks: i64,
    #[serde(default)]
    pub spotify_url: Option<String>,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, rename = "user")]
    pub owner: Option<User>,
    /// Only filled by the detail endpoint.
    #[serde(default)]
    pub songs: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn is_transferred(&self) -> bool {
        self.youtube_playlist_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }
}

/// Lifecycle of a transfer job as reported by the backend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Partial,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SongTransferStatus {
    Success,
    #[default]
    Failed,
    NotFound,
    Duplicate,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongTransferResult {
    pub id: i64,
    #[serde(default)]
    pub song: Option<Song>,
    #[serde(default)]
    pub transfer_status: SongTransferStatus,
    #[serde(default)]
    pub youtube_video_id: Option<String>,
    #[serde(default)]
    pub youtube_title: Option<String>,
    #[serde(default)]
    pub youtube_artist: Option<String>,
    #[serde(default)]
    pub match_confidence: f64,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub processed_at: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferJob {
    pub id: i64,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub playlist: Option<Playlist>,
    #[serde(default)]
    pub status: TransferStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub youtube_playlist_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub youtube_playlist_name: String,
    #[serde(default)]
    pub total_songs: i64,
    #[serde(default)]
    pub processed_songs: i64,
    #[serde(default)]
    pub successful_transfers: i64,
    #[serde(default)]
    pub failed_transfers: i64,
    #[serde(default)]
    pub progress_percentage: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub error_message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
    #[serde(default)]
    pub song_results: Vec<SongTransferResult>,
}

impl TransferJob {
    pub fn playlist_name(&self) -> &str {
        self.playlist
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("(unknown playlist)")
    }

    pub fn youtube_url(&self) -> Option<String> {
        if self.youtube_playlist_id.is_empty() {
            return None;
        }
        Some(format!(
            "https://music.youtube.com/playlist?list={}",
            self.youtube_playlist_id
        ))
    }

    /// Overwrites the counters with a fresher `/progress/` read.
    pub fn apply_progress(&mut self, progress: &TransferProgress) {
        if progress.id != self.id {
            return;
        }
        self.status = progress.status;
        self.progress_percentage = progress.progress_percentage;
        self.processed_songs = progress.processed_songs;
        self.total_songs = progress.total_songs;
        self.successful_transfers = progress.successful_transfers;
        self.failed_transfers = progress.failed_transfers;
        if !progress.youtube_playlist_id.is_empty() {
            self.youtube_playlist_id = progress.youtube_playlist_id.clone();
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferProgress {
    pub id: i64,
    #[serde(default)]
    pub status: TransferStatus,
    #[serde(default)]
    pub progress_percentage: i64,
    #[serde(default)]
    pub processed_songs: i64,
    #[serde(default)]
    pub total_songs: i64,
    #[serde(default)]
    pub successful_transfers: i64,
    #[serde(default)]
    pub failed_transfers: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub youtube_playlist_id: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyStatus {
    #[serde(default)]
    pub is_connected: bool,
    #[serde(default)]
    pub spotify_user_id: Option<String>,
    #[serde(default)]
    pub spotify_display_name: Option<String>,
    #[serde(default = "default_true")]
    pub token_valid: bool,
    #[serde(default)]
    pub needs_reconnection: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyAccount {
    pub spotify_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub premium: bool,
}

impl SpotifyAccount {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.spotify_id)
    }
}

/// A playlist on the linked Spotify account, not yet necessarily imported.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub track_count: i64,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    #[serde(default)]
    pub owner: Option<String>,
}

impl SpotifyPlaylist {
    /// Already imported when one of `imported` carries this Spotify id.
    pub fn is_imported(&self, imported: &[Playlist]) -> bool {
        imported.iter().any(|p| p.spotify_id == self.id)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouTubeMusicStatus {
    #[serde(default)]
    pub is_configured: bool,
    #[serde(default)]
    pub configured_at: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTest {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ConnectionTest {
    pub fn summary(&self) -> String {
        match (self.success, &self.message, &self.error) {
            (true, Some(m), _) => m.clone(),
            (true, None, _) => "YouTube Music connection OK".to_owned(),
            (false, _, Some(e)) => e.clone(),
            (false, Some(m), None) => m.clone(),
            (false, None, None) => "YouTube Music connection failed".to_owned(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn null_as_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}
