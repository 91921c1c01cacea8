use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Backend root, e.g. `https://transfer.example.com/api`
    #[serde(default)]
    pub api_base_url: Option<String>,

    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_http_connect_timeout_secs")]
    pub http_connect_timeout_secs: u64,

    /// Where CSV exports land; `None` means the current directory
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Open the Spotify consent page in the system browser
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            http_timeout_secs: 30,
            http_connect_timeout_secs: 10,
            export_dir: None,
            open_browser: true,
        }
    }
}

fn default_http_timeout_secs() -> u64 { 30 }
fn default_http_connect_timeout_secs() -> u64 { 10 }
fn default_open_browser() -> bool { true }

pub fn try_load_settings(data_dir: &Path) -> Result<Option<AppSettings>, SettingsError> {
    let p = settings_path(data_dir);
    let Ok(bytes) = fs::read(&p) else {
        return Ok(None);
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| SettingsError::Parse { source })
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings(data_dir: &Path) -> AppSettings {
    match try_load_settings(data_dir) {
        Ok(Some(s)) => s,
        Ok(None) => AppSettings::default(),
        Err(e) => {
            tracing::warn!(err = %e, "settings.json unreadable, using defaults");
            AppSettings::default()
        }
    }
}

pub fn save_settings(data_dir: &Path, s: &AppSettings) -> Result<(), SettingsError> {
    fs::create_dir_all(data_dir).map_err(|source| SettingsError::Save { source })?;
    let p = settings_path(data_dir);
    let tmp = p.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(s).map_err(|source| SettingsError::Parse { source })?;
    fs::write(&tmp, bytes).map_err(|source| SettingsError::Save { source })?;
    if let Err(e) = fs::rename(&tmp, &p) {
        let _ = fs::remove_file(&p);
        fs::rename(&tmp, &p).map_err(|_| SettingsError::Save { source: e })?;
    }
    Ok(())
}

pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}
