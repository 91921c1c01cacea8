use crate::settings::AppSettings;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub data_dir: PathBuf,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            data_dir: default_data_dir(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ApiClientConfig {
    /// Fills in whatever the settings file provides; explicit overrides are
    /// applied by the caller afterwards.
    pub fn with_settings(mut self, settings: &AppSettings) -> Self {
        if let Some(url) = settings
            .api_base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
        {
            self.base_url = url.trim().to_owned();
        }
        self.timeout = Duration::from_secs(settings.http_timeout_secs.max(1));
        self.connect_timeout = Duration::from_secs(settings.http_connect_timeout_secs.max(1));
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("dev", "playlist-transfer", "playlist-transfer")
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("playlist-transfer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let cfg = ApiClientConfig {
            base_url: "http://h:8000/api/".to_owned(),
            ..Default::default()
        };
        assert_eq!(cfg.url("/playlists/"), "http://h:8000/api/playlists/");
        assert_eq!(cfg.url("auth/spotify/url/"), "http://h:8000/api/auth/spotify/url/");
    }

    #[test]
    fn settings_override_defaults() {
        let settings = AppSettings {
            api_base_url: Some(" https://transfer.example.com/api ".to_owned()),
            http_timeout_secs: 5,
            http_connect_timeout_secs: 0,
            ..Default::default()
        };
        let cfg = ApiClientConfig::default().with_settings(&settings);
        assert_eq!(cfg.base_url, "https://transfer.example.com/api");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.connect_timeout, Duration::from_secs(1));
    }

    #[test]
    fn blank_settings_url_is_ignored() {
        let settings = AppSettings {
            api_base_url: Some("  ".to_owned()),
            ..Default::default()
        };
        let cfg = ApiClientConfig::default().with_settings(&settings);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }
}
