use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The only thing persisted between runs besides settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join("session.json")
}

pub fn load_session(data_dir: &Path) -> Result<Session, ApiError> {
    let p = session_path(data_dir);
    if !p.exists() {
        return Ok(Session::default());
    }
    let bytes = fs::read(p).map_err(ApiError::Io)?;
    serde_json::from_slice(&bytes).map_err(ApiError::Serde)
}

pub fn save_session(data_dir: &Path, session: &Session) -> Result<(), ApiError> {
    fs::create_dir_all(data_dir).map_err(ApiError::Io)?;
    let p = session_path(data_dir);
    let bytes = serde_json::to_vec_pretty(session).map_err(ApiError::Serde)?;
    fs::write(p, bytes).map_err(ApiError::Io)
}
