//! Application-level errors

use super::ApiError;

/// Top-level error returned from `main` and the CLI commands
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("{0}")]
    Api(#[from] ApiError),

    /// Local validation failed before any request was made
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to save settings: {source}")]
    Save {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

impl AppError {
    pub fn input(err: impl std::fmt::Display) -> Self {
        AppError::Input(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_passes_message_through() {
        let err: AppError = ApiError::Unauthorized.into();
        assert_eq!(err.to_string(), "session expired, please log in again");
    }

    #[test]
    fn settings_parse_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err = SettingsError::Parse { source: parse_err };
        assert!(err.to_string().contains("failed to parse settings"));
    }

    #[test]
    fn error_chain_is_kept() {
        use std::error::Error;
        let err = AppError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "test"));
        assert!(err.source().is_some());
    }
}
