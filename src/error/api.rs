//! Backend API errors

/// Errors raised while talking to the transfer backend
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network or TLS failure
    #[error("network error: {0}")]
    Reqwest(reqwest::Error),

    /// Local session or export file failure
    #[error("IO error: {0}")]
    Io(std::io::Error),

    /// Response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Serde(serde_json::Error),

    /// Non-2xx answer; `message` comes from the error body when there is one
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 401: the stored token was rejected and has been cleared
    #[error("session expired, please log in again")]
    Unauthorized,

    /// No token stored yet
    #[error("not logged in")]
    NotAuthenticated,

    /// Rejected before sending
    #[error("invalid input: {0}")]
    BadInput(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Reqwest(err)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Io(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serde(err)
    }
}

impl ApiError {
    /// The caller has to log in again.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::NotAuthenticated)
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}
