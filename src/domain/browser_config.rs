//! YouTube Music `browser.json` checks.
//!
//! The backend authenticates against YouTube Music with request headers
//! copied from a logged-in browser session. We check the shape locally so an
//! obviously broken file never leaves the machine.

use serde_json::{Map, Value};

const REQUIRED_HEADERS: [&str; 2] = ["cookie", "user-agent"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrowserConfigError {
    #[error("browser data is empty")]
    Empty,
    #[error("browser data is not valid JSON: {0}")]
    Json(String),
    #[error("browser data must contain a \"headers\" object")]
    MissingHeaders,
    #[error("missing required headers: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),
}

/// Checks the shape and returns the payload to upload, with the required
/// headers renamed to the lowercase keys the backend looks up.
pub fn validate(raw: &str) -> Result<Value, BrowserConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(BrowserConfigError::Empty);
    }
    let mut parsed: Value =
        serde_json::from_str(raw).map_err(|e| BrowserConfigError::Json(e.to_string()))?;

    let headers = parsed
        .get_mut("headers")
        .and_then(Value::as_object_mut)
        .ok_or(BrowserConfigError::MissingHeaders)?;

    let mut normalized = Map::with_capacity(headers.len());
    for (key, value) in std::mem::take(headers) {
        normalized.insert(canonical_name(&key).map_or(key, str::to_owned), value);
    }

    let missing: Vec<&'static str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !normalized.contains_key(*required))
        .collect();
    if !missing.is_empty() {
        return Err(BrowserConfigError::MissingRequired(missing));
    }

    *headers = normalized;
    Ok(parsed)
}

fn canonical_name(key: &str) -> Option<&'static str> {
    let folded = key.to_ascii_lowercase().replace('_', "-");
    REQUIRED_HEADERS.iter().copied().find(|h| *h == folded)
}
