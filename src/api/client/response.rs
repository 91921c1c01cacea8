use serde_json::Value;

/// Picks the most useful human message out of an error body.
///
/// Order: `error`, `detail`, `message`, `non_field_errors[0]`, then the first
/// field error as `field: msg`. Falls back to a generic line with the code.
pub fn error_message(status: u16, body: &[u8]) -> String {
    let fallback = || format!("Request failed (HTTP {status})");
    let Ok(v) = serde_json::from_slice::<Value>(body) else {
        return fallback();
    };
    let Some(obj) = v.as_object() else {
        return first_text(&v).unwrap_or_else(fallback);
    };

    for key in ["error", "detail", "message"] {
        if let Some(msg) = obj.get(key).and_then(first_text) {
            return msg;
        }
    }
    if let Some(msg) = obj.get("non_field_errors").and_then(first_text) {
        return msg;
    }
    obj.iter()
        .find_map(|(field, v)| first_text(v).map(|msg| format!("{field}: {msg}")))
        .unwrap_or_else(fallback)
}

/// A 401 about the linked Spotify account rather than the session token.
pub fn is_account_link_error(body: &[u8]) -> bool {
    let Ok(Value::Object(obj)) = serde_json::from_slice::<Value>(body) else {
        return false;
    };
    ["requires_reconnection", "requires_connection"]
        .iter()
        .any(|k| obj.get(*k).and_then(Value::as_bool).unwrap_or(false))
}

fn first_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_error_field() {
        let body = br#"{"error": "Ya hay un trabajo activo", "detail": "x"}"#;
        assert_eq!(error_message(400, body), "Ya hay un trabajo activo");
    }

    #[test]
    fn uses_detail_then_message() {
        assert_eq!(
            error_message(404, br#"{"detail": "Not found."}"#),
            "Not found."
        );
        assert_eq!(error_message(400, br#"{"message": "nope"}"#), "nope");
    }

    #[test]
    fn serializer_errors() {
        assert_eq!(
            error_message(400, br#"{"non_field_errors": ["Passwords differ"]}"#),
            "Passwords differ"
        );
        assert_eq!(
            error_message(400, br#"{"youtube_playlist_name": ["This field is required."]}"#),
            "youtube_playlist_name: This field is required."
        );
    }

    #[test]
    fn spotify_link_errors_are_told_apart() {
        assert!(is_account_link_error(
            br#"{"error": "Spotify session expired", "requires_reconnection": true}"#
        ));
        assert!(is_account_link_error(br#"{"requires_connection": true}"#));
        assert!(!is_account_link_error(br#"{"detail": "Invalid token."}"#));
        assert!(!is_account_link_error(b"not json"));
    }

    #[test]
    fn falls_back_for_html_and_empty_bodies() {
        assert_eq!(
            error_message(502, b"<html>Bad gateway</html>"),
            "Request failed (HTTP 502)"
        );
        assert_eq!(error_message(500, b""), "Request failed (HTTP 500)");
        assert_eq!(error_message(500, br#"{"error": ""}"#), "Request failed (HTTP 500)");
    }
}
