use chrono::{DateTime, Local, NaiveDateTime};

/// Formats a backend timestamp as local `YYYY-MM-DD HH:MM`.
///
/// Accepts RFC 3339 (what the API sends with time zones enabled) and naive
/// ISO-8601; anything else is returned untouched.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_owned()
}

pub fn format_opt(raw: Option<&str>) -> String {
    raw.map(format_timestamp).unwrap_or_else(|| "-".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_timestamps_keep_wall_clock() {
        assert_eq!(
            format_timestamp("2024-03-01T09:05:33.123456"),
            "2024-03-01 09:05"
        );
    }

    #[test]
    fn rfc3339_is_parsed() {
        let out = format_timestamp("2024-03-01T09:05:33.123456Z");
        assert_eq!(out.len(), "2024-03-01 09:05".len());
        assert!(out.starts_with("2024-0"));
    }

    #[test]
    fn garbage_passes_through() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_opt(None), "-");
    }
}
