//! Local checks on transfer and export inputs.

pub const MAX_DESTINATION_NAME: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DestinationNameError {
    #[error("the YouTube Music playlist name cannot be empty")]
    Empty,
    #[error("the YouTube Music playlist name is too long ({0} > {MAX_DESTINATION_NAME} characters)")]
    TooLong(usize),
}

/// Trimmed destination name, or why it would be rejected.
pub fn validate_destination_name(raw: &str) -> Result<String, DestinationNameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DestinationNameError::Empty);
    }
    let len = name.chars().count();
    if len > MAX_DESTINATION_NAME {
        return Err(DestinationNameError::TooLong(len));
    }
    Ok(name.to_owned())
}

/// `<sanitized name>_playlist.csv`, safe on every common filesystem.
pub fn export_file_name(playlist_name: &str) -> String {
    let mut stem: String = playlist_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    while stem.contains("__") {
        stem = stem.replace("__", "_");
    }
    let stem = stem.trim_matches(|c| c == '_' || c == '.');
    if stem.is_empty() {
        "playlist.csv".to_owned()
    } else {
        format!("{stem}_playlist.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_name_is_trimmed() {
        assert_eq!(
            validate_destination_name("  Road trip  ").as_deref(),
            Ok("Road trip")
        );
    }

    #[test]
    fn destination_name_limits() {
        assert_eq!(
            validate_destination_name("   "),
            Err(DestinationNameError::Empty)
        );
        let long = "x".repeat(MAX_DESTINATION_NAME + 1);
        assert_eq!(
            validate_destination_name(&long),
            Err(DestinationNameError::TooLong(MAX_DESTINATION_NAME + 1))
        );
        let exact = "é".repeat(MAX_DESTINATION_NAME);
        assert!(validate_destination_name(&exact).is_ok());
    }

    #[test]
    fn export_names_are_sanitized() {
        assert_eq!(export_file_name("Road trip / 2024"), "Road_trip_2024_playlist.csv");
        assert_eq!(export_file_name("Canciónes"), "Canciónes_playlist.csv");
        assert_eq!(export_file_name("///"), "playlist.csv");
        assert_eq!(export_file_name("../etc"), "etc_playlist.csv");
    }
}
