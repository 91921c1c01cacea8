use url::Url;

const PLAYLIST_ID_LEN: usize = 22;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaylistRefError {
    #[error("enter a Spotify playlist link or id")]
    Empty,
    #[error("not a Spotify playlist link: {0}")]
    NotAPlaylist(String),
    #[error("invalid Spotify playlist id: {0}")]
    BadId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallbackError {
    #[error("paste the Spotify redirect URL or authorization code")]
    Empty,
    #[error("Spotify authorization was denied: {0}")]
    Denied(String),
    #[error("redirect URL has no authorization code")]
    MissingCode,
}

/// Extracts a playlist id from a share link, a `spotify:` URI or a bare id.
pub fn parse_playlist_ref(input: &str) -> Result<String, PlaylistRefError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PlaylistRefError::Empty);
    }

    if let Some(rest) = input.strip_prefix("spotify:") {
        let mut parts = rest.split(':');
        return match (parts.next(), parts.next(), parts.next()) {
            (Some("playlist"), Some(id), None) => check_id(id),
            _ => Err(PlaylistRefError::NotAPlaylist(input.to_owned())),
        };
    }

    if input.contains("://") || input.starts_with("open.spotify.com") {
        let with_scheme = if input.contains("://") {
            input.to_owned()
        } else {
            format!("https://{input}")
        };
        let url =
            Url::parse(&with_scheme).map_err(|_| PlaylistRefError::NotAPlaylist(input.to_owned()))?;
        if !matches!(url.scheme(), "http" | "https")
            || url.host_str() != Some("open.spotify.com")
        {
            return Err(PlaylistRefError::NotAPlaylist(input.to_owned()));
        }
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();
        // localized links look like /intl-es/playlist/<id>
        let segments = match segments.first() {
            Some(first) if first.starts_with("intl-") => &segments[1..],
            _ => &segments[..],
        };
        return match segments {
            ["playlist", id] => check_id(id),
            _ => Err(PlaylistRefError::NotAPlaylist(input.to_owned())),
        };
    }

    check_id(input)
}

fn check_id(id: &str) -> Result<String, PlaylistRefError> {
    if id.len() == PLAYLIST_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(id.to_owned())
    } else {
        Err(PlaylistRefError::BadId(id.to_owned()))
    }
}

/// Pulls the authorization code out of what the user pasted after the
/// Spotify consent screen: either the whole redirect URL or just the code.
pub fn parse_callback(input: &str) -> Result<String, CallbackError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CallbackError::Empty);
    }

    let Ok(url) = Url::parse(input) else {
        if input.contains(['?', '&', '=', ' ']) {
            return Err(CallbackError::MissingCode);
        }
        return Ok(input.to_owned());
    };

    let mut code = None;
    let mut error = None;
    let mut message = None;
    for (k, v) in url.query_pairs() {
        match k.as_ref() {
            "code" if !v.is_empty() => code = Some(v.into_owned()),
            "error" => error = Some(v.into_owned()),
            "message" => message = Some(v.into_owned()),
            _ => {}
        }
    }

    if let Some(err) = error {
        return Err(CallbackError::Denied(message.unwrap_or(err)));
    }
    code.ok_or(CallbackError::MissingCode)
}
