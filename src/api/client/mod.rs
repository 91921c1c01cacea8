mod config;
mod response;
mod session;

pub use config::{ApiClientConfig, DEFAULT_BASE_URL, default_data_dir};
pub use response::{error_message, is_account_link_error};
pub use session::{Session, load_session, save_session, session_path};

use crate::api::models::{
    AuthUrlResp, BrowserDataReq, ImportReq, Listing, LoginReq, LoginResp, MessageResp,
    RegisterReq, SpotifyCodeReq, SpotifyConnectResp, StartTransferReq,
};
use crate::domain::account::NewAccount;
use crate::domain::model::{
    ConnectionTest, Playlist, Song, SpotifyAccount, SpotifyPlaylist, SpotifyStatus, TransferJob,
    TransferProgress, User, YouTubeMusicStatus,
};
use crate::error::ApiError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

const UTF8_BOM: &str = "\u{feff}";

/// HTTP wrapper around the transfer backend.
///
/// Holds the session token; a 401 that rejects the token wipes it both in
/// memory and on disk before the error is returned.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    pub cfg: ApiClientConfig,
    pub session: Session,
}

impl ApiClient {
    pub fn new(cfg: ApiClientConfig) -> Result<Self, ApiError> {
        std::fs::create_dir_all(&cfg.data_dir).map_err(ApiError::Io)?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("playlist-transfer/", env!("CARGO_PKG_VERSION")))
            .timeout(cfg.timeout)
            .connect_timeout(cfg.connect_timeout)
            .build()
            .map_err(ApiError::Reqwest)?;

        let session = match load_session(&cfg.data_dir) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(err = %e, "session.json unreadable, starting logged out");
                Session::default()
            }
        };

        Ok(Self { http, cfg, session })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.username.as_deref()
    }

    fn save_session(&self) -> Result<(), ApiError> {
        save_session(&self.cfg.data_dir, &self.session)
    }

    /// Forgets the token locally without telling the server.
    pub fn clear_session(&mut self) -> Result<(), ApiError> {
        self.session = Session::default();
        self.save_session()
    }

    // ========== Auth ==========

    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, ApiError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ApiError::BadInput(
                "username and password are required".to_owned(),
            ));
        }
        let req = self.public_request(Method::POST, "/auth/login/").json(&LoginReq {
            username: username.trim(),
            password,
        });
        let resp: LoginResp = decode(&self.send(req).await?)?;
        let user = self.start_session(resp)?;
        tracing::info!(username = %user.username, "logged in");
        Ok(user)
    }

    /// Creates the account and logs straight into it.
    pub async fn register(&mut self, account: &NewAccount) -> Result<User, ApiError> {
        account
            .validate()
            .map_err(|e| ApiError::BadInput(e.to_string()))?;
        let req = self
            .public_request(Method::POST, "/auth/register/")
            .json(&RegisterReq::from(account));
        let resp: LoginResp = decode(&self.send(req).await?)?;
        let user = self.start_session(resp)?;
        tracing::info!(username = %user.username, "account created");
        Ok(user)
    }

    fn start_session(&mut self, resp: LoginResp) -> Result<User, ApiError> {
        self.session = Session {
            token: Some(resp.token),
            username: Some(resp.user.username.clone()),
        };
        self.save_session()?;
        Ok(resp.user)
    }

    /// Server-side logout is best effort; the local token is always dropped.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        if self.is_authenticated() {
            let res: Result<MessageResp, ApiError> = self.post_empty("/auth/logout/").await;
            if let Err(e) = res {
                tracing::warn!(err = %e, "server logout failed, clearing local session anyway");
            }
        }
        self.clear_session()
    }

    // ========== Playlists ==========

    pub async fn list_playlists(&mut self) -> Result<Vec<Playlist>, ApiError> {
        let listing: Listing<Playlist> = self.get_json("/playlists/").await?;
        Ok(listing.into_vec())
    }

    pub async fn get_playlist(&mut self, id: i64) -> Result<Playlist, ApiError> {
        self.get_json(&format!("/playlists/{id}/")).await
    }

    pub async fn import_from_spotify(&mut self, req: &ImportReq) -> Result<Playlist, ApiError> {
        self.post_json("/playlists/import_from_spotify/", req).await
    }

    pub async fn playlist_songs(&mut self, id: i64) -> Result<Vec<Song>, ApiError> {
        let listing: Listing<Song> = self.get_json(&format!("/playlists/{id}/songs/")).await?;
        Ok(listing.into_vec())
    }

    /// CSV body with the Excel BOM stripped.
    pub async fn export_csv(&mut self, id: i64) -> Result<String, ApiError> {
        let req = self
            .request(Method::GET, &format!("/playlists/{id}/export_csv/"))?
            .header(ACCEPT, HeaderValue::from_static("text/csv"));
        let bytes = self.send(req).await?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(text.strip_prefix(UTF8_BOM).unwrap_or(&text).to_owned())
    }

    // ========== Transfer jobs ==========

    pub async fn list_transfer_jobs(&mut self) -> Result<Vec<TransferJob>, ApiError> {
        let listing: Listing<TransferJob> = self.get_json("/transfer-jobs/").await?;
        Ok(listing.into_vec())
    }

    pub async fn get_transfer_job(&mut self, id: i64) -> Result<TransferJob, ApiError> {
        self.get_json(&format!("/transfer-jobs/{id}/")).await
    }

    pub async fn start_transfer(
        &mut self,
        playlist_id: i64,
        youtube_playlist_name: &str,
    ) -> Result<TransferJob, ApiError> {
        self.post_json(
            "/transfer-jobs/start_transfer/",
            &StartTransferReq {
                playlist_id,
                youtube_playlist_name,
            },
        )
        .await
    }

    pub async fn transfer_progress(&mut self, id: i64) -> Result<TransferProgress, ApiError> {
        self.get_json(&format!("/transfer-jobs/{id}/progress/"))
            .await
    }

    pub async fn cancel_transfer(&mut self, id: i64) -> Result<TransferJob, ApiError> {
        self.post_empty(&format!("/transfer-jobs/{id}/cancel_transfer/"))
            .await
    }

    // ========== Spotify ==========

    pub async fn spotify_auth_url(&mut self) -> Result<String, ApiError> {
        let resp: AuthUrlResp = self.get_json("/auth/spotify/url/").await?;
        Ok(resp.auth_url)
    }

    pub async fn spotify_callback(&mut self, code: &str) -> Result<SpotifyAccount, ApiError> {
        let resp: SpotifyConnectResp = self
            .post_json("/auth/spotify/callback/", &SpotifyCodeReq { code })
            .await?;
        if let Some(msg) = resp.message.as_deref() {
            tracing::info!(spotify_id = %resp.user_info.spotify_id, "{msg}");
        }
        Ok(resp.user_info)
    }

    pub async fn spotify_disconnect(&mut self) -> Result<String, ApiError> {
        let resp: MessageResp = self.post_empty("/auth/spotify/disconnect/").await?;
        Ok(resp.or("Spotify disconnected"))
    }

    pub async fn spotify_status(&mut self) -> Result<SpotifyStatus, ApiError> {
        self.get_json("/auth/spotify/status/").await
    }

    /// Playlists on the linked Spotify account, for picking one to import.
    pub async fn spotify_playlists(&mut self) -> Result<Vec<SpotifyPlaylist>, ApiError> {
        let listing: Listing<SpotifyPlaylist> = self.get_json("/auth/spotify/playlists/").await?;
        Ok(listing.into_vec())
    }

    // ========== YouTube Music ==========

    pub async fn youtube_music_status(&mut self) -> Result<YouTubeMusicStatus, ApiError> {
        self.get_json("/auth/youtube-music/status/").await
    }

    /// `browser_data` must already have passed `domain::browser_config::validate`.
    pub async fn youtube_music_configure(
        &mut self,
        browser_data: &serde_json::Value,
    ) -> Result<String, ApiError> {
        let resp: MessageResp = self
            .post_json(
                "/auth/youtube-music/configure/",
                &BrowserDataReq { browser_data },
            )
            .await?;
        Ok(resp.or("YouTube Music configured"))
    }

    pub async fn youtube_music_test_connection(&mut self) -> Result<ConnectionTest, ApiError> {
        self.post_empty("/auth/youtube-music/test-connection/")
            .await
    }

    pub async fn youtube_music_disconnect(&mut self) -> Result<String, ApiError> {
        let resp: MessageResp = self.post_empty("/auth/youtube-music/disconnect/").await?;
        Ok(resp.or("YouTube Music disconnected"))
    }

    // ========== Request plumbing ==========

    /// No `Authorization` header, so a stale token cannot fail the call.
    fn public_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.cfg.url(path))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let mut req = self.public_request(method, path);
        if let Some(token) = self.session.token.as_deref().filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("Token {token}"))
                .map_err(|e| ApiError::BadInput(format!("stored token is not a valid header: {e}")))?;
            req = req.header(AUTHORIZATION, value);
        }
        Ok(req)
    }

    async fn get_json<T: DeserializeOwned>(&mut self, path: &str) -> Result<T, ApiError> {
        let req = self.request(Method::GET, path)?;
        decode(&self.send(req).await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &mut self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.request(Method::POST, path)?.json(body);
        decode(&self.send(req).await?)
    }

    async fn post_empty<T: DeserializeOwned + Default>(&mut self, path: &str) -> Result<T, ApiError> {
        let req = self
            .request(Method::POST, path)?
            .json(&serde_json::json!({}));
        let bytes = self.send(req).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        decode(&bytes)
    }

    async fn send(&mut self, req: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let req = req.build().map_err(ApiError::Reqwest)?;
        let token_sent = req.headers().contains_key(AUTHORIZATION);
        let resp = self.http.execute(req).await.map_err(ApiError::Reqwest)?;
        let status = resp.status();
        let url = resp.url().to_string();
        let bytes = resp.bytes().await.map_err(ApiError::Reqwest)?;

        // Bad credentials on login and a stale Spotify link also answer 401;
        // only a rejected token ends the session.
        if status == StatusCode::UNAUTHORIZED && token_sent && !is_account_link_error(&bytes) {
            tracing::warn!(url = %url, "401 from backend, clearing stored token");
            self.clear_session()?;
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = error_message(status.as_u16(), &bytes);
            tracing::warn!(url = %url, status = status.as_u16(), %message, "request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(url = %url, status = status.as_u16(), len = bytes.len(), "request ok");
        Ok(bytes.to_vec())
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(ApiError::Serde)
}
