use mockito::{Matcher, Server};
use playlist_transfer::api::ApiClient;
use playlist_transfer::api::ApiClientConfig;
use playlist_transfer::api::client::{Session, load_session, save_session};
use playlist_transfer::domain::account::NewAccount;
use playlist_transfer::domain::browser_config;
use playlist_transfer::domain::model::TransferStatus;
use playlist_transfer::error::ApiError;
use serde_json::json;
use std::path::Path;

fn client_for(url: &str, data_dir: &Path, token: Option<&str>) -> ApiClient {
    if let Some(token) = token {
        save_session(
            data_dir,
            &Session {
                token: Some(token.to_owned()),
                username: Some("ana".to_owned()),
            },
        )
        .expect("save session");
    }
    ApiClient::new(ApiClientConfig {
        base_url: format!("{url}/api"),
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    })
    .expect("client")
}

#[tokio::test]
async fn login_stores_token() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/api/auth/login/")
        .match_body(Matcher::Json(json!({ "username": "ana", "password": "pw" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"t0k","user":{"id":1,"username":"ana","email":""}}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), None);
    let user = client.login(" ana ", "pw").await.expect("login");

    m.assert_async().await;
    assert_eq!(user.username, "ana");
    assert!(client.is_authenticated());
    let stored = load_session(dir.path()).expect("load");
    assert_eq!(stored.token.as_deref(), Some("t0k"));
}

#[tokio::test]
async fn requests_carry_token_and_accept_pages() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/api/playlists/")
        .match_header("authorization", "Token abc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "count": 2, "next": null, "previous": null,
                "results": [
                    { "id": 1, "name": "Road trip", "total_tracks": 12 },
                    { "id": 2, "name": "Focus", "youtube_playlist_id": "PLx" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), Some("abc"));
    let playlists = client.list_playlists().await.expect("playlists");

    m.assert_async().await;
    assert_eq!(playlists.len(), 2);
    assert_eq!(playlists[0].total_tracks, 12);
    assert!(playlists[1].is_transferred());
}

#[tokio::test]
async fn unauthorized_clears_session_everywhere() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/transfer-jobs/")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"Invalid token."}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), Some("stale"));
    let err = client.list_transfer_jobs().await.expect_err("401");

    assert!(matches!(err, ApiError::Unauthorized));
    assert!(!client.is_authenticated());
    assert!(!load_session(dir.path()).expect("load").is_authenticated());
}

#[tokio::test]
async fn rejected_login_shows_server_message() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/api/auth/login/")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Credenciales inválidas"}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), None);
    let err = client.login("ana", "wrong").await.expect_err("401");

    m.assert_async().await;
    assert!(!matches!(err, ApiError::Unauthorized));
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.to_string(), "Credenciales inválidas");
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn login_does_not_send_a_stale_token() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/api/auth/login/")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Credenciales inválidas"}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), Some("stale"));
    let err = client.login("ana", "wrong").await.expect_err("401");

    m.assert_async().await;
    assert_eq!(err.to_string(), "Credenciales inválidas");
    assert!(!err.is_auth_error());
}

#[tokio::test]
async fn spotify_link_401_keeps_the_session() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/auth/spotify/playlists/")
        .match_header("authorization", "Token abc")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": "Tu sesión de Spotify ha expirado. Por favor, reconecta tu cuenta.",
                "requires_reconnection": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), Some("abc"));
    let err = client.spotify_playlists().await.expect_err("401");

    assert_eq!(err.status_code(), Some(401));
    assert!(!err.is_auth_error());
    assert!(err.to_string().starts_with("Tu sesión de Spotify ha expirado"));
    assert!(client.is_authenticated());
    assert!(load_session(dir.path()).expect("load").is_authenticated());
}

#[tokio::test]
async fn spotify_playlists_come_back_as_a_bare_array() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/api/auth/spotify/playlists/")
        .match_header("authorization", "Token abc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {
                    "id": "37i9dQZF1DXcBWIGoYBM5M", "name": "Today's Top Hits",
                    "description": "", "track_count": 50, "public": true,
                    "collaborative": false, "owner": "Spotify", "images": []
                },
                { "id": "5ABHKGoOzxkaa28ttQV9sE", "name": "Mine", "track_count": 3,
                  "public": null, "collaborative": true, "owner": null, "images": [] }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), Some("abc"));
    let playlists = client.spotify_playlists().await.expect("playlists");

    m.assert_async().await;
    assert_eq!(playlists.len(), 2);
    assert_eq!(playlists[0].track_count, 50);
    assert!(playlists[1].collaborative);
    assert!(playlists[1].owner.is_none());
}

#[tokio::test]
async fn register_logs_in_with_the_new_token() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/api/auth/register/")
        .match_body(Matcher::Json(json!({
            "username": "ana",
            "email": "ana@example.com",
            "password": "longenough",
            "password_confirm": "longenough"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "user": { "id": 5, "username": "ana", "email": "ana@example.com" },
                "token": "n3w",
                "message": "Usuario registrado exitosamente"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), None);
    let account = NewAccount::new(" ana ", "ana@example.com", "longenough", "longenough");
    let user = client.register(&account).await.expect("register");

    m.assert_async().await;
    assert_eq!(user.id, 5);
    assert_eq!(client.username(), Some("ana"));
    let stored = load_session(dir.path()).expect("load");
    assert_eq!(stored.token.as_deref(), Some("n3w"));
}

#[tokio::test]
async fn register_field_errors_are_readable() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/auth/register/")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"username":["A user with that username already exists."]}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), None);
    let account = NewAccount::new("ana", "", "longenough", "longenough");
    let err = client.register(&account).await.expect_err("400");

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(
        err.to_string(),
        "username: A user with that username already exists."
    );
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn register_mismatch_never_reaches_the_server() {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), None);

    let account = NewAccount::new("ana", "", "longenough", "different1");
    let err = client.register(&account).await.expect_err("bad input");
    assert!(matches!(err, ApiError::BadInput(ref m) if m.contains("do not match")));
}

#[tokio::test]
async fn browser_config_is_uploaded_with_lowercase_headers() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/api/auth/youtube-music/configure/")
        .match_body(Matcher::PartialJson(json!({
            "browser_data": {
                "headers": { "cookie": "SID=1", "user-agent": "Mozilla/5.0" }
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"YouTube Music configurado exitosamente"}"#)
        .create_async()
        .await;

    let raw = r#"{"headers": {"Cookie": "SID=1", "User-Agent": "Mozilla/5.0"}}"#;
    let browser_data = browser_config::validate(raw).expect("valid");

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), Some("abc"));
    let msg = client
        .youtube_music_configure(&browser_data)
        .await
        .expect("configure");

    m.assert_async().await;
    assert_eq!(msg, "YouTube Music configurado exitosamente");
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/transfer-jobs/start_transfer/")
        .match_body(Matcher::Json(json!({
            "playlist_id": 4,
            "youtube_playlist_name": "Road trip"
        })))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"There is already an active transfer for this playlist"}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), Some("abc"));
    let err = client
        .start_transfer(4, "Road trip")
        .await
        .expect_err("400");

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(
        err.to_string(),
        "There is already an active transfer for this playlist"
    );
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn start_transfer_returns_job() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/transfer-jobs/start_transfer/")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 9, "status": "pending", "youtube_playlist_id": null,
                "youtube_playlist_name": "Road trip", "total_songs": 12,
                "playlist": { "id": 4, "name": "Road trip" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), Some("abc"));
    let job = client.start_transfer(4, "Road trip").await.expect("job");

    assert_eq!(job.id, 9);
    assert_eq!(job.status, TransferStatus::Pending);
    assert!(job.youtube_url().is_none());
    assert_eq!(job.playlist_name(), "Road trip");
}

#[tokio::test]
async fn csv_export_strips_bom() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/playlists/4/export_csv/")
        .match_header("accept", "text/csv")
        .with_status(200)
        .with_header("content-type", "text/csv; charset=utf-8")
        .with_body("\u{feff}Name,Artist\nSong,Band\n")
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), Some("abc"));
    let csv = client.export_csv(4).await.expect("csv");

    assert!(csv.starts_with("Name,Artist"));
}

#[tokio::test]
async fn logout_clears_locally_even_if_server_fails() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/api/auth/logout/")
        .match_header("authorization", "Token abc")
        .with_status(500)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), Some("abc"));
    client.logout().await.expect("logout");

    m.assert_async().await;
    assert!(!client.is_authenticated());
    assert!(!load_session(dir.path()).expect("load").is_authenticated());
}

#[tokio::test]
async fn empty_credentials_never_reach_the_server() {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), None);

    let err = client.login("  ", "pw").await.expect_err("bad input");
    assert!(matches!(err, ApiError::BadInput(_)));
}

#[tokio::test]
async fn connection_test_reports_failure_body() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/auth/youtube-music/test-connection/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":false,"error":"Cookie expired"}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let mut client = client_for(&server.url(), dir.path(), Some("abc"));
    let result = client
        .youtube_music_test_connection()
        .await
        .expect("result");

    assert!(!result.success);
    assert_eq!(result.summary(), "Cookie expired");
}
