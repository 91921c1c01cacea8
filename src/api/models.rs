//! Request bodies and response envelopes that never reach the UI.

use crate::domain::account::NewAccount;
use crate::domain::model::{SpotifyAccount, User};
use serde::{Deserialize, Serialize};

/// List endpoints answer either with a bare array or a DRF page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Plain(v) => v,
            Listing::Paged { results } => results,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginReq<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterReq<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirm: &'a str,
}

impl<'a> From<&'a NewAccount> for RegisterReq<'a> {
    fn from(acc: &'a NewAccount) -> Self {
        Self {
            username: &acc.username,
            email: &acc.email,
            password: &acc.password,
            password_confirm: &acc.password_confirm,
        }
    }
}

/// Answer to both login and register; register also sends a `message`.
#[derive(Debug, Deserialize)]
pub struct LoginResp {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportReq {
    pub spotify_playlist_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartTransferReq<'a> {
    pub playlist_id: i64,
    pub youtube_playlist_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SpotifyCodeReq<'a> {
    pub code: &'a str,
}

#[derive(Debug, Serialize)]
pub struct BrowserDataReq<'a> {
    pub browser_data: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct AuthUrlResp {
    pub auth_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SpotifyConnectResp {
    #[serde(default)]
    pub message: Option<String>,
    pub user_info: SpotifyAccount,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessageResp {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResp {
    pub fn or(self, fallback: &str) -> String {
        self.message.unwrap_or_else(|| fallback.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_accepts_both_shapes() {
        let plain: Listing<i64> = serde_json::from_value(json!([1, 2])).expect("plain");
        assert_eq!(plain.into_vec(), vec![1, 2]);

        let paged: Listing<i64> = serde_json::from_value(json!({
            "count": 3, "next": null, "previous": null, "results": [1, 2, 3]
        }))
        .expect("paged");
        assert_eq!(paged.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn import_req_skips_absent_fields() {
        let req = ImportReq {
            spotify_playlist_id: "abc".to_owned(),
            name: None,
            description: None,
        };
        assert_eq!(
            serde_json::to_value(&req).expect("json"),
            json!({ "spotify_playlist_id": "abc" })
        );
    }
}
