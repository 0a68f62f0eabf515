//! Gmail REST API mail source

use crate::error::{Error, Result};
use crate::parser::lossy_utf8;
use crate::source::MailSource;
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://gmail.googleapis.com";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

/// Gmail sends base64url, with or without padding
const RAW_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ListMessagesResponse {
    messages: Option<Vec<MessageRef>>,
}

#[derive(Debug, Deserialize)]
struct RawMessageResponse {
    raw: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reads the signed-in user's mailbox with a bearer token
#[derive(Debug, Clone)]
pub struct GmailSource {
    client: Client,
    base_url: String,
    access_token: String,
}

impl GmailSource {
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_API_URL, access_token)
    }

    /// Point at another API host, e.g. a local mock server
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/gmail/v1/users/me/messages", self.base_url)
    }
}

impl MailSource for GmailSource {
    fn list_recent_message_ids(&self, limit: u32) -> Result<Vec<String>> {
        let request = self
            .client
            .get(self.messages_url())
            .bearer_auth(&self.access_token)
            .query(&[("maxResults", limit.to_string()), ("labelIds", "INBOX".to_string())]);

        let list: ListMessagesResponse = send_json(request, "Message list")?;
        let ids: Vec<String> = list
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.id)
            .collect();

        debug!(count = ids.len(), limit, "Listed inbox messages");
        Ok(ids)
    }

    fn fetch_raw_message(&self, id: &str) -> Result<String> {
        let request = self
            .client
            .get(format!("{}/{id}", self.messages_url()))
            .bearer_auth(&self.access_token)
            .query(&[("format", "raw")]);

        let message: RawMessageResponse = send_json(request, "Message fetch")?;
        let raw = message.raw.ok_or_else(|| Error::Decode {
            id: id.to_string(),
            details: "response has no raw field".into(),
        })?;

        decode_raw(&raw).map_err(|e| Error::Decode {
            id: id.to_string(),
            details: e.to_string(),
        })
    }
}

/// Decode a base64url `raw` payload, dropping invalid UTF-8
pub fn decode_raw(raw: &str) -> std::result::Result<String, base64::DecodeError> {
    let bytes = RAW_ENGINE.decode(raw.trim())?;
    Ok(lossy_utf8(&bytes))
}

/// Exchange a refresh token for a fresh access token
pub fn refresh_access_token(
    token_uri: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<String> {
    let request = Client::new().post(token_uri).form(&[
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("refresh_token", refresh_token),
        ("grant_type", "refresh_token"),
    ]);

    let token: TokenResponse = send_json(request, "Token refresh")?;
    debug!("Refreshed access token");
    Ok(token.access_token)
}

fn send_json<T: DeserializeOwned>(request: RequestBuilder, context: &str) -> Result<T> {
    let res = request.send()?;
    let status = res.status();
    let text = res.text().unwrap_or_default();
    if !status.is_success() {
        return Err(Error::Status {
            context: context.to_string(),
            status: status.as_u16(),
            body: text,
        });
    }
    Ok(serde_json::from_str(&text)?)
}
