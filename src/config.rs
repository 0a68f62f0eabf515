//! Runtime settings and OAuth credentials

use crate::error::{Error, Result};
use crate::gmail::{DEFAULT_API_URL, DEFAULT_TOKEN_URI, refresh_access_token};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials.json";
pub const DEFAULT_NUM_EMAILS: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub credentials_path: PathBuf,
    /// Used as-is when set, skipping the credentials file
    pub access_token: Option<String>,
    pub num_emails: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

impl AppConfig {
    /// Build from any key lookup; `Default` reads the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("MAIL_METRICS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let credentials_path = lookup("MAIL_METRICS_CREDENTIALS")
            .map_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_PATH), PathBuf::from);
        let access_token = lookup("MAIL_METRICS_ACCESS_TOKEN").filter(|t| !t.trim().is_empty());
        let num_emails = match lookup("MAIL_METRICS_NUM_EMAILS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid MAIL_METRICS_NUM_EMAILS={raw}");
                DEFAULT_NUM_EMAILS
            }),
            None => DEFAULT_NUM_EMAILS,
        };

        Self {
            api_url,
            credentials_path,
            access_token,
            num_emails,
        }
    }

    /// Access token from config, or resolved from the credentials file
    pub fn resolve_access_token(&self) -> Result<String> {
        if let Some(token) = &self.access_token {
            debug!("Using access token from configuration");
            return Ok(token.clone());
        }
        Credentials::load(&self.credentials_path)?.access_token(Utc::now())
    }
}

/// Google "authorized user" credentials file
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_uri: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Credentials(format!("{}: {e}", path.display())))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| Error::Credentials(e.to_string()))
    }

    /// Stored token with no expiry, or one expiring after `now`
    #[must_use]
    pub fn valid_token(&self, now: DateTime<Utc>) -> Option<&str> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        match self.expiry {
            Some(expiry) if expiry <= now => None,
            _ => Some(token),
        }
    }

    /// Use the stored token while valid, otherwise refresh it
    pub fn access_token(&self, now: DateTime<Utc>) -> Result<String> {
        if let Some(token) = self.valid_token(now) {
            return Ok(token.to_string());
        }

        let (Some(refresh_token), Some(client_id), Some(client_secret)) = (
            self.refresh_token.as_deref(),
            self.client_id.as_deref(),
            self.client_secret.as_deref(),
        ) else {
            return Err(Error::Credentials(
                "token expired or missing and no refresh_token, client_id and client_secret to renew it"
                    .into(),
            ));
        };

        let token_uri = self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI);
        refresh_access_token(token_uri, client_id, client_secret, refresh_token)
    }
}
