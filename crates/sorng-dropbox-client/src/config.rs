//! Client configuration: access token plus HTTP transport settings.
//!
//! A [`Config`] is an explicit value handed to every resource client. There is
//! no process-wide default client; two configs never share state unless the
//! caller passes the same `reqwest` client to both.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Base URL for RPC-style endpoints (JSON in, JSON out).
pub const API_BASE: &str = "https://api.dropboxapi.com/2";
/// Base URL for content endpoints (upload / download / thumbnails).
pub const CONTENT_BASE: &str = "https://content.dropboxapi.com/2";

/// Environment variable read by [`Config::from_env`].
pub const ACCESS_TOKEN_ENV: &str = "DROPBOX_ACCESS_TOKEN";

/// Request timeout used when the caller does not supply a client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Credentials and transport settings shared by every resource client.
#[derive(Clone)]
pub struct Config {
    pub(crate) access_token: String,
    pub(crate) http: Client,
    pub(crate) api_base: String,
    pub(crate) content_base: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base", &self.api_base)
            .field("content_base", &self.content_base)
            .field("token_preview", &self.masked_token())
            .finish()
    }
}

impl Config {
    /// Config with a fresh HTTP client and the default timeout.
    pub fn new(access_token: &str) -> Result<Self> {
        Self::with_timeout(access_token, DEFAULT_TIMEOUT)
    }

    /// Config with a fresh HTTP client using `timeout` for every request.
    pub fn with_timeout(access_token: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_http_client(access_token, http)
    }

    /// Config around a caller-built client (proxies, custom TLS, pooling).
    pub fn with_http_client(access_token: &str, http: Client) -> Result<Self> {
        if access_token.trim().is_empty() {
            return Err(Error::Config("Dropbox access token must not be empty".into()));
        }
        Ok(Self {
            access_token: access_token.to_string(),
            http,
            api_base: API_BASE.to_string(),
            content_base: CONTENT_BASE.to_string(),
        })
    }

    /// Config from the `DROPBOX_ACCESS_TOKEN` environment variable.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(ACCESS_TOKEN_ENV)
            .map_err(|_| Error::Config(format!("{ACCESS_TOKEN_ENV} is not set")))?;
        Self::new(&token)
    }

    /// Override both base URLs (mock servers, proxies).
    pub fn with_bases(mut self, api: &str, content: &str) -> Self {
        self.api_base = api.trim_end_matches('/').to_string();
        self.content_base = content.trim_end_matches('/').to_string();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn content_base(&self) -> &str {
        &self.content_base
    }

    /// Show a masked version of the token for logging.
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.access_token.chars().collect();
        if chars.len() <= 8 {
            "****".into()
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}…{tail}")
        }
    }
}
