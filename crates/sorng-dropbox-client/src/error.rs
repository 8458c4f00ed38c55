//! Error types for the Dropbox client.
//!
//! Every failure is surfaced to the immediate caller; nothing in this crate
//! retries. Remote failures (HTTP status ≥ 400) become [`ApiError`], which
//! keeps the machine-readable `error_summary` the API returns so callers can
//! distinguish e.g. `path/not_found/..` from `path/conflict/..`.

use serde::Deserialize;
use thiserror::Error;

/// The crate's top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Building or sending the request failed, or the connection broke
    /// while reading the response.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request record could not be serialised to JSON.
    #[error("failed to serialise request for {route}: {source}")]
    Serialize {
        route: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with a status ≥ 400.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A success response did not match the expected output shape.
    #[error("failed to decode response from {route}: {source}")]
    Decode {
        route: String,
        #[source]
        source: serde_json::Error,
    },

    /// The operation is not supported by this handle.
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    /// A bounded directory read found no further entries.
    #[error("no more directory entries")]
    EndOfData,

    /// Local I/O failed (reading a file to hash or upload).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// The API error, if this failure came from the remote side.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_end_of_data(&self) -> bool {
        matches!(self, Error::EndOfData)
    }
}

/// A specialised `Result` for Dropbox operations.
pub type Result<T> = std::result::Result<T, Error>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  API errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A non-success response from the Dropbox API.
///
/// `summary` is the `error_summary` field of the JSON error envelope when the
/// body carried one, otherwise the raw status line (`"409 Conflict"`).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{summary}")]
pub struct ApiError {
    /// Reason phrase, e.g. `Conflict`.
    pub status: String,
    pub status_code: u16,
    pub summary: String,
    /// Structured `error` union from the envelope, when present.
    pub error: Option<serde_json::Value>,
    /// Localised `user_message.text`, when present.
    pub user_message: Option<String>,
    /// Seconds from a `Retry-After` header (429 / 503). Informational only.
    pub retry_after: Option<u64>,
}

/// Dropbox API v2 error envelope.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error_summary: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    user_message: Option<UserMessage>,
}

#[derive(Debug, Deserialize)]
struct UserMessage {
    #[serde(default)]
    text: Option<String>,
}

impl ApiError {
    /// Build an error from a failed response.
    ///
    /// Never fails: a body that is not a JSON envelope (or has no
    /// `error_summary`) degrades to the raw status line as the summary.
    pub fn decode(status: &str, status_code: u16, body: &[u8]) -> Self {
        let status_line = format!("{status_code} {status}").trim_end().to_string();
        let envelope = serde_json::from_slice::<ErrorEnvelope>(body).ok();

        let (summary, error, user_message) = match envelope {
            Some(env) => (
                env.error_summary.unwrap_or(status_line),
                env.error,
                env.user_message.and_then(|m| m.text),
            ),
            None => (status_line, None, None),
        };

        Self {
            status: status.to_string(),
            status_code,
            summary,
            error,
            user_message,
            retry_after: None,
        }
    }

    pub fn with_retry_after(mut self, seconds: Option<u64>) -> Self {
        self.retry_after = seconds;
        self
    }

    /// The `.tag` of the top-level `error` union, e.g. `path`.
    pub fn tag(&self) -> Option<&str> {
        self.error.as_ref()?.get(".tag")?.as_str()
    }

    /// True when the summary names a `not_found` lookup failure.
    pub fn is_not_found(&self) -> bool {
        self.summary.contains("not_found")
    }

    /// True when the path exists but names a folder, not a file.
    pub fn is_not_file(&self) -> bool {
        self.summary.starts_with("path/not_file")
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status_code == 429
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Partial directory reads
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A directory read that stopped early.
///
/// `entries` holds everything collected before `error` occurred. For a
/// bounded read that ran out of entries, `error` is [`Error::EndOfData`].
#[derive(Debug, Error)]
#[error("{error} (after {} entries)", .entries.len())]
pub struct ReadDirError<T: std::fmt::Debug> {
    pub entries: Vec<T>,
    #[source]
    pub error: Error,
}

impl<T: std::fmt::Debug> ReadDirError<T> {
    pub fn is_end_of_data(&self) -> bool {
        self.error.is_end_of_data()
    }

    pub fn into_parts(self) -> (Vec<T>, Error) {
        (self.entries, self.error)
    }
}
