//! Low-level HTTP transport for the Dropbox API v2.
//!
//! Two calling conventions share only authentication and error
//! classification:
//! - **RPC**: `POST {api_base}{route}` with the input record as a JSON body;
//!   the raw success body is handed back for the resource wrapper to decode.
//! - **Content**: `POST {content_base}{route}` with the input record in the
//!   `Dropbox-API-Arg` header and, for uploads, the file bytes as an
//!   `application/octet-stream` body. The live response stream is returned.
//!
//! Any status ≥ 400 is drained and decoded into an [`ApiError`]. Nothing is
//! retried here; a `Retry-After` hint is recorded on the error for callers.

use crate::config::Config;
use crate::error::{ApiError, Error, Result};
use log::{debug, warn};
use reqwest::blocking::{Body, RequestBuilder, Response};
use reqwest::header::{HeaderMap, CONTENT_TYPE, RETRY_AFTER};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, Read};
use std::sync::Arc;

/// Request header carrying the JSON argument of a content call.
pub const API_ARG_HEADER: &str = "Dropbox-API-Arg";
/// Response header carrying the JSON result of a content call.
pub const API_RESULT_HEADER: &str = "Dropbox-API-Result";

/// Shared, stateless handle onto one Dropbox account.
///
/// Cloning is cheap; clones share the same [`Config`] and connection pool and
/// may be used from many threads at once.
#[derive(Clone, Debug)]
pub struct DropboxClient {
    config: Arc<Config>,
}

impl DropboxClient {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ── RPC endpoint (JSON in, JSON out) ────────────────────────────

    /// Call an RPC endpoint and return the raw success body.
    pub fn rpc_raw<I: Serialize + ?Sized>(&self, route: &str, input: &I) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.config.api_base, route);
        let body = serde_json::to_vec(input).map_err(|source| Error::Serialize {
            route: route.to_string(),
            source,
        })?;

        let request = self
            .authorized(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        let response = self.execute(route, request)?;
        Ok(response.bytes()?.to_vec())
    }

    /// Call an RPC endpoint and decode the JSON result into `O`.
    pub fn rpc<I, O>(&self, route: &str, input: &I) -> Result<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let raw = self.rpc_raw(route, input)?;
        decode_json(route, &raw)
    }

    /// Call an RPC endpoint that takes no argument (body is JSON `null`).
    pub fn rpc_no_arg<O: DeserializeOwned>(&self, route: &str) -> Result<O> {
        self.rpc(route, &())
    }

    // ── Content endpoint (header arg, raw body) ─────────────────────

    /// Call a content endpoint.
    ///
    /// `arg` travels in the `Dropbox-API-Arg` header. When `body` is given it
    /// is streamed as the request body (uploads). The caller owns the returned
    /// stream; dropping it releases the connection.
    pub fn content<I: Serialize + ?Sized>(
        &self,
        route: &str,
        arg: &I,
        body: Option<Body>,
    ) -> Result<ContentResponse> {
        let url = format!("{}{}", self.config.content_base, route);
        let arg = header_json(route, arg)?;

        let mut request = self.authorized(&url).header(API_ARG_HEADER, arg);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/octet-stream")
                .body(body);
        }

        let response = self.execute(route, request)?;
        Ok(ContentResponse::new(route, response))
    }

    // ── Shared plumbing ─────────────────────────────────────────────

    fn authorized(&self, url: &str) -> RequestBuilder {
        self.config
            .http
            .post(url)
            .bearer_auth(&self.config.access_token)
    }

    fn execute(&self, route: &str, request: RequestBuilder) -> Result<Response> {
        debug!("dropbox call {route}");
        let response = request.send()?;
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            debug!("dropbox call {route} failed with {status}");
            return Err(Error::Api(api_error(response)));
        }
        Ok(response)
    }
}

/// Drain a failed response and decode it. Reading the body is best effort: a
/// broken stream still produces an error carrying the status line.
fn api_error(response: Response) -> ApiError {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    let body = response.bytes().map(|b| b.to_vec()).unwrap_or_default();

    ApiError::decode(
        status.canonical_reason().unwrap_or_default(),
        status.as_u16(),
        &body,
    )
    .with_retry_after(retry_after)
}

pub(crate) fn decode_json<O: DeserializeOwned>(route: &str, raw: &[u8]) -> Result<O> {
    serde_json::from_slice(raw).map_err(|source| Error::Decode {
        route: route.to_string(),
        source,
    })
}

/// Serialise `arg` for the `Dropbox-API-Arg` header.
///
/// Header values must be ASCII, so every non-ASCII code point (and DEL) is
/// written as a JSON `\uXXXX` escape.
pub fn header_json<I: Serialize + ?Sized>(route: &str, arg: &I) -> Result<String> {
    let json = serde_json::to_string(arg).map_err(|source| Error::Serialize {
        route: route.to_string(),
        source,
    })?;
    Ok(escape_non_ascii(&json))
}

fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() && c != '\u{7f}' {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

/// Decode the `Dropbox-API-Result` header, if present.
///
/// A header that does not decode is logged and treated as absent.
pub fn api_result_from_headers<T: DeserializeOwned>(headers: &HeaderMap) -> Option<T> {
    let raw = headers.get(API_RESULT_HEADER)?.to_str().ok()?;
    parse_api_result(raw)
}

fn parse_api_result<T: DeserializeOwned>(raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("ignoring undecodable {API_RESULT_HEADER} header: {e}");
            None
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Content responses
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Live body of a successful content call.
///
/// Reads stream straight from the connection. Dropping the value releases the
/// connection whether or not the body was drained.
pub struct ContentResponse {
    route: String,
    response: Response,
    content_length: Option<u64>,
    api_result: Option<String>,
}

impl std::fmt::Debug for ContentResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentResponse")
            .field("route", &self.route)
            .field("content_length", &self.content_length)
            .field("api_result", &self.api_result)
            .finish()
    }
}

impl ContentResponse {
    fn new(route: &str, response: Response) -> Self {
        let content_length = response.content_length();
        let api_result = response
            .headers()
            .get(API_RESULT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            route: route.to_string(),
            response,
            content_length,
            api_result,
        }
    }

    /// Declared `Content-Length`, when the server sent one.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// The raw `Dropbox-API-Result` header.
    pub fn api_result_raw(&self) -> Option<&str> {
        self.api_result.as_deref()
    }

    /// The `Dropbox-API-Result` header decoded into `T`.
    pub fn api_result<T: DeserializeOwned>(&self) -> Option<T> {
        self.api_result.as_deref().and_then(parse_api_result)
    }

    /// Drain the body and decode it as JSON (upload results).
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        let raw = self.response.bytes()?;
        decode_json(&self.route, &raw)
    }

    /// Drain the body into memory.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        Ok(self.response.bytes()?.to_vec())
    }
}

impl Read for ContentResponse {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.response.read(buf)
    }
}
