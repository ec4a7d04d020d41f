//! Preconfigured HTTP client for one upstream geo API.
//!
//! Every server owns a single [`ApiClient`] built at startup. It knows the
//! upstream base URL and how to authenticate, and issues exactly one GET per
//! call with no retries.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// How requests to the upstream API are authenticated.
#[derive(Debug, Clone)]
pub enum ApiAuth {
    /// API key sent as a query parameter (Google Maps Platform style).
    QueryKey { name: &'static str, value: String },
    /// Fixed headers sent with every request (RapidAPI style).
    Headers(HeaderMap),
}

impl ApiAuth {
    pub fn query_key(name: &'static str, value: impl Into<String>) -> Self {
        ApiAuth::QueryKey {
            name,
            value: value.into(),
        }
    }

    /// Header auth from `(name, value)` pairs.
    pub fn headers<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, UpstreamError> {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| UpstreamError::InvalidHeader(e.to_string()))?;
            let mut value =
                HeaderValue::from_str(value).map_err(|e| UpstreamError::InvalidHeader(e.to_string()))?;
            value.set_sensitive(true);
            map.insert(name, value);
        }
        Ok(ApiAuth::Headers(map))
    }
}

/// Failure talking to the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-2xx status.
    #[error("{}", status_message(.status, .message))]
    Status {
        status: StatusCode,
        /// Message extracted from the upstream error body, if any.
        message: Option<String>,
    },

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    /// The URL is stripped before wrapping since it can carry the API key.
    #[error(transparent)]
    Transport(reqwest::Error),

    #[error("invalid auth header: {0}")]
    InvalidHeader(String),
}

impl UpstreamError {
    fn transport(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.without_url())
    }
}

fn status_message(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Request failed with status code {}", status.as_u16()),
    }
}

/// Pull a human-readable message out of an upstream error body.
///
/// Google APIs use `error_message`, RapidAPI uses `message`, and some
/// gateways nest it under `error.message`.
pub fn extract_error_message(body: &Value) -> Option<String> {
    body.get("error_message")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .or_else(|| body.pointer("/error/message").and_then(Value::as_str))
        .map(str::to_string)
}

/// HTTP client bound to one upstream base URL and auth scheme.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: ApiAuth,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: ApiAuth) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent(user_agent())
            .build()
            .map_err(UpstreamError::transport)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            auth,
        })
    }

    /// GET `base_url + path` with `params` as the query string.
    ///
    /// A 2xx body that is not JSON is returned as a JSON string.
    pub async fn get_json<P>(&self, path: &str, params: &P) -> Result<Value, UpstreamError>
    where
        P: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        debug!(url = %url, "upstream GET");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(params);

        request = match &self.auth {
            ApiAuth::QueryKey { name, value } => request.query(&[(*name, value.as_str())]),
            ApiAuth::Headers(headers) => request.headers(headers.clone()),
        };

        let response = request.send().await.map_err(UpstreamError::transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(UpstreamError::transport)?;
        let body = serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        if !status.is_success() {
            let message = extract_error_message(&body);
            warn!(url = %url, status = status.as_u16(), message = ?message, "upstream request failed");
            return Err(UpstreamError::Status { status, message });
        }

        Ok(body)
    }
}

fn user_agent() -> String {
    format!(
        "geo-mcp/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/geo-mcp/geo-mcp"
    )
}
