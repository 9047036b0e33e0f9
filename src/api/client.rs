//! Sequenced request handling for the MEGA API.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::http::HttpClient;

use super::error::request_error;

/// Production API host.
const API_BASE_URL: &str = "https://g.api.mega.co.nz";

/// Issues sequenced JSON calls to the MEGA API endpoint.
///
/// Each call serializes an ordered list of command objects to a JSON
/// array and POSTs it once, with an `id` query parameter taken from the
/// sequence counter (incremented after every call) and the current `sid`
/// when a session is active. One call, one POST: the server's "try
/// again" code is surfaced like any other error and retrying is left to
/// the caller.
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    sequence_num: u32,
    sid: Option<String>,
}

impl ApiClient {
    /// Create a client pointing at the production API.
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client pointing at a different host. Used for testing
    /// against a mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            sequence_num: rand::random(),
            sid: None,
        }
    }

    /// Create a client that routes through a proxy.
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_proxy(proxy)?,
            ..Self::new()
        })
    }

    /// Current session id, absent until a login succeeds.
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    /// Install the session id attached to subsequent requests.
    pub fn set_sid(&mut self, sid: String) {
        self.sid = Some(sid);
    }

    /// Drop the session id.
    pub fn clear_sid(&mut self) {
        self.sid = None;
    }

    /// Sequence number the next call will use.
    pub fn sequence_num(&self) -> u32 {
        self.sequence_num
    }

    /// Issue a single command.
    pub async fn request(&mut self, command: Value) -> Result<Value> {
        self.send(&[command], &[]).await
    }

    /// Issue an ordered batch of commands in one call.
    pub async fn request_batch(&mut self, commands: &[Value]) -> Result<Value> {
        self.send(commands, &[]).await
    }

    /// Issue commands with extra query parameters appended after `id`
    /// and `sid`.
    pub async fn request_with_params(
        &mut self,
        commands: &[Value],
        extra: &[(&str, &str)],
    ) -> Result<Value> {
        self.send(commands, extra).await
    }

    async fn send(&mut self, commands: &[Value], extra: &[(&str, &str)]) -> Result<Value> {
        let id = self.sequence_num;
        self.sequence_num = self.sequence_num.wrapping_add(1);

        let mut query: Vec<(String, String)> = vec![("id".to_string(), id.to_string())];
        if let Some(sid) = &self.sid {
            query.push(("sid".to_string(), sid.clone()));
        }
        for (key, value) in extra {
            query.push(((*key).to_string(), (*value).to_string()));
        }

        let body = serde_json::to_string(commands)?;
        let url = format!("{}/cs", self.base_url);
        tracing::debug!(id, body = %body, "api request");

        let text = self.http.post(&url, &query, body).await?;
        tracing::debug!(id, bytes = text.len(), "api response");

        decode_response(serde_json::from_str(&text)?)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode an API response payload.
///
/// The server replies with either a bare integer status or an array whose
/// first element is the result for the first command. Integer decode is
/// attempted first: a negative value is an error code, anything else is
/// the success payload.
fn decode_response(response: Value) -> Result<Value> {
    if let Some(code) = response.as_i64() {
        if code < 0 {
            return Err(request_error(code));
        }
        return Ok(Value::from(code));
    }

    let items = response.as_array().ok_or_else(Error::invalid_response)?;
    let first = items.first().ok_or_else(Error::invalid_response)?;
    if let Some(code) = first.as_i64() {
        if code < 0 {
            return Err(request_error(code));
        }
    }
    Ok(first.clone())
}
