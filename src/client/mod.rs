//! The high-level MEGA client.

mod account;
mod auth;
mod contacts;
mod files;

use serde_json::Value;

use crate::api::ApiClient;
use crate::crypto::kdf;
use crate::error::{Error, Result};

/// Client for a single MEGA account session.
///
/// All state is held in the owning value: the session id, the sequence
/// counter and the decrypted key material are plain fields, so a `Mega`
/// must not be shared across threads without external synchronization.
/// Operations issue their HTTP calls one at a time and block (in the
/// async sense) until the response arrives.
#[derive(Debug)]
pub struct Mega {
    pub(crate) api: ApiClient,
    /// Account master key, present after login.
    pub(crate) master_key: Option<[u8; 16]>,
    /// Tag sent as `i` with mutating commands.
    pub(crate) request_tag: String,
    pub(crate) root_handle: Option<String>,
    pub(crate) inbox_handle: Option<String>,
    pub(crate) trash_handle: Option<String>,
}

impl Mega {
    /// Create a client pointing at the production API.
    pub fn new() -> Self {
        Self::with_api(ApiClient::new())
    }

    /// Create a client pointing at a different API host. Used for
    /// testing against a mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_api(ApiClient::with_base_url(base_url))
    }

    /// Create a client that routes through a proxy.
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        Ok(Self::with_api(ApiClient::with_proxy(proxy)?))
    }

    fn with_api(api: ApiClient) -> Self {
        Self {
            api,
            master_key: None,
            request_tag: kdf::random_tag(10),
            root_handle: None,
            inbox_handle: None,
            trash_handle: None,
        }
    }

    /// Session id of the current login, if any.
    pub fn sid(&self) -> Option<&str> {
        self.api.sid()
    }

    /// Sequence number the next API call will use.
    pub fn sequence_num(&self) -> u32 {
        self.api.sequence_num()
    }

    pub(crate) fn master_key(&self) -> Result<&[u8; 16]> {
        self.master_key
            .as_ref()
            .ok_or_else(|| Error::validation("Not logged in"))
    }

    /// Extract the node handle from a node-creation response object.
    ///
    /// Responses to `p` commands carry an `f` array; the last entry with
    /// a non-empty handle identifies the created node.
    pub fn get_id_from_obj(node_data: &Value) -> Option<String> {
        let mut id = None;
        for item in node_data.get("f")?.as_array()? {
            if let Some(handle) = item.get("h").and_then(|v| v.as_str()) {
                if !handle.is_empty() {
                    id = Some(handle.to_string());
                }
            }
        }
        id
    }
}

impl Default for Mega {
    fn default() -> Self {
        Self::new()
    }
}
