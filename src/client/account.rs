//! Account information: profile, quota, storage usage.

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::node::StorageSpace;

use super::Mega;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

impl Mega {
    /// Profile details of the logged-in user.
    pub async fn get_user(&mut self) -> Result<Value> {
        self.api.request(json!({"a": "ug"})).await
    }

    /// Total storage quota in bytes.
    pub async fn get_quota(&mut self) -> Result<u64> {
        let resp = self.api.request(json!({"a": "uq", "xfer": 1})).await?;
        resp.get("mstrg")
            .and_then(|v| v.as_u64())
            .ok_or_else(Error::invalid_response)
    }

    /// Used and total storage space.
    ///
    /// Reported in bytes, or in megabytes when `mega` is set.
    pub async fn get_storage_space(&mut self, mega: bool) -> Result<StorageSpace> {
        let resp = self
            .api
            .request(json!({"a": "uq", "xfer": 1, "strg": 1}))
            .await?;
        let used = resp
            .get("cstrg")
            .and_then(|v| v.as_u64())
            .ok_or_else(Error::invalid_response)? as f64;
        let total = resp
            .get("mstrg")
            .and_then(|v| v.as_u64())
            .ok_or_else(Error::invalid_response)? as f64;

        let scale = if mega { BYTES_PER_MEGABYTE } else { 1.0 };
        Ok(StorageSpace {
            used: used / scale,
            total: total / scale,
        })
    }
}
