//! Contact list management.

use serde_json::json;

use crate::error::{Error, Result};

use super::Mega;

impl Mega {
    /// Add a user to the contact list.
    pub async fn add_contact(&mut self, email: &str) -> Result<i64> {
        self.edit_contact(email, true).await
    }

    /// Remove a user from the contact list.
    pub async fn remove_contact(&mut self, email: &str) -> Result<i64> {
        self.edit_contact(email, false).await
    }

    async fn edit_contact(&mut self, email: &str, add: bool) -> Result<i64> {
        if !is_plausible_email(email) {
            return Err(Error::validation("A valid email address is required"));
        }

        let level = if add { "1" } else { "0" };
        let resp = self
            .api
            .request(json!({"a": "ur", "u": email, "l": level, "i": self.request_tag}))
            .await?;
        resp.as_i64().ok_or_else(Error::invalid_response)
    }
}

/// Cheap shape check for `local@domain.tld`.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
