//! Authentication lifecycle: login, anonymous sessions, session resume.

use serde_json::{json, Value};

use crate::base64;
use crate::crypto::rsa::{decrypt_session_id, RsaPrivateKey};
use crate::crypto::{aes, kdf};
use crate::error::{Error, Result};

use super::Mega;

/// Version byte of the serialized session blob.
const SESSION_VERSION: u8 = 1;

impl Mega {
    /// Log in with account credentials.
    ///
    /// A pre-login call selects the key derivation variant: accounts
    /// created against the current scheme derive the password key with
    /// PBKDF2, older accounts use the legacy AES KDF plus a username
    /// hash. On failure the session id stays absent and the error is
    /// surfaced to the caller; nothing is retried.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let email = email.trim().to_lowercase();

        let prelogin = self.api.request(json!({"a": "us0", "user": email})).await?;
        let variant = prelogin.get("v").and_then(|v| v.as_i64()).unwrap_or(1);

        let (password_key, user_hash) = if variant == 2 {
            let salt_b64 = prelogin
                .get("s")
                .and_then(|v| v.as_str())
                .ok_or_else(Error::invalid_response)?;
            let salt = base64::decode(salt_b64)?;
            let derived = kdf::derive_login_key(password, &salt)?;
            let mut key = [0u8; 16];
            key.copy_from_slice(&derived[..16]);
            (key, base64::encode(&derived[16..]))
        } else {
            let key = kdf::legacy_password_key(password);
            let hash = kdf::username_hash(&email, &key);
            (key, base64::encode(&hash))
        };

        let resp = self
            .api
            .request(json!({"a": "us", "user": email, "uh": user_hash}))
            .await?;
        self.finish_login(resp, &password_key)
    }

    /// Create an ephemeral account and log into it.
    ///
    /// The master key never leaves the client in clear form: the server
    /// receives it wrapped with a throwaway password key, along with a
    /// self-challenge it echoes back inside the temporary session id.
    pub async fn login_anonymous(&mut self) -> Result<()> {
        let master_key = kdf::random_key();
        let password_key = kdf::random_key();
        let challenge = kdf::random_key();

        let mut ts = [0u8; 32];
        ts[..16].copy_from_slice(&challenge);
        ts[16..].copy_from_slice(&aes::ecb_encrypt_block(&challenge, &master_key));

        let user = self
            .api
            .request(json!({
                "a": "up",
                "k": base64::encode(&aes::ecb_encrypt_block(&master_key, &password_key)),
                "ts": base64::encode(&ts),
            }))
            .await?;
        let handle = user
            .as_str()
            .ok_or_else(Error::invalid_response)?
            .to_string();

        let resp = self.api.request(json!({"a": "us", "user": handle})).await?;
        self.install_session(resp, master_key)
    }

    /// Serialize the current session for a later [`Mega::restore_session`].
    ///
    /// The blob contains the master key; store it accordingly.
    pub fn serialize_session(&self) -> Result<String> {
        let sid = self
            .api
            .sid()
            .ok_or_else(|| Error::validation("Not logged in"))?;
        let master_key = self.master_key()?;

        let mut blob = Vec::with_capacity(1 + master_key.len() + sid.len());
        blob.push(SESSION_VERSION);
        blob.extend_from_slice(master_key);
        blob.extend_from_slice(sid.as_bytes());
        Ok(base64::encode(&blob))
    }

    /// Restore a serialized session without network traffic.
    pub fn restore_session(&mut self, blob: &str) -> Result<()> {
        let data =
            base64::decode(blob).map_err(|_| Error::validation("Invalid session blob"))?;
        if data.len() < 18 || data[0] != SESSION_VERSION {
            return Err(Error::validation("Invalid session blob"));
        }

        let mut master_key = [0u8; 16];
        master_key.copy_from_slice(&data[1..17]);
        let sid = String::from_utf8(data[17..].to_vec())
            .map_err(|_| Error::validation("Invalid session blob"))?;

        self.master_key = Some(master_key);
        self.api.set_sid(sid);
        Ok(())
    }

    /// Unwrap the master key from a credentialed login response and
    /// install the session.
    fn finish_login(&mut self, resp: Value, password_key: &[u8; 16]) -> Result<()> {
        let k_b64 = resp
            .get("k")
            .and_then(|v| v.as_str())
            .ok_or_else(Error::invalid_response)?;
        let wrapped: [u8; 16] = base64::decode(k_b64)?
            .try_into()
            .map_err(|_| Error::invalid_response())?;
        let master_key = aes::ecb_decrypt_block(&wrapped, password_key);
        self.install_session(resp, master_key)
    }

    /// Install the session id delivered in a `us` response.
    ///
    /// Permanent sessions arrive RSA-encrypted in `csid`; ephemeral ones
    /// arrive as `tsid` with a challenge encrypted under the master key.
    fn install_session(&mut self, resp: Value, master_key: [u8; 16]) -> Result<()> {
        if let Some(tsid) = resp.get("tsid").and_then(|v| v.as_str()) {
            if !challenge_matches(tsid, &master_key) {
                tracing::warn!("session challenge mismatch in tsid");
            }
            self.master_key = Some(master_key);
            self.api.set_sid(tsid.to_string());
            return Ok(());
        }

        let privk_b64 = resp
            .get("privk")
            .and_then(|v| v.as_str())
            .ok_or_else(Error::invalid_response)?;
        let wrapped = base64::decode(privk_b64)?;
        if wrapped.is_empty() || wrapped.len() % 16 != 0 {
            return Err(Error::invalid_response());
        }
        let rsa_key = RsaPrivateKey::from_blob(&aes::ecb_decrypt(&wrapped, &master_key))?;

        let csid = resp
            .get("csid")
            .and_then(|v| v.as_str())
            .ok_or_else(Error::invalid_response)?;
        let sid = decrypt_session_id(csid, &rsa_key)?;

        self.master_key = Some(master_key);
        self.api.set_sid(sid);
        Ok(())
    }
}

/// Check the self-challenge embedded in a temporary session id: the
/// first 16 decoded bytes, encrypted with the master key, must equal the
/// last 16.
fn challenge_matches(tsid: &str, master_key: &[u8; 16]) -> bool {
    let Ok(sid) = base64::decode(tsid) else {
        return false;
    };
    if sid.len() < 32 {
        return false;
    }
    let mut head = [0u8; 16];
    head.copy_from_slice(&sid[..16]);
    aes::ecb_encrypt_block(&head, master_key)[..] == sid[sid.len() - 16..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_blob_roundtrip() {
        let mut mega = Mega::new();
        mega.master_key = Some([7u8; 16]);
        mega.api.set_sid("sid12345".to_string());

        let blob = mega.serialize_session().unwrap();

        let mut restored = Mega::new();
        restored.restore_session(&blob).unwrap();
        assert_eq!(restored.sid(), Some("sid12345"));
        assert_eq!(restored.master_key().unwrap(), &[7u8; 16]);
    }

    #[test]
    fn test_serialize_requires_login() {
        let mega = Mega::new();
        assert!(matches!(
            mega.serialize_session().unwrap_err(),
            Error::Validation(_)
        ));
    }

    #[test]
    fn test_restore_rejects_garbage() {
        let mut mega = Mega::new();
        assert!(mega.restore_session("!!!").is_err());
        assert!(mega.restore_session("AAAA").is_err());
        assert!(mega.sid().is_none());
    }

    #[test]
    fn test_challenge_check() {
        let master_key = [3u8; 16];
        let challenge = [9u8; 16];

        let mut sid = Vec::new();
        sid.extend_from_slice(&challenge);
        sid.extend_from_slice(&[0u8; 11]);
        sid.extend_from_slice(&aes::ecb_encrypt_block(&challenge, &master_key));

        let tsid = base64::encode(&sid);
        assert!(challenge_matches(&tsid, &master_key));
        assert!(!challenge_matches(&tsid, &[4u8; 16]));
        assert!(!challenge_matches("c2hvcnQ", &master_key));
    }
}
