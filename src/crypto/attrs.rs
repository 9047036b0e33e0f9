//! Node attribute and key envelope handling.
//!
//! Attributes travel as `MEGA{json}` blobs, zero-padded to the block
//! size and AES-CBC encrypted under the folded node key. Node keys
//! themselves are AES-ECB wrapped with the account master key.

use serde_json::Value;

use super::aes;

/// Prefix marking a valid attribute blob.
const ATTR_MAGIC: &[u8] = b"MEGA";

/// Encrypt a node attribute object.
pub fn encrypt_attr(attrs: &Value, key: &[u8; 16]) -> Vec<u8> {
    let mut data = ATTR_MAGIC.to_vec();
    data.extend_from_slice(attrs.to_string().as_bytes());
    let pad = (16 - data.len() % 16) % 16;
    data.extend(std::iter::repeat(0).take(pad));
    aes::cbc_encrypt(&data, key)
}

/// Decrypt a node attribute blob. `None` when the blob does not carry
/// the `MEGA` magic or valid JSON.
pub fn decrypt_attr(data: &[u8], key: &[u8; 16]) -> Option<Value> {
    if data.is_empty() || data.len() % 16 != 0 {
        return None;
    }
    let plain = aes::cbc_decrypt(data, key);
    if !plain.starts_with(ATTR_MAGIC) {
        return None;
    }
    let text = String::from_utf8_lossy(&plain[ATTR_MAGIC.len()..]);
    serde_json::from_str(text.trim_end_matches('\0')).ok()
}

/// Decrypt the `k` field of a node listing entry with the master key.
///
/// The field holds `owner:key` pairs separated by `/`; the first pair is
/// taken and its payload unwrapped with AES-ECB.
pub fn decrypt_node_key(field: &str, master_key: &[u8; 16]) -> Option<Vec<u8>> {
    let pair = field.split('/').next()?;
    let (_, encrypted_b64) = pair.split_once(':')?;
    let encrypted = crate::base64::decode(encrypted_b64).ok()?;
    if encrypted.is_empty() || encrypted.len() % 16 != 0 {
        return None;
    }
    Some(aes::ecb_decrypt(&encrypted, master_key))
}

/// Collapse a node key to its 16-byte AES key.
///
/// File keys are 32 bytes with the nonce and MAC XORed into the upper
/// half; folder keys are already 16 bytes.
pub fn fold_key(key: &[u8]) -> Option<[u8; 16]> {
    match key.len() {
        16 => key.try_into().ok(),
        32 => {
            let mut out = [0u8; 16];
            for (i, b) in out.iter_mut().enumerate() {
                *b = key[i] ^ key[i + 16];
            }
            Some(out)
        }
        _ => None,
    }
}
