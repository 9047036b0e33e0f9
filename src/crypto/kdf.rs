//! MEGA key derivation.
//!
//! The legacy functions are MEGA inventions, not general-purpose KDFs.
//! Do not use them for anything else.

use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};
use sha2::Sha512;

use crate::error::{Error, Result};

use super::aes;

/// Fixed start vector for the legacy password KDF.
const LEGACY_KDF_IV: [u8; 16] = [
    0x93, 0xC4, 0x67, 0xE3, 0x7D, 0xB0, 0xC7, 0xA4, 0xD1, 0xBE, 0x3F, 0x81, 0x01, 0x52, 0xCB, 0x56,
];

/// Legacy (v1) password key.
///
/// Runs 65,536 rounds of AES over the fixed start vector, keyed by
/// successive 16-byte chunks of the zero-padded password bytes.
pub fn legacy_password_key(password: &str) -> [u8; 16] {
    let mut bytes = password.as_bytes().to_vec();
    while bytes.len() % 4 != 0 {
        bytes.push(0);
    }

    let mut key = LEGACY_KDF_IV;
    if bytes.is_empty() {
        return key;
    }

    for _ in 0..0x10000 {
        for chunk in bytes.chunks(16) {
            let mut round_key = [0u8; 16];
            round_key[..chunk.len()].copy_from_slice(chunk);
            key = aes::ecb_encrypt_block(&key, &round_key);
        }
    }
    key
}

/// Legacy (v1) username hash sent with the login request.
///
/// XOR-folds the email into 16 bytes, encrypts 16,384 rounds with the
/// password key and keeps bytes 0..4 and 8..12.
pub fn username_hash(email: &str, password_key: &[u8; 16]) -> [u8; 8] {
    let mut hash = [0u8; 16];
    for (i, byte) in email.bytes().enumerate() {
        hash[i % 16] ^= byte;
    }

    for _ in 0..0x4000 {
        hash = aes::ecb_encrypt_block(&hash, password_key);
    }

    let mut out = [0u8; 8];
    out[..4].copy_from_slice(&hash[..4]);
    out[4..].copy_from_slice(&hash[8..12]);
    out
}

/// v2 login key: PBKDF2-HMAC-SHA512 with 100,000 iterations.
///
/// The first 16 bytes are the password key, the last 16 the user hash
/// sent to the server.
pub fn derive_login_key(password: &str, salt: &[u8]) -> Result<[u8; 32]> {
    let mut out = [0u8; 32];
    pbkdf2::<Hmac<Sha512>>(password.as_bytes(), salt, 100_000, &mut out)
        .map_err(|_| Error::request("Key derivation failed"))?;
    Ok(out)
}

/// Random 128-bit key from the system CSPRNG.
pub fn random_key() -> [u8; 16] {
    let mut key = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

/// Random alphanumeric tag, sent as the `i` parameter with mutating
/// commands.
pub fn random_tag(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
