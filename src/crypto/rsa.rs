//! RSA pieces used to unwrap the login session id.
//!
//! MEGA stores the private key as four MPIs (p, q, d, u) inside the
//! AES-encrypted `privk` user attribute, and delivers the session id
//! encrypted under the matching e = 3 public key.

use num_bigint::BigUint;

use crate::base64;
use crate::error::{Error, Result};

/// RSA private key components in MEGA's layout. `u` is p^-1 mod q.
#[derive(Debug, Clone)]
pub struct RsaPrivateKey {
    p: BigUint,
    q: BigUint,
    d: BigUint,
    u: BigUint,
}

fn malformed() -> Error {
    Error::request("Malformed key data")
}

/// Read one MPI: a 2-byte big-endian bit count followed by the magnitude
/// bytes. Advances `pos` past the value.
pub fn read_mpi(data: &[u8], pos: &mut usize) -> Result<BigUint> {
    let header = data.get(*pos..*pos + 2).ok_or_else(malformed)?;
    let bits = u16::from_be_bytes([header[0], header[1]]) as usize;
    let len = (bits + 7) / 8;
    let body = data.get(*pos + 2..*pos + 2 + len).ok_or_else(malformed)?;
    *pos += 2 + len;
    Ok(BigUint::from_bytes_be(body))
}

impl RsaPrivateKey {
    /// Parse p, q, d and u from a decrypted `privk` blob.
    pub fn from_blob(blob: &[u8]) -> Result<Self> {
        let mut pos = 0;
        let p = read_mpi(blob, &mut pos)?;
        let q = read_mpi(blob, &mut pos)?;
        let d = read_mpi(blob, &mut pos)?;
        let u = read_mpi(blob, &mut pos)?;
        Ok(Self { p, q, d, u })
    }

    /// Decrypt a ciphertext using the CRT recombination shortcut.
    pub fn decrypt(&self, ciphertext: &BigUint) -> BigUint {
        let dp = &self.d % (&self.p - 1u32);
        let dq = &self.d % (&self.q - 1u32);
        let xp = (ciphertext % &self.p).modpow(&dp, &self.p);
        let xq = (ciphertext % &self.q).modpow(&dq, &self.q);

        let t = if xq >= xp {
            ((&xq - &xp) * &self.u) % &self.q
        } else {
            (&self.q - ((&xp - &xq) * &self.u) % &self.q) % &self.q
        };
        t * &self.p + xp
    }
}

/// Unwrap the RSA-encrypted `csid` login field into the session id.
pub fn decrypt_session_id(csid_b64: &str, key: &RsaPrivateKey) -> Result<String> {
    const SID_BYTES: usize = 43;

    let data = base64::decode(csid_b64)?;
    let mut pos = 0;
    let ciphertext = read_mpi(&data, &mut pos)?;

    let plaintext = key.decrypt(&ciphertext).to_bytes_be();
    if plaintext.len() < SID_BYTES {
        return Err(Error::request("Session id too short"));
    }
    Ok(base64::encode(&plaintext[..SID_BYTES]))
}
