//! AES-128 in the modes the MEGA protocol uses.
//!
//! Key material is always 128 bits. Key wrapping uses ECB; attribute
//! blobs use CBC with an all-zero IV.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;

const BLOCK: usize = 16;

fn cipher(key: &[u8; 16]) -> Aes128 {
    Aes128::new(GenericArray::from_slice(key))
}

/// ECB-encrypt a single 16-byte block.
pub fn ecb_encrypt_block(block: &[u8; 16], key: &[u8; 16]) -> [u8; 16] {
    let mut buf = GenericArray::clone_from_slice(block);
    cipher(key).encrypt_block(&mut buf);
    buf.into()
}

/// ECB-decrypt a single 16-byte block.
pub fn ecb_decrypt_block(block: &[u8; 16], key: &[u8; 16]) -> [u8; 16] {
    let mut buf = GenericArray::clone_from_slice(block);
    cipher(key).decrypt_block(&mut buf);
    buf.into()
}

/// ECB-encrypt a whole-block buffer.
///
/// # Panics
/// Panics if `data` is not a multiple of the block size.
pub fn ecb_encrypt(data: &[u8], key: &[u8; 16]) -> Vec<u8> {
    assert_eq!(data.len() % BLOCK, 0, "data length must be a multiple of 16");

    let aes = cipher(key);
    let mut out = data.to_vec();
    for block in out.chunks_mut(BLOCK) {
        aes.encrypt_block(GenericArray::from_mut_slice(block));
    }
    out
}

/// ECB-decrypt a whole-block buffer.
///
/// # Panics
/// Panics if `data` is not a multiple of the block size.
pub fn ecb_decrypt(data: &[u8], key: &[u8; 16]) -> Vec<u8> {
    assert_eq!(data.len() % BLOCK, 0, "data length must be a multiple of 16");

    let aes = cipher(key);
    let mut out = data.to_vec();
    for block in out.chunks_mut(BLOCK) {
        aes.decrypt_block(GenericArray::from_mut_slice(block));
    }
    out
}

/// CBC-encrypt a whole-block buffer with a zero IV.
///
/// # Panics
/// Panics if `data` is not a multiple of the block size.
pub fn cbc_encrypt(data: &[u8], key: &[u8; 16]) -> Vec<u8> {
    assert_eq!(data.len() % BLOCK, 0, "data length must be a multiple of 16");

    let aes = cipher(key);
    let mut out = Vec::with_capacity(data.len());
    let mut prev = [0u8; BLOCK];
    for block in data.chunks(BLOCK) {
        let mut buf = [0u8; BLOCK];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = block[i] ^ prev[i];
        }
        let mut ga = GenericArray::clone_from_slice(&buf);
        aes.encrypt_block(&mut ga);
        prev.copy_from_slice(&ga);
        out.extend_from_slice(&ga);
    }
    out
}

/// CBC-decrypt a whole-block buffer with a zero IV.
///
/// # Panics
/// Panics if `data` is not a multiple of the block size.
pub fn cbc_decrypt(data: &[u8], key: &[u8; 16]) -> Vec<u8> {
    assert_eq!(data.len() % BLOCK, 0, "data length must be a multiple of 16");

    let aes = cipher(key);
    let mut out = Vec::with_capacity(data.len());
    let mut prev = [0u8; BLOCK];
    for block in data.chunks(BLOCK) {
        let mut buf = GenericArray::clone_from_slice(block);
        aes.decrypt_block(&mut buf);
        for (i, b) in buf.iter_mut().enumerate() {
            *b ^= prev[i];
        }
        prev.copy_from_slice(block);
        out.extend_from_slice(&buf);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecb_block_roundtrip() {
        let key = [0u8; 16];
        let plaintext = [1u8; 16];
        let ciphertext = ecb_encrypt_block(&plaintext, &key);
        assert_eq!(ecb_decrypt_block(&ciphertext, &key), plaintext);
    }

    #[test]
    fn test_ecb_known_vector() {
        // FIPS-197 appendix C.1
        let key: [u8; 16] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ];
        let plaintext: [u8; 16] = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ];
        let expected: [u8; 16] = [
            0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4,
            0xc5, 0x5a,
        ];
        assert_eq!(ecb_encrypt_block(&plaintext, &key), expected);
    }

    #[test]
    fn test_ecb_multi_block_roundtrip() {
        let key = [0x42u8; 16];
        let plaintext = vec![0xABu8; 48];
        let decrypted = ecb_decrypt(&ecb_encrypt(&plaintext, &key), &key);
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_cbc_roundtrip() {
        let key = [0x12u8; 16];
        let plaintext: Vec<u8> = (0u8..32).collect();
        let decrypted = cbc_decrypt(&cbc_encrypt(&plaintext, &key), &key);
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_cbc_chains_blocks() {
        // With a zero IV the first block matches ECB, the second must not.
        let key = [3u8; 16];
        let plaintext = [7u8; 32];
        let ciphertext = cbc_encrypt(&plaintext, &key);
        let first = ecb_encrypt_block(&[7u8; 16], &key);
        assert_eq!(&ciphertext[..16], &first);
        assert_ne!(&ciphertext[16..], &first);
    }

    #[test]
    #[should_panic(expected = "multiple of 16")]
    fn test_partial_block_rejected() {
        ecb_encrypt(&[0u8; 15], &[0u8; 16]);
    }
}
