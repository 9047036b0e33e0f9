//! MEGA's URL-safe base64 variant.
//!
//! The service encodes binary material with the URL-safe alphabet
//! (`-` and `_` instead of `+` and `/`) and strips the `=` padding.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encode bytes to MEGA's URL-safe base64 (no padding).
///
/// # Example
/// ```
/// let encoded = mega_client::base64::encode(b"hello");
/// assert!(!encoded.contains('='));
/// ```
pub fn encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decode MEGA's URL-safe base64 to bytes.
///
/// Tolerates standard-alphabet input and stray padding, both of which
/// show up in values that passed through other tooling.
pub fn decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let cleaned: String = s
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    URL_SAFE_NO_PAD.decode(cleaned.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let original = b"Hello, MEGA!";
        let decoded = decode(&encode(original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_url_safe_no_padding() {
        let data: Vec<u8> = (0u8..=255).collect();
        let encoded = encode(&data);
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('='));
    }

    #[test]
    fn test_decode_standard_alphabet() {
        // "???>" encodes to Pz8/Pg== in the standard alphabet.
        assert_eq!(decode("Pz8/Pg==").unwrap(), b"???>");
        assert_eq!(decode("Pz8_Pg").unwrap(), b"???>");
    }

    #[test]
    fn test_decode_invalid() {
        assert!(decode("a").is_err());
    }
}
