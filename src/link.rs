//! Public link parsing and formatting.
//!
//! Two link shapes are in circulation:
//! - `https://mega.nz/#!HANDLE!KEY` (legacy)
//! - `https://mega.nz/file/HANDLE#KEY`

use crate::error::{Error, Result};

/// Parse a public file link into `(handle, key)`.
///
/// Malformed links are a validation failure; nothing has been sent yet.
pub fn parse_public_url(url: &str) -> Result<(String, String)> {
    if let Some((_, rest)) = url.split_once("#!") {
        if let Some((handle, key)) = rest.split_once('!') {
            if !handle.is_empty() && !key.is_empty() {
                return Ok((handle.to_string(), key.to_string()));
            }
        }
    }

    if let Some((_, rest)) = url.split_once("/file/") {
        if let Some((handle, key)) = rest.split_once('#') {
            if !handle.is_empty() && !key.is_empty() {
                return Ok((handle.to_string(), key.to_string()));
            }
        }
    }

    Err(Error::validation(format!("Invalid public url: {url}")))
}

/// Format the legacy public link for a handle and base64 key.
pub fn format_public_url(handle: &str, key_b64: &str) -> String {
    format!("https://mega.nz/#!{handle}!{key_b64}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_link() {
        let (handle, key) =
            parse_public_url("https://mega.nz/#!1iYHkDTL!rIivzxhmNxHpMzeuua0qPE4_zu9YWz8nhePDUJD6rok")
                .unwrap();
        assert_eq!(handle, "1iYHkDTL");
        assert_eq!(key, "rIivzxhmNxHpMzeuua0qPE4_zu9YWz8nhePDUJD6rok");
    }

    #[test]
    fn test_parse_new_link() {
        let (handle, key) = parse_public_url("https://mega.nz/file/ABC123#keydata").unwrap();
        assert_eq!(handle, "ABC123");
        assert_eq!(key, "keydata");
    }

    #[test]
    fn test_parse_invalid_link() {
        assert!(parse_public_url("https://example.com/file").is_err());
        assert!(parse_public_url("https://mega.nz/#!onlyhandle").is_err());
        let err = parse_public_url("not a url").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_format_roundtrip() {
        let url = format_public_url("1iYHkDTL", "somekey");
        let (handle, key) = parse_public_url(&url).unwrap();
        assert_eq!(handle, "1iYHkDTL");
        assert_eq!(key, "somekey");
    }
}
