//! Error types for the mega-client library.

use thiserror::Error;

/// Result type alias for mega-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by this crate.
///
/// Exactly two kinds are distinguished so callers can tell "bad input,
/// request never sent" from "request sent, server or transport rejected
/// it". Both are plain signal values; retry policy belongs to the
/// integrating application.
#[derive(Error, Debug)]
pub enum Error {
    /// The input failed validation before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// The API or transport rejected a request. `code` carries the
    /// numeric MEGA error code when the server reported one.
    #[error("{message}")]
    Request {
        message: String,
        code: Option<i64>,
    },
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub(crate) fn request(message: impl Into<String>) -> Self {
        Error::Request {
            message: message.into(),
            code: None,
        }
    }

    pub(crate) fn invalid_response() -> Self {
        Error::request("Invalid response from server")
    }

    /// Numeric MEGA error code, when the failure came from the API.
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Request { code, .. } => *code,
            Error::Validation(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::request(format!("Request error: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::request(format!("JSON error: {err}"))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::request(format!("Base64 decode error: {err}"))
    }
}
