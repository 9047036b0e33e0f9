//! MEGA API error code registry.

use crate::error::Error;

/// Error codes returned by the MEGA API.
///
/// The registry is not exhaustive: codes the server may add later surface
/// with a generic message and the raw code attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Internal server error
    Internal = -1,
    /// Invalid arguments
    Args = -2,
    /// Request failed, try again
    Again = -3,
    /// Rate limit exceeded
    RateLimit = -4,
    /// Transfer failed
    Failed = -5,
    /// Too many IPs
    TooManyIps = -6,
    /// Access denied
    AccessDenied = -7,
    /// Resource already exists
    Exists = -8,
    /// Authentication failed
    LoginFailed = -9,
    /// Circular linkage
    Circular = -10,
    /// Access violation
    AccessViolation = -11,
    /// Application key required
    AppKeyRequired = -12,
    /// Session expired
    SessionExpired = -13,
    /// Not confirmed
    NotConfirmed = -14,
    /// Blocked
    Blocked = -15,
    /// Over quota
    OverQuota = -16,
    /// Temporarily unavailable
    TempUnavailable = -17,
    /// Too many concurrent connections
    TooManyConnections = -18,
}

impl ErrorCode {
    /// Look up a known error code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(ErrorCode::Internal),
            -2 => Some(ErrorCode::Args),
            -3 => Some(ErrorCode::Again),
            -4 => Some(ErrorCode::RateLimit),
            -5 => Some(ErrorCode::Failed),
            -6 => Some(ErrorCode::TooManyIps),
            -7 => Some(ErrorCode::AccessDenied),
            -8 => Some(ErrorCode::Exists),
            -9 => Some(ErrorCode::LoginFailed),
            -10 => Some(ErrorCode::Circular),
            -11 => Some(ErrorCode::AccessViolation),
            -12 => Some(ErrorCode::AppKeyRequired),
            -13 => Some(ErrorCode::SessionExpired),
            -14 => Some(ErrorCode::NotConfirmed),
            -15 => Some(ErrorCode::Blocked),
            -16 => Some(ErrorCode::OverQuota),
            -17 => Some(ErrorCode::TempUnavailable),
            -18 => Some(ErrorCode::TooManyConnections),
            _ => None,
        }
    }

    /// Numeric value of the code.
    pub fn code(&self) -> i64 {
        *self as i64
    }

    /// Human-readable message for the code.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Internal => "Internal error",
            ErrorCode::Args => "Invalid arguments",
            ErrorCode::Again => "Try again",
            ErrorCode::RateLimit => "Rate limit exceeded",
            ErrorCode::Failed => "Transfer failed",
            ErrorCode::TooManyIps => "Too many IPs",
            ErrorCode::AccessDenied => "Access denied",
            ErrorCode::Exists => "Resource already exists",
            ErrorCode::LoginFailed => "Logging error",
            ErrorCode::Circular => "Circular linkage",
            ErrorCode::AccessViolation => "Access violation",
            ErrorCode::AppKeyRequired => "Application key required",
            ErrorCode::SessionExpired => "Session expired",
            ErrorCode::NotConfirmed => "Not confirmed",
            ErrorCode::Blocked => "Blocked",
            ErrorCode::OverQuota => "Over quota",
            ErrorCode::TempUnavailable => "Temporarily unavailable",
            ErrorCode::TooManyConnections => "Too many concurrent connections",
        }
    }
}

/// Build the request error for a negative API status code.
pub(crate) fn request_error(code: i64) -> Error {
    let message = match ErrorCode::from_code(code) {
        Some(known) => known.message().to_string(),
        None => format!("Unknown error (code {code})"),
    };
    Error::Request {
        message,
        code: Some(code),
    }
}
