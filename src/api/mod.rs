//! Request plumbing for the MEGA API.

mod client;
mod error;

pub use client::ApiClient;
pub use error::ErrorCode;
