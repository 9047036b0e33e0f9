//! # mega-client
//!
//! Rust client library for the MEGA cloud storage HTTP API.
//!
//! ## Features
//!
//! - **Authentication**: credentialed login (legacy and PBKDF2 account
//!   variants), anonymous ephemeral sessions, session serialization and
//!   resume, and HTTP proxy support.
//! - **Filesystem operations**: decrypted node listing, `find` by name,
//!   folder creation, rename, move-to-trash, permanent delete, and
//!   emptying the rubbish bin.
//! - **Public links**: export download links and import public file
//!   links into the account.
//! - **Contacts**: add and remove contact list entries.
//!
//! Requests are issued one at a time over a single transport; failures
//! surface as [`Error::Validation`] (input rejected, nothing sent) or
//! [`Error::Request`] (the server or transport rejected the call,
//! optionally with a MEGA error code). The library never retries on its
//! own.
//!
//! ## Example
//!
//! ```no_run
//! use mega_client::Mega;
//!
//! # async fn example() -> mega_client::Result<()> {
//! let mut mega = Mega::new();
//! mega.login("user@example.com", "password").await?;
//!
//! if let Some((handle, node)) = mega.find("report.pdf").await? {
//!     println!("{} ({} bytes): {}", node.name, node.size, handle);
//!     let link = mega.get_link(&node).await?;
//!     println!("{link}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod base64;
pub mod client;
pub mod crypto;
pub mod error;
pub mod http;
pub mod link;
pub mod node;

// Re-export commonly used types
pub use api::{ApiClient, ErrorCode};
pub use client::Mega;
pub use error::{Error, Result};
pub use node::{Node, NodeType, StorageSpace};
