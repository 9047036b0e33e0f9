//! Cryptographic envelope for the MEGA protocol.

pub mod aes;
pub mod attrs;
pub mod kdf;
pub mod rsa;

pub use attrs::{decrypt_attr, decrypt_node_key, encrypt_attr, fold_key};
