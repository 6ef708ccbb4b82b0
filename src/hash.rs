//! # Content Hashing
//!
//! The content digest doubles as the store-side version identifier
//! (`ClientRequestToken`), so it must be stable across runs for identical
//! plaintext.

/// Lowercase hex MD5 digest of the decrypted payload bytes.
pub fn md5_hex(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}
