//! # SOPS Secret Files
//!
//! The local side of the workflow: a SOPS-encrypted file whose decrypted
//! form is the secret payload and whose undecrypted form embeds the KMS key
//! list used for first-time secret creation.
//!
//! ## Module Structure
//!
//! - `decrypt.rs` - decryption through the `sops` binary
//! - `metadata.rs` - undecrypted key-list parsing and key selection

pub mod decrypt;
pub mod metadata;

// Re-export public API
pub use decrypt::decrypt_file;
pub use metadata::{kms_key_arns, select_kms_key};

use anyhow::Result;
use std::path::PathBuf;
use zeroize::Zeroizing;

/// Local encrypted secret material the workflow reads from.
///
/// Implemented by [`SopsFile`] for real runs and by fixtures in tests.
pub trait SecretSource: Send + Sync {
    /// Decrypted payload, exactly as it will be pushed to the store.
    fn decrypt(&self) -> Result<Zeroizing<String>>;

    /// Encryption-key ARNs read from the *undecrypted* file metadata.
    fn encryption_key_arns(&self) -> Result<Vec<String>>;
}

/// A SOPS-encrypted file on disk.
#[derive(Debug, Clone)]
pub struct SopsFile {
    path: PathBuf,
}

impl SopsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SecretSource for SopsFile {
    fn decrypt(&self) -> Result<Zeroizing<String>> {
        decrypt::decrypt_file(&self.path)
    }

    fn encryption_key_arns(&self) -> Result<Vec<String>> {
        metadata::kms_key_arns(&self.path)
    }
}
