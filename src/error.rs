//! # Error Types
//!
//! Failure taxonomy for the versioning workflow. Only the store's "secret
//! not found" condition is recoverable, and that one is modeled as
//! `Ok(None)` on [`crate::store::SecretStore::describe`] rather than as an
//! error; everything here is fatal and aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal workflow failures.
#[derive(Debug, Error)]
pub enum VersioningError {
    /// The secret file named on the command line does not exist.
    #[error("cannot find file: {}", .file.display())]
    FileNotFound { file: PathBuf },

    /// The `sops` binary exited non-zero while decrypting the file.
    #[error("sops decryption of {} failed (exit code {code:?}): {stderr}", .file.display())]
    DecryptionFailed {
        file: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// The undecrypted file carries no KMS key ARN for the caller's
    /// account in the effective region, so the secret cannot be
    /// auto-created.
    #[error("no KMS key in the secret file matches account {account} in region {region}")]
    NoMatchingKmsKey { account: String, region: String },

    /// A git command needed for provenance tagging failed.
    #[error("git {command} failed: {stderr}")]
    GitCommand { command: String, stderr: String },
}
