//! # SOPS Decryption
//!
//! Shells out to the `sops` binary to decrypt the secret file. The binary is
//! resolved from `PATH` at call time and failures carry the sops stderr so
//! key-access problems surface verbatim.

use crate::error::VersioningError;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use zeroize::Zeroizing;

/// Decrypt `path` with `sops -d` and return the plaintext payload.
///
/// The plaintext is zeroized on drop; callers hash and upload it without
/// copying it out of the wrapper.
pub fn decrypt_file(path: &Path) -> Result<Zeroizing<String>> {
    if !path.exists() {
        return Err(VersioningError::FileNotFound {
            file: path.to_path_buf(),
        }
        .into());
    }

    let sops = which::which("sops").context("sops binary not found on PATH")?;
    let output = Command::new(sops)
        .arg("-d")
        .arg(path)
        .output()
        .with_context(|| format!("failed to run sops -d {}", path.display()))?;

    if !output.status.success() {
        return Err(VersioningError::DecryptionFailed {
            file: path.to_path_buf(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    let plaintext = String::from_utf8(output.stdout).context("sops emitted non-UTF-8 plaintext")?;
    Ok(Zeroizing::new(plaintext))
}
