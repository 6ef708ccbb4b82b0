//! # Source Revision Discovery
//!
//! Provenance for a pushed version is the commit that produced it plus the
//! origin remote URL. Both come from the `git` command line; the working
//! directory is expected to be inside the repository holding the secret
//! file.

use crate::error::VersioningError;
use anyhow::{Context, Result};
use std::process::Command;

/// Commit id and origin remote URL of the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionInfo {
    pub commit: String,
    pub remote_url: String,
}

/// Source of revision/provenance data. Implemented by [`GitCli`] for real
/// runs and by fixtures in tests.
pub trait RevisionSource: Send + Sync {
    fn fetch(&self) -> Result<RevisionInfo>;
}

/// Revision discovery through the `git` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl RevisionSource for GitCli {
    fn fetch(&self) -> Result<RevisionInfo> {
        Ok(RevisionInfo {
            commit: git_stdout(&["rev-parse", "HEAD"])?,
            remote_url: git_stdout(&["remote", "get-url", "origin"])?,
        })
    }
}

/// Run git with `args` and return trimmed stdout.
fn git_stdout(args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .output()
        .with_context(|| format!("failed to execute git {}", args.join(" ")))?;

    if !output.status.success() {
        return Err(VersioningError::GitCommand {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
