//! # SOPS Metadata
//!
//! Reads the `sops.kms` section of an *undecrypted* file to find the KMS key
//! ARNs the file is encrypted for. Used only when the secret does not exist
//! yet and has to be created with a matching key.

use crate::error::VersioningError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SopsEnvelope {
    sops: Option<SopsMetadata>,
}

#[derive(Debug, Deserialize)]
struct SopsMetadata {
    kms: Option<Vec<KmsEntry>>,
}

#[derive(Debug, Deserialize)]
struct KmsEntry {
    arn: Option<String>,
}

/// Extract the KMS key ARNs from the file's SOPS metadata block.
///
/// Files without a `sops.kms` section (age- or GCP-encrypted files, say)
/// yield an empty list; the caller decides whether that is fatal.
pub fn kms_key_arns(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(VersioningError::FileNotFound {
            file: path.to_path_buf(),
        }
        .into());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let envelope = parse_envelope(&content)
        .with_context(|| format!("cannot parse SOPS metadata from {}", path.display()))?;

    Ok(envelope
        .sops
        .and_then(|metadata| metadata.kms)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| entry.arn)
        .collect())
}

/// Try to parse as YAML first, then fall back to JSON
fn parse_envelope(content: &str) -> Result<SopsEnvelope> {
    if let Ok(envelope) = serde_yaml::from_str::<SopsEnvelope>(content) {
        return Ok(envelope);
    }
    serde_json::from_str(content).map_err(Into::into)
}

/// Pick the first ARN whose region and account segments match the caller's.
///
/// KMS ARNs look like `arn:aws:kms:<region>:<account>:key/<id>`; segment 3
/// is the region and segment 4 the account.
pub fn select_kms_key<'a>(arns: &'a [String], account: &str, region: &str) -> Option<&'a str> {
    arns.iter().map(String::as_str).find(|arn| {
        let segments: Vec<&str> = arn.split(':').collect();
        segments.get(3) == Some(&region) && segments.get(4) == Some(&account)
    })
}
