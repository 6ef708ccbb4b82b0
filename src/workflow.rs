//! # Secret Update Workflow
//!
//! One run of the versioning protocol: describe the secret (creating it if
//! missing), evict the oldest version if the history is over the ceiling,
//! decrypt and hash the file, then push and tag the new version unless the
//! store already serves it.

use crate::constants::{
    version_tag_key, INITIAL_SECRET_VALUE, LATEST_VERSION_TAG, SOURCE_INFO_TAG,
};
use crate::error::VersioningError;
use crate::git::RevisionSource;
use crate::hash;
use crate::ledger::{self, SecretRecord};
use crate::sops::{self, SecretSource};
use crate::store::{RawSecretMetadata, SecretStore};
use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use tracing::info;

/// Outcome of one workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A new version was pushed and tagged.
    Updated { version: String },
    /// The stored current version already matches the file.
    AlreadyCurrent { version: String },
}

impl UpdateOutcome {
    /// The content hash the run settled on.
    pub fn version(&self) -> &str {
        match self {
            Self::Updated { version } | Self::AlreadyCurrent { version } => version,
        }
    }
}

/// Run the full update protocol for `secret_name`.
///
/// Eviction happens before the content comparison, so a no-op run still
/// trims an over-long history. Eviction is not rolled back if a later step
/// fails.
pub async fn update_secret_version(
    store: &dyn SecretStore,
    source: &dyn SecretSource,
    revision: &dyn RevisionSource,
    secret_name: &str,
) -> Result<UpdateOutcome> {
    let metadata = match store.describe(secret_name).await? {
        Some(metadata) => metadata,
        None => create_secret(store, source, secret_name).await?,
    };
    let record = SecretRecord::from_metadata(&metadata);

    if record.over_ceiling() {
        if let Some(victim) = ledger::pick_eviction_victim(&record.versions) {
            info!(
                "Cleaning up oldest version {} from {}",
                victim.hash,
                victim.date.as_deref().unwrap_or("unknown date")
            );
            store
                .remove_version_from_current_stages(secret_name, &victim.hash)
                .await?;
            store
                .untag_keys(secret_name, &[version_tag_key(&victim.hash)])
                .await?;
        }
    }

    let plaintext = source.decrypt()?;
    let version = hash::md5_hex(plaintext.as_bytes());

    if record.is_already_current(&version) {
        return Ok(UpdateOutcome::AlreadyCurrent { version });
    }

    store.put_value(secret_name, &version, &plaintext).await?;

    let revision = revision.fetch()?;
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    store
        .tag(
            secret_name,
            &[
                (
                    version_tag_key(&version),
                    format!("{}/{}", revision.commit, timestamp),
                ),
                (SOURCE_INFO_TAG.to_string(), revision.remote_url),
                (LATEST_VERSION_TAG.to_string(), version.clone()),
            ],
        )
        .await?;

    Ok(UpdateOutcome::Updated { version })
}

/// Auto-creation path: resolve a KMS key from the file's embedded key list
/// and create the secret with the placeholder value. Nothing is created
/// when no key matches the caller's account and region.
async fn create_secret(
    store: &dyn SecretStore,
    source: &dyn SecretSource,
    secret_name: &str,
) -> Result<RawSecretMetadata> {
    let arns = source.encryption_key_arns()?;
    let account = store.caller_account().await?;
    let region = store.region().to_string();

    let Some(kms_key) = sops::select_kms_key(&arns, &account, &region) else {
        return Err(VersioningError::NoMatchingKmsKey { account, region }.into());
    };

    info!(
        "Secret {} not found, creating it with key {}",
        secret_name, kms_key
    );
    store
        .create(secret_name, kms_key, INITIAL_SECRET_VALUE)
        .await
}
