//! # Version Ledger
//!
//! In-memory view of a secret's version history, rebuilt on every run from
//! the store's stage map and provenance tags. Version ids are content
//! hashes, so the ledger never needs local state to decide whether a push
//! is required.
//!
//! Timestamps are RFC 3339 UTC strings, so plain string order is
//! chronological order.

use crate::constants::{version_tag_key, CURRENT_STAGE, MAX_VERSION_COUNT};
use crate::store::RawSecretMetadata;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One stored version of a secret, as reconstructed from tags.
///
/// `commit` and `date` are `None` for versions whose provenance tag was
/// removed or never written; those sort before every dated version so they
/// are evicted first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretVersion {
    /// Content hash, doubling as the store-side version id.
    pub hash: String,
    /// Whether the store serves this version as the current one.
    pub current: bool,
    pub commit: Option<String>,
    pub date: Option<String>,
}

/// A secret and its sorted version history.
#[derive(Debug, Clone)]
pub struct SecretRecord {
    pub name: String,
    pub arn: String,
    pub kms_key_id: Option<String>,
    /// Oldest first; see [`version_order`].
    pub versions: Vec<SecretVersion>,
}

impl SecretRecord {
    pub fn from_metadata(metadata: &RawSecretMetadata) -> Self {
        Self {
            name: metadata.name.clone(),
            arn: metadata.arn.clone(),
            kms_key_id: metadata.kms_key_id.clone(),
            versions: derive_versions(&metadata.version_ids_to_stages, &metadata.tags),
        }
    }

    pub fn current_version(&self) -> Option<&SecretVersion> {
        self.versions.iter().find(|version| version.current)
    }

    /// Whether `hash` is already the stored current version.
    pub fn is_already_current(&self, hash: &str) -> bool {
        is_already_current(&self.versions, hash)
    }

    /// Whether the history has outgrown the ceiling and owes an eviction.
    ///
    /// Each run adds at most one version, so the count exceeds
    /// [`MAX_VERSION_COUNT`] by at most one and a single eviction restores
    /// the cap.
    pub fn over_ceiling(&self) -> bool {
        self.versions.len() > MAX_VERSION_COUNT
    }
}

/// True iff `candidate` is present and holds the current stage.
pub fn is_already_current(versions: &[SecretVersion], candidate: &str) -> bool {
    versions
        .iter()
        .any(|version| version.current && version.hash == candidate)
}

/// The eviction victim: the oldest version under the ordering, so untagged
/// strays go first. `None` only on an empty history.
pub fn pick_eviction_victim(versions: &[SecretVersion]) -> Option<&SecretVersion> {
    versions.first()
}

/// Rebuild the version list from the stage map and the `version:<hash>`
/// provenance tags, oldest first.
pub fn derive_versions(
    stage_map: &HashMap<String, Vec<String>>,
    tags: &HashMap<String, String>,
) -> Vec<SecretVersion> {
    let mut versions: Vec<SecretVersion> = stage_map
        .iter()
        .map(|(version_id, stages)| {
            let current = stages.iter().any(|stage| stage == CURRENT_STAGE);
            let (commit, date) = match tags.get(&version_tag_key(version_id)) {
                Some(value) => match value.split_once('/') {
                    Some((commit, date)) => (Some(commit.to_string()), Some(date.to_string())),
                    None => (Some(value.clone()), None),
                },
                None => (None, None),
            };
            SecretVersion {
                hash: version_id.clone(),
                current,
                commit,
                date,
            }
        })
        .collect();

    versions.sort_by(version_order);
    versions
}

/// Undated versions first (by hash among themselves), then by date
/// ascending with the hash as tie-break.
pub fn version_order(a: &SecretVersion, b: &SecretVersion) -> Ordering {
    match (&a.date, &b.date) {
        (None, None) => a.hash.cmp(&b.hash),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(date_a), Some(date_b)) => date_a.cmp(date_b).then_with(|| a.hash.cmp(&b.hash)),
    }
}
