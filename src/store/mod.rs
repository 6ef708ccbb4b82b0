//! # Secret Store
//!
//! The remote side of the workflow: a versioned secret store addressed by
//! secret name, with content hashes as version ids.
//!
//! ## Module Structure
//!
//! - `auth.rs` - SDK configuration (region, proxy, role assumption)
//! - `aws.rs` - AWS Secrets Manager implementation

pub mod auth;
pub mod aws;

// Re-export public API
pub use aws::AwsSecretStore;

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Describe output reduced to what the version ledger needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSecretMetadata {
    pub name: String,
    pub arn: String,
    pub kms_key_id: Option<String>,
    /// Version id to the stages attached to that version.
    pub version_ids_to_stages: HashMap<String, Vec<String>>,
    /// Resource tag key to value.
    pub tags: HashMap<String, String>,
}

/// Store operations the workflow needs, one method per API call.
///
/// Keeping the mapping one-to-one lets tests count exactly which mutations
/// a run performed.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Region the store client talks to.
    fn region(&self) -> &str;

    /// Account id behind the active credentials.
    async fn caller_account(&self) -> Result<String>;

    /// Metadata for `name`, or `None` when the secret does not exist yet.
    async fn describe(&self, name: &str) -> Result<Option<RawSecretMetadata>>;

    /// Create `name` encrypted with `kms_key_arn`, seeded with `placeholder`
    /// so the secret exists without a real version.
    async fn create(
        &self,
        name: &str,
        kms_key_arn: &str,
        placeholder: &str,
    ) -> Result<RawSecretMetadata>;

    /// Push `value` as version `version_id` and stage it as current.
    ///
    /// The version also gets a stage named after its own id, which keeps it
    /// listed once a newer version takes over the current stage.
    async fn put_value(&self, name: &str, version_id: &str, value: &str) -> Result<()>;

    /// Attach or overwrite resource tags.
    async fn tag(&self, name: &str, tags: &[(String, String)]) -> Result<()>;

    /// Remove resource tags by key. Unknown keys are ignored by the store.
    async fn untag_keys(&self, name: &str, keys: &[String]) -> Result<()>;

    /// Detach `version_id`'s self-named stage, letting the store expire
    /// the version.
    async fn remove_version_from_current_stages(&self, name: &str, version_id: &str)
        -> Result<()>;
}
