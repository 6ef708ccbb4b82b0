//! # Constants
//!
//! Fixed values of the version-lifecycle protocol. The ceiling and the tag
//! schema are part of the persisted state contract and are deliberately not
//! configurable.

/// Maximum number of enumerable versions a secret may carry before the
/// oldest one is evicted. Eviction fires at most once per run.
pub const MAX_VERSION_COUNT: usize = 18;

/// Stage label Secrets Manager attaches to the active version.
pub const CURRENT_STAGE: &str = "AWSCURRENT";

/// Prefix of the per-version provenance tag (`version:<hash>`).
pub const VERSION_TAG_PREFIX: &str = "version:";

/// Resource tag holding the origin remote URL.
pub const SOURCE_INFO_TAG: &str = "sourceInfo";

/// Resource tag pointing at the hash of the most recently tagged version.
pub const LATEST_VERSION_TAG: &str = "version:latest";

/// Region used when neither `AWS_DEFAULT_REGION` nor `AWS_REGION` is set.
pub const DEFAULT_REGION: &str = "eu-central-1";

/// Default SOPS file consumed when `--file` is not given.
pub const DEFAULT_SOPS_FILE: &str = "sops.json";

/// Placeholder value written when a secret is auto-created. Replaced by the
/// first real version in the same run.
pub const INITIAL_SECRET_VALUE: &str = "init";

/// Session name used when assuming a role for store access.
pub const ROLE_SESSION_NAME: &str = "secretsmanager-versioning";

/// Returns the resource tag key carrying provenance for one version.
pub fn version_tag_key(hash: &str) -> String {
    format!("{VERSION_TAG_PREFIX}{hash}")
}
