//! Secrets Manager Versioning Library
//!
//! Core functionality for pushing SOPS-encrypted secret files into AWS
//! Secrets Manager as hash-identified, provenance-tagged versions.
//! Tests for the pure logic live next to the modules; workflow-level tests
//! are in `tests/`.

pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod hash;
pub mod ledger;
pub mod sops;
pub mod store;
pub mod workflow;

// Re-export the workflow entry points for convenience
pub use config::StoreConfig;
pub use error::VersioningError;
pub use git::{GitCli, RevisionInfo, RevisionSource};
pub use ledger::{SecretRecord, SecretVersion};
pub use sops::{SecretSource, SopsFile};
pub use store::{AwsSecretStore, RawSecretMetadata, SecretStore};
pub use workflow::{update_secret_version, UpdateOutcome};
