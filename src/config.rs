//! # Store Configuration
//!
//! Environment-derived settings for reaching the secret store.
//!
//! The environment is read exactly once, at process start, by the CLI layer;
//! everything below the composition root receives this snapshot by value and
//! never touches `std::env` itself.

use crate::constants::DEFAULT_REGION;

/// Connection settings for the secret store gateway.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Effective region for store calls and for embedded-key matching.
    pub region: String,
    /// Outbound HTTPS proxy, if one is configured.
    pub proxy_url: Option<String>,
    /// Role to assume for all store calls; `None` uses the default
    /// credential chain.
    pub role_arn: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            proxy_url: None,
            role_arn: None,
        }
    }
}

impl StoreConfig {
    /// Snapshot the process environment.
    ///
    /// `AWS_DEFAULT_REGION` wins over `AWS_REGION`; both fall back to
    /// [`DEFAULT_REGION`]. `HTTPS_PROXY` wins over `https_proxy`.
    pub fn from_env() -> Self {
        Self {
            region: first_env_var(&["AWS_DEFAULT_REGION", "AWS_REGION"])
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            proxy_url: first_env_var(&["HTTPS_PROXY", "https_proxy"]),
            role_arn: None,
        }
    }

    /// Attach the role passed on the command line.
    #[must_use]
    pub fn with_role(mut self, role_arn: Option<String>) -> Self {
        self.role_arn = role_arn;
        self
    }
}

/// First set, non-empty environment variable among `keys`.
fn first_env_var(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
}
