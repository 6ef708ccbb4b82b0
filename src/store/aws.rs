//! # AWS Secrets Manager Store
//!
//! [`SecretStore`] implementation backed by AWS Secrets Manager, with the
//! caller account resolved through STS. Content hashes double as the
//! `ClientRequestToken`, which is what makes version pushes idempotent on
//! the API side.

use super::auth::load_sdk_config;
use super::{RawSecretMetadata, SecretStore};
use crate::config::StoreConfig;
use crate::constants::CURRENT_STAGE;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_secretsmanager::operation::describe_secret::DescribeSecretOutput;
use aws_sdk_secretsmanager::types::Tag;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use aws_sdk_sts::Client as StsClient;
use std::collections::HashMap;

/// AWS Secrets Manager store client.
pub struct AwsSecretStore {
    client: SecretsManagerClient,
    sts: StsClient,
    region: String,
}

impl std::fmt::Debug for AwsSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretStore")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl AwsSecretStore {
    /// Connect using the given run configuration.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let sdk_config = load_sdk_config(config).await?;

        Ok(Self {
            client: SecretsManagerClient::new(&sdk_config),
            sts: StsClient::new(&sdk_config),
            region: config.region.clone(),
        })
    }
}

fn metadata_from_describe(output: DescribeSecretOutput, requested_name: &str) -> RawSecretMetadata {
    let tags = output
        .tags()
        .iter()
        .filter_map(|tag| Some((tag.key()?.to_string(), tag.value()?.to_string())))
        .collect();

    RawSecretMetadata {
        name: output.name().unwrap_or(requested_name).to_string(),
        arn: output.arn().unwrap_or_default().to_string(),
        kms_key_id: output.kms_key_id().map(ToString::to_string),
        version_ids_to_stages: output.version_ids_to_stages().cloned().unwrap_or_default(),
        tags,
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    fn region(&self) -> &str {
        &self.region
    }

    async fn caller_account(&self) -> Result<String> {
        let identity = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .context("failed to resolve caller identity")?;

        identity
            .account()
            .map(ToString::to_string)
            .ok_or_else(|| anyhow!("caller identity has no account id"))
    }

    async fn describe(&self, name: &str) -> Result<Option<RawSecretMetadata>> {
        let output = match self.client.describe_secret().secret_id(name).send().await {
            Ok(output) => output,
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|service| service.is_resource_not_found_exception())
                {
                    return Ok(None);
                }
                return Err(err).with_context(|| format!("failed to describe secret {name}"));
            }
        };

        Ok(Some(metadata_from_describe(output, name)))
    }

    async fn create(
        &self,
        name: &str,
        kms_key_arn: &str,
        placeholder: &str,
    ) -> Result<RawSecretMetadata> {
        let output = self
            .client
            .create_secret()
            .name(name)
            .kms_key_id(kms_key_arn)
            .secret_string(placeholder)
            .send()
            .await
            .with_context(|| format!("failed to create secret {name}"))?;

        // The placeholder version carries no provenance tag, so the fresh
        // secret behaves like one with an empty history.
        Ok(RawSecretMetadata {
            name: output.name().unwrap_or(name).to_string(),
            arn: output.arn().unwrap_or_default().to_string(),
            kms_key_id: Some(kms_key_arn.to_string()),
            version_ids_to_stages: HashMap::new(),
            tags: HashMap::new(),
        })
    }

    async fn put_value(&self, name: &str, version_id: &str, value: &str) -> Result<()> {
        self.client
            .put_secret_value()
            .secret_id(name)
            .client_request_token(version_id)
            .secret_string(value)
            .version_stages(CURRENT_STAGE)
            .version_stages(version_id)
            .send()
            .await
            .with_context(|| format!("failed to put new version of secret {name}"))?;

        Ok(())
    }

    async fn tag(&self, name: &str, tags: &[(String, String)]) -> Result<()> {
        let tags: Vec<Tag> = tags
            .iter()
            .map(|(key, value)| Tag::builder().key(key).value(value).build())
            .collect();

        self.client
            .tag_resource()
            .secret_id(name)
            .set_tags(Some(tags))
            .send()
            .await
            .with_context(|| format!("failed to tag secret {name}"))?;

        Ok(())
    }

    async fn untag_keys(&self, name: &str, keys: &[String]) -> Result<()> {
        self.client
            .untag_resource()
            .secret_id(name)
            .set_tag_keys(Some(keys.to_vec()))
            .send()
            .await
            .with_context(|| format!("failed to untag secret {name}"))?;

        Ok(())
    }

    async fn remove_version_from_current_stages(
        &self,
        name: &str,
        version_id: &str,
    ) -> Result<()> {
        self.client
            .update_secret_version_stage()
            .secret_id(name)
            .version_stage(version_id)
            .remove_from_version_id(version_id)
            .send()
            .await
            .with_context(|| {
                format!("failed to remove version {version_id} of secret {name}")
            })?;

        Ok(())
    }
}
