//! # Store Authentication
//!
//! Assembles the AWS SDK configuration: region from the run configuration,
//! an optional HTTPS proxy, and an optional IAM role assumed on top of the
//! ambient credential chain.

use crate::config::StoreConfig;
use crate::constants::ROLE_SESSION_NAME;
use anyhow::{anyhow, Result};
use aws_config::sts::AssumeRoleProvider;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_smithy_http_client::proxy::ProxyConfig;
use aws_smithy_http_client::tls::rustls_provider::CryptoMode;
use aws_smithy_http_client::tls::Provider;
use aws_smithy_http_client::{Builder as HttpClientBuilder, Connector};
use tracing::info;

/// Build the SDK config for `config`.
///
/// Role assumption goes through STS with the same region and proxy, so a
/// locked-down network only needs the proxy variable set once.
pub async fn load_sdk_config(config: &StoreConfig) -> Result<SdkConfig> {
    let http_client = match &config.proxy_url {
        Some(proxy_url) => {
            info!("Routing store requests through proxy {}", proxy_url);
            let proxy = ProxyConfig::https(proxy_url)
                .map_err(|err| anyhow!("invalid proxy url {proxy_url}: {err}"))?;
            // The high-level builder has no proxy hook, so the proxy is
            // applied to each connector as it is constructed, carrying the
            // requested settings and sleep impl along.
            let client =
                HttpClientBuilder::new().build_with_connector_fn(move |settings, components| {
                    let mut connector = Connector::builder().proxy_config(proxy.clone());
                    if let Some(settings) = settings {
                        connector = connector.connector_settings(settings.clone());
                    }
                    if let Some(sleep) = components.and_then(|c| c.sleep_impl()) {
                        connector = connector.sleep_impl(sleep);
                    }
                    connector
                        .tls_provider(Provider::Rustls(CryptoMode::Ring))
                        .build()
                });
            Some(client)
        }
        None => None,
    };

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()));
    if let Some(client) = http_client.clone() {
        loader = loader.http_client(client);
    }
    let base = loader.load().await;

    let Some(role_arn) = &config.role_arn else {
        return Ok(base);
    };

    info!("Assuming role {} for store access", role_arn);
    let provider = AssumeRoleProvider::builder(role_arn.clone())
        .session_name(ROLE_SESSION_NAME)
        .configure(&base)
        .build()
        .await;

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(provider);
    if let Some(client) = http_client {
        loader = loader.http_client(client);
    }
    Ok(loader.load().await)
}
