//! # Azure Resource Manager Provider
//!
//! REST implementation of the remote collaborators:
//!
//! - `WebCertificatesClient`: Microsoft.Web certificates
//! - `ResourcesClient`: Key Vault ID resolution through Microsoft.Resources and Microsoft.KeyVault

mod auth;
mod rest;
mod resources;
mod web_certificates;

pub use resources::ResourcesClient;
pub use rest::ArmClient;
pub use web_certificates::WebCertificatesClient;

use crate::config::ControllerConfig;
use crate::controller::Clients;
use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

/// Build fresh API clients for one invocation
///
/// # Errors
/// Returns an error if the subscription is not configured, the HTTP client
/// cannot be built, or no token can be acquired
pub async fn connect(config: &ControllerConfig) -> Result<Clients> {
    let subscription_id = config
        .subscription_id
        .clone()
        .context("AZURE_SUBSCRIPTION_ID must be set")?;

    let http_client = Client::builder()
        .timeout(config.http_timeout_duration())
        .build()
        .context("Failed to create HTTP client")?;

    let access_token = auth::acquire_token(&http_client, config)
        .await
        .context("Failed to acquire Azure Resource Manager token")?;

    info!(
        endpoint = %config.arm_endpoint,
        subscription_id = %subscription_id,
        "Initialized Azure Resource Manager clients"
    );

    let arm = Arc::new(ArmClient::new(
        http_client,
        &config.arm_endpoint,
        subscription_id,
        access_token,
    ));

    Ok(Clients::new(
        Arc::new(WebCertificatesClient::new(Arc::clone(&arm))),
        Arc::new(ResourcesClient::new(arm)),
    ))
}
