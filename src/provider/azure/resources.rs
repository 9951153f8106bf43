//! Key Vault lookup through the Resources API.
//!
//! A Key Vault secret URL only names the vault's data-plane host. The vault's
//! management-plane ID is found by listing vaults with the same name in the
//! subscription and comparing each one's `vaultUri` with the URL.

use super::rest::ArmClient;
use crate::constants::{
    KEY_VAULTS_RESOURCE_TYPE, KEY_VAULT_API_VERSION, KEY_VAULT_PROVIDER_NAMESPACE,
    RESOURCES_API_VERSION, RESOURCE_LIST_PAGE_SIZE,
};
use crate::parse::{vault_name_from_base_url, VaultId};
use crate::provider::{ApiError, KeyVaultLocator};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};

const RESOURCES_API: &str = "resources";
const VAULTS_API: &str = "vaults";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceListResult {
    #[serde(default)]
    value: Vec<GenericResource>,
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenericResource {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Vault {
    properties: Option<VaultProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VaultProperties {
    vault_uri: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResourcesClient {
    arm: Arc<ArmClient>,
}

impl ResourcesClient {
    pub fn new(arm: Arc<ArmClient>) -> Self {
        Self { arm }
    }

    /// IDs of every Key Vault named `vault_name` in the subscription, following `nextLink`
    async fn list_vaults_named(&self, vault_name: &str) -> Result<Vec<String>, ApiError> {
        let filter = format!(
            "resourceType eq '{KEY_VAULT_PROVIDER_NAMESPACE}/{KEY_VAULTS_RESOURCE_TYPE}' and name eq '{vault_name}'"
        );
        let query = [("$filter", filter.as_str()), ("$top", RESOURCE_LIST_PAGE_SIZE)];
        let first_page = self
            .arm
            .resource_url(["subscriptions", self.arm.subscription_id(), "resources"])?;

        let mut ids = Vec::new();
        let mut page: ResourceListResult = self
            .arm
            .get_json(RESOURCES_API, first_page, RESOURCES_API_VERSION, &query)
            .await?;
        loop {
            ids.extend(page.value.into_iter().filter_map(|resource| resource.id));
            match page.next_link.filter(|link| !link.is_empty()) {
                Some(next_link) => {
                    page = self.arm.get_next_page(RESOURCES_API, &next_link).await?;
                }
                None => break,
            }
        }
        Ok(ids)
    }
}

#[async_trait]
impl KeyVaultLocator for ResourcesClient {
    async fn key_vault_ids_from_base_url(&self, base_url: &str) -> Result<Vec<String>, ApiError> {
        let span = info_span!("azure.key_vault.resolve", base_url);
        async move {
            let Some(vault_name) = vault_name_from_base_url(base_url) else {
                return Ok(Vec::new());
            };

            let mut matches = Vec::new();
            for listed_id in self.list_vaults_named(vault_name).await? {
                let vault_id: VaultId = listed_id.parse().map_err(|e| {
                    ApiError::UnexpectedResponse(format!("listed Key Vault ID: {e}"))
                })?;
                let vault_url = self.arm.resource_url(vault_id.path_segments())?;
                let vault: Vault = self
                    .arm
                    .get_json(VAULTS_API, vault_url, KEY_VAULT_API_VERSION, &[])
                    .await?;
                let vault_uri = vault.properties.and_then(|properties| properties.vault_uri);
                debug!(vault_id = %vault_id, vault_uri = ?vault_uri, "Comparing Key Vault URI");
                if vault_uri.is_some_and(|uri| base_urls_match(&uri, base_url)) {
                    matches.push(vault_id.to_string());
                }
            }
            Ok(matches)
        }
        .instrument(span)
        .await
    }
}

/// Compare vault URIs ignoring case and a trailing slash
fn base_urls_match(vault_uri: &str, base_url: &str) -> bool {
    vault_uri
        .trim_end_matches('/')
        .eq_ignore_ascii_case(base_url.trim_end_matches('/'))
}
