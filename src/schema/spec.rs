//! # Certificate Configuration
//!
//! The desired state of one App Service certificate.

use crate::sensitive::Sensitive;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Desired configuration of an App Service certificate
///
/// # Example
///
/// ```yaml
/// name: www-example-com
/// resource_group_name: web-prod
/// location: West Europe
/// key_vault_secret_id: https://prod-vault.vault.azure.net/secrets/www-example-com
/// app_service_plan_id: /subscriptions/.../resourceGroups/web-prod/providers/Microsoft.Web/serverfarms/plan1
/// tags:
///   environment: production
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct CertificateConfig {
    /// Name of the certificate. Changing this forces a new resource.
    pub name: String,
    /// Resource group holding the certificate. Changing this forces a new resource.
    pub resource_group_name: String,
    /// Azure location. Changing this forces a new resource.
    pub location: String,
    /// Base64-encoded PKCS#12 archive. Conflicts with `key_vault_secret_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub pfx_blob: Option<Sensitive<String>>,
    /// Password of the PKCS#12 archive. Conflicts with `key_vault_secret_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub password: Option<Sensitive<String>>,
    /// Key Vault secret holding the certificate. Conflicts with `pfx_blob` and `password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_vault_secret_id: Option<String>,
    /// App Service plan the certificate is scoped to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_service_plan_id: Option<String>,
    /// Deprecated: replaced by `app_service_plan_id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosting_environment_profile_id: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    /// Per-operation timeout overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeouts: Option<TimeoutsConfig>,
}

/// Per-operation timeout overrides
/// Format: duration string (e.g., "30s", "5m", "1h", "1d")
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct TimeoutsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<String>,
}

impl CertificateConfig {
    /// Convenience accessor for the configured PFX blob
    pub fn pfx_blob(&self) -> Option<&str> {
        self.pfx_blob.as_ref().map(|blob| blob.expose().as_str())
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|password| password.expose().as_str())
    }
}
