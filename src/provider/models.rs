//! # Certificate Wire Models
//!
//! JSON payloads of the Microsoft.Web certificates API (`2021-02-01`).
//! Every property is optional; absent values are omitted when serializing.
//!
//! API Reference: https://learn.microsoft.com/en-us/rest/api/appservice/certificates

use crate::sensitive::{base64_bytes, Sensitive};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Certificate resource envelope, used for both requests and responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Certificate {
    /// Set by Azure; never sent
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default, skip_serializing)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<CertificateProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateProperties {
    /// Decoded PKCS#12 bytes, base64 on the wire
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64_bytes")]
    pub pfx_blob: Option<Sensitive<Vec<u8>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Sensitive<String>>,
    /// App Service plan ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_farm_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_vault_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_vault_secret_name: Option<String>,

    // Read-only, populated by Azure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosting_environment_profile: Option<HostingEnvironmentProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostingEnvironmentProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
