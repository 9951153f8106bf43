//! # Key Vault ID

use super::{parse_resource_id, ParseError};
use crate::constants::{KEY_VAULTS_RESOURCE_TYPE, KEY_VAULT_PROVIDER_NAMESPACE};
use std::fmt;
use std::str::FromStr;

/// Management-plane ID of a Key Vault
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VaultId {
    pub subscription_id: String,
    pub resource_group: String,
    pub name: String,
}

impl VaultId {
    /// Unescaped path segments of the ID, for building request URLs
    #[must_use]
    pub fn path_segments(&self) -> [&str; 8] {
        [
            "subscriptions",
            &self.subscription_id,
            "resourceGroups",
            &self.resource_group,
            "providers",
            KEY_VAULT_PROVIDER_NAMESPACE,
            KEY_VAULTS_RESOURCE_TYPE,
            &self.name,
        ]
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{KEY_VAULT_PROVIDER_NAMESPACE}/{KEY_VAULTS_RESOURCE_TYPE}/{}",
            self.subscription_id, self.resource_group, self.name
        )
    }
}

impl FromStr for VaultId {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts = parse_resource_id(
            input,
            "Key Vault",
            KEY_VAULT_PROVIDER_NAMESPACE,
            KEY_VAULTS_RESOURCE_TYPE,
        )?;
        Ok(Self {
            subscription_id: parts.subscription_id,
            resource_group: parts.resource_group,
            name: parts.name,
        })
    }
}
