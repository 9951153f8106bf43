//! # Key Vault Nested Item ID
//!
//! Decomposes a Key Vault item URL such as
//! `https://my-vault.vault.azure.net/secrets/my-cert/0123456789abcdef`
//! into the vault base URL, the item collection, name and optional version.

use super::ParseError;
use reqwest::Url;

/// Collections a certificate can be sourced from
const ALLOWED_COLLECTIONS: [&str; 2] = ["secrets", "certificates"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedItemId {
    /// `scheme://host[:port]/`, always with a trailing slash
    pub vault_base_url: String,
    /// `secrets` or `certificates`
    pub nested_item_type: String,
    pub name: String,
    pub version: Option<String>,
}

impl NestedItemId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let error = |reason: &str| ParseError::NestedItem {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if input.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let url = Url::parse(input).map_err(|e| error(&format!("not a valid URL: {e}")))?;
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| error("the URL has no host"))?;

        let vault_base_url = match url.port() {
            Some(port) => format!("{}://{host}:{port}/", url.scheme()),
            None => format!("{}://{host}/", url.scheme()),
        };

        let components: Vec<&str> = url.path().trim_matches('/').split('/').collect();
        let (nested_item_type, name, version) = match components.as_slice() {
            [collection, name] => (*collection, *name, None),
            [collection, name, version] => (*collection, *name, Some(*version)),
            _ => {
                return Err(error(
                    "the path should have 2 or 3 segments ({collection}/{name}[/{version}])",
                ))
            }
        };

        if !ALLOWED_COLLECTIONS.contains(&nested_item_type) {
            return Err(error(&format!(
                "expected the collection to be one of {ALLOWED_COLLECTIONS:?}, got {nested_item_type:?}"
            )));
        }
        if name.is_empty() {
            return Err(error("the item name is empty"));
        }

        Ok(Self {
            vault_base_url,
            nested_item_type: nested_item_type.to_string(),
            name: name.to_string(),
            version: version.filter(|v| !v.is_empty()).map(str::to_string),
        })
    }

    /// Vault name, taken from the first label of the host
    #[must_use]
    pub fn vault_name(&self) -> Option<&str> {
        vault_name_from_base_url(&self.vault_base_url)
    }
}

/// Extract the vault name (first host label) from a vault base URL
pub fn vault_name_from_base_url(base_url: &str) -> Option<&str> {
    let without_scheme = base_url.split_once("://").map_or(base_url, |(_, rest)| rest);
    without_scheme
        .split(['.', '/', ':'])
        .next()
        .filter(|label| !label.is_empty())
}
