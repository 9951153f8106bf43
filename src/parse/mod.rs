//! # Identifier Parsing
//!
//! Parsers for the Azure identifiers the controller handles:
//!
//! - [`CertificateId`]: the retained identity of an App Service certificate
//! - [`VaultId`]: a Key Vault management-plane resource ID
//! - [`NestedItemId`]: a Key Vault secret/certificate URL

mod certificate_id;
mod nested_item_id;
mod vault_id;

pub use certificate_id::CertificateId;
pub use nested_item_id::{vault_name_from_base_url, NestedItemId};
pub use vault_id::VaultId;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("ID was empty")]
    Empty,
    #[error("parsing {input:?} as a {kind} ID: expected the format {expected}")]
    ResourceId {
        input: String,
        kind: &'static str,
        expected: String,
    },
    #[error("parsing {input:?} as a Key Vault nested item ID: {reason}")]
    NestedItem { input: String, reason: String },
}

/// Components of a resource-group scoped ARM resource ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResourceIdParts {
    pub subscription_id: String,
    pub resource_group: String,
    pub name: String,
}

/// Parse `/subscriptions/{s}/resourceGroups/{rg}/providers/{namespace}/{type}/{name}`
///
/// Literal segments match case-insensitively; values must be non-empty and
/// no segments may follow the name.
pub(crate) fn parse_resource_id(
    input: &str,
    kind: &'static str,
    namespace: &str,
    resource_type: &str,
) -> Result<ResourceIdParts, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let format_error = || ParseError::ResourceId {
        input: input.to_string(),
        kind,
        expected: format!(
            "/subscriptions/{{subscriptionId}}/resourceGroups/{{resourceGroupName}}/providers/{namespace}/{resource_type}/{{name}}"
        ),
    };

    let path = input.strip_prefix('/').ok_or_else(format_error)?;
    let segments: Vec<&str> = path.split('/').collect();

    let [subscriptions, subscription_id, resource_groups, resource_group, providers, provider_namespace, type_segment, name] =
        segments.as_slice()
    else {
        return Err(format_error());
    };

    let literals_match = subscriptions.eq_ignore_ascii_case("subscriptions")
        && resource_groups.eq_ignore_ascii_case("resourceGroups")
        && providers.eq_ignore_ascii_case("providers")
        && provider_namespace.eq_ignore_ascii_case(namespace)
        && type_segment.eq_ignore_ascii_case(resource_type);
    let values_present = [subscription_id, resource_group, name]
        .iter()
        .all(|value| !value.is_empty());

    if !literals_match || !values_present {
        return Err(format_error());
    }

    Ok(ResourceIdParts {
        subscription_id: (*subscription_id).to_string(),
        resource_group: (*resource_group).to_string(),
        name: (*name).to_string(),
    })
}
