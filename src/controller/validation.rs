//! # Configuration Validation
//!
//! Pure, local checks run before any remote call. [`validate_config`] also
//! resolves the flat payload fields into a [`CertificateSource`].

use crate::constants::{MAX_TAGS, MAX_TAG_KEY_LENGTH, MAX_TAG_VALUE_LENGTH};
use crate::error::CertificateError;
use crate::parse::NestedItemId;
use crate::schema::{CertificateConfig, CERTIFICATE_FIELDS};
use crate::sensitive::Sensitive;
use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use std::collections::HashMap;

/// Where the certificate payload comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateSource {
    /// Decoded PKCS#12 archive supplied in the configuration
    InlinePfx {
        blob: Sensitive<Vec<u8>>,
        password: Sensitive<String>,
    },
    /// Secret in Key Vault; the vault ID is resolved at apply time
    VaultReference(NestedItemId),
}

/// Validate the whole configuration and resolve the payload source
pub fn validate_config(config: &CertificateConfig) -> Result<CertificateSource, CertificateError> {
    validate_name(&config.name)?;
    validate_resource_group_name(&config.resource_group_name)?;
    if config.location.trim().is_empty() {
        return Err(CertificateError::configuration("`location` must not be empty"));
    }
    if config.password().is_some_and(str::is_empty) {
        return Err(CertificateError::configuration(
            "`password` must not be empty when set",
        ));
    }
    validate_tags(&config.tags)?;
    resolve_source(config)
}

fn validate_name(name: &str) -> Result<(), CertificateError> {
    if name.trim().is_empty() {
        return Err(CertificateError::configuration("`name` must not be empty"));
    }
    Ok(())
}

/// Resource group names: 1-90 of letters, digits, `-`, `_`, `.`, `(`, `)`, not ending in `.`
fn validate_resource_group_name(value: &str) -> Result<(), CertificateError> {
    let pattern = Regex::new(r"^[-\w\.\(\)]{1,90}$").map_err(|e| {
        CertificateError::configuration(format!("Failed to compile resource group regex: {e}"))
    })?;

    if !pattern.is_match(value) {
        return Err(CertificateError::configuration(format!(
            "`resource_group_name` {value:?} may only contain alphanumeric characters, dash, underscores, parentheses and periods, and must be 1-90 characters long"
        )));
    }
    if value.ends_with('.') {
        return Err(CertificateError::configuration(format!(
            "`resource_group_name` {value:?} cannot end with a period"
        )));
    }
    Ok(())
}

fn validate_tags(tags: &HashMap<String, String>) -> Result<(), CertificateError> {
    if tags.len() > MAX_TAGS {
        return Err(CertificateError::configuration(format!(
            "a maximum of {MAX_TAGS} tags can be applied to each ARM resource"
        )));
    }

    for (key, value) in tags {
        let key_length = key.chars().count();
        if key_length > MAX_TAG_KEY_LENGTH {
            return Err(CertificateError::configuration(format!(
                "the maximum length for a tag key is {MAX_TAG_KEY_LENGTH} characters: {key:?} is {key_length} characters"
            )));
        }
        let value_length = value.chars().count();
        if value_length > MAX_TAG_VALUE_LENGTH {
            return Err(CertificateError::configuration(format!(
                "the maximum length for a tag value is {MAX_TAG_VALUE_LENGTH} characters: the value for {key:?} is {value_length} characters"
            )));
        }
    }
    Ok(())
}

fn is_set(config: &CertificateConfig, field: &str) -> bool {
    let value = match field {
        "pfx_blob" => config.pfx_blob(),
        "password" => config.password(),
        "key_vault_secret_id" => config.key_vault_secret_id.as_deref(),
        _ => None,
    };
    value.is_some_and(|v| !v.is_empty())
}

/// Resolve the payload source from the mutually exclusive payload fields
pub fn resolve_source(config: &CertificateConfig) -> Result<CertificateSource, CertificateError> {
    for field in CERTIFICATE_FIELDS.iter().filter(|f| is_set(config, f.name)) {
        if let Some(other) = field.conflicts_with.iter().find(|other| is_set(config, other)) {
            return Err(CertificateError::configuration(format!(
                "`{}` conflicts with `{other}`",
                field.name
            )));
        }
    }

    if is_set(config, "key_vault_secret_id") {
        let secret_id = config.key_vault_secret_id.as_deref().unwrap_or_default();
        return Ok(CertificateSource::VaultReference(NestedItemId::parse(
            secret_id,
        )?));
    }

    let Some(blob) = config.pfx_blob().filter(|blob| !blob.is_empty()) else {
        return Err(CertificateError::configuration(
            "Either `pfx_blob` or `key_vault_secret_id` must be set",
        ));
    };

    let decoded = general_purpose::STANDARD
        .decode(blob.as_bytes())
        .map_err(|e| CertificateError::configuration(format!("Could not decode PFX blob: {e}")))?;

    Ok(CertificateSource::InlinePfx {
        blob: Sensitive::new(decoded),
        password: Sensitive::new(config.password().unwrap_or_default().to_string()),
    })
}
