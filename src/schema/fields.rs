//! # Field Metadata
//!
//! Describes each configuration field the way the host engine needs to know it:
//! whether a change forces a new resource, whether the value is sensitive, and
//! whether the field is deprecated.

use super::CertificateConfig;
use crate::normalize::normalize_location;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    /// Set by Azure when left unset
    pub computed: bool,
    /// Changing the value replaces the remote object
    pub force_new: bool,
    pub sensitive: bool,
    pub deprecated: Option<&'static str>,
    pub conflicts_with: &'static [&'static str],
}

impl FieldSpec {
    const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            computed: false,
            force_new: false,
            sensitive: false,
            deprecated: None,
            conflicts_with: &[],
        }
    }
}

pub const CERTIFICATE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        required: true,
        force_new: true,
        ..FieldSpec::optional("name")
    },
    FieldSpec {
        required: true,
        force_new: true,
        ..FieldSpec::optional("resource_group_name")
    },
    FieldSpec {
        required: true,
        force_new: true,
        ..FieldSpec::optional("location")
    },
    FieldSpec {
        force_new: true,
        sensitive: true,
        ..FieldSpec::optional("pfx_blob")
    },
    FieldSpec {
        force_new: true,
        sensitive: true,
        ..FieldSpec::optional("password")
    },
    FieldSpec {
        force_new: true,
        conflicts_with: &["pfx_blob", "password"],
        ..FieldSpec::optional("key_vault_secret_id")
    },
    FieldSpec {
        force_new: true,
        ..FieldSpec::optional("app_service_plan_id")
    },
    FieldSpec {
        computed: true,
        deprecated: Some(
            "This property has been deprecated and replaced with `app_service_plan_id`",
        ),
        ..FieldSpec::optional("hosting_environment_profile_id")
    },
    FieldSpec::optional("tags"),
];

/// Value of a force-new field in comparable form
fn comparable_value<'a>(config: &'a CertificateConfig, field: &str) -> Option<Cow<'a, str>> {
    match field {
        "name" => Some(Cow::Borrowed(config.name.as_str())),
        "resource_group_name" => Some(Cow::Borrowed(config.resource_group_name.as_str())),
        "location" => Some(Cow::Owned(normalize_location(&config.location))),
        "pfx_blob" => config.pfx_blob().map(Cow::Borrowed),
        "password" => config.password().map(Cow::Borrowed),
        "key_vault_secret_id" => config.key_vault_secret_id.as_deref().map(Cow::Borrowed),
        "app_service_plan_id" => config.app_service_plan_id.as_deref().map(Cow::Borrowed),
        _ => None,
    }
}

impl CertificateConfig {
    /// Force-new fields whose values differ from `prior`
    ///
    /// A non-empty result means applying this configuration requires replacing
    /// the remote certificate rather than updating it in place.
    pub fn replacement_fields(&self, prior: &CertificateConfig) -> Vec<&'static str> {
        CERTIFICATE_FIELDS
            .iter()
            .filter(|field| field.force_new)
            .filter(|field| comparable_value(self, field.name) != comparable_value(prior, field.name))
            .map(|field| field.name)
            .collect()
    }

    /// Deprecation notices for deprecated fields that are set
    pub fn deprecation_warnings(&self) -> Vec<(&'static str, &'static str)> {
        CERTIFICATE_FIELDS
            .iter()
            .filter_map(|field| field.deprecated.map(|notice| (field.name, notice)))
            .filter(|(name, _)| match *name {
                "hosting_environment_profile_id" => self.hosting_environment_profile_id.is_some(),
                _ => false,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensitive::Sensitive;

    fn base() -> CertificateConfig {
        CertificateConfig {
            name: "cert1".to_string(),
            resource_group_name: "rg1".to_string(),
            location: "westus".to_string(),
            pfx_blob: Some(Sensitive::new("aGVsbG8=".to_string())),
            password: Some(Sensitive::new("p".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_identical_config_needs_no_replacement() {
        assert!(base().replacement_fields(&base()).is_empty());
    }

    #[test]
    fn test_location_compared_normalised() {
        let mut desired = base();
        desired.location = "West US".to_string();
        assert!(desired.replacement_fields(&base()).is_empty());

        desired.location = "East US".to_string();
        assert_eq!(desired.replacement_fields(&base()), vec!["location"]);
    }

    #[test]
    fn test_tag_changes_update_in_place() {
        let mut desired = base();
        desired.tags.insert("env".to_string(), "prod".to_string());
        assert!(desired.replacement_fields(&base()).is_empty());
    }

    #[test]
    fn test_switching_source_forces_replacement() {
        let mut desired = base();
        desired.pfx_blob = None;
        desired.password = None;
        desired.key_vault_secret_id =
            Some("https://v.vault.azure.net/secrets/cert1".to_string());
        assert_eq!(
            desired.replacement_fields(&base()),
            vec!["pfx_blob", "password", "key_vault_secret_id"]
        );
    }

    #[test]
    fn test_deprecated_field_warning() {
        assert!(base().deprecation_warnings().is_empty());

        let mut desired = base();
        desired.hosting_environment_profile_id = Some("/subscriptions/s/hosting".to_string());
        let warnings = desired.deprecation_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].0, "hosting_environment_profile_id");
    }

    #[test]
    fn test_only_key_vault_declares_conflicts() {
        let conflicting: Vec<_> = CERTIFICATE_FIELDS
            .iter()
            .filter(|field| !field.conflicts_with.is_empty())
            .map(|field| field.name)
            .collect();
        assert_eq!(conflicting, vec!["key_vault_secret_id"]);
    }
}
