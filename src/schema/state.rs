//! # Resource State
//!
//! The record the host engine persists between reconciliations.

use super::CertificateConfig;
use serde::{Deserialize, Serialize};

/// Attributes owned by Azure, refreshed on every read
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComputedAttributes {
    pub friendly_name: Option<String>,
    pub subject_name: Option<String>,
    #[serde(default)]
    pub host_names: Vec<String>,
    pub issuer: Option<String>,
    /// RFC 3339, second precision
    pub issue_date: Option<String>,
    /// RFC 3339, second precision
    pub expiration_date: Option<String>,
    pub thumbprint: Option<String>,
}

/// One managed certificate as tracked by the host engine
///
/// `id` is the retained identity. An empty identity after a read means the
/// remote object is gone and the record should be dropped from tracked state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceData {
    #[serde(default)]
    pub id: Option<String>,
    pub config: CertificateConfig,
    #[serde(default)]
    pub attributes: ComputedAttributes,
}

impl ResourceData {
    /// Record for a resource that has not been created yet
    pub fn new(config: CertificateConfig) -> Self {
        Self {
            id: None,
            config,
            attributes: ComputedAttributes::default(),
        }
    }

    /// Record holding only an identity, as used by read, delete and import
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// True when no identity is retained, i.e. the next create/update is a creation
    #[must_use]
    pub fn is_new_resource(&self) -> bool {
        self.id.as_deref().map_or(true, str::is_empty)
    }

    /// Replace the desired configuration while keeping identity and computed attributes
    pub fn with_config(mut self, config: CertificateConfig) -> Self {
        self.config = config;
        self
    }
}
