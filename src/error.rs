//! # Errors
//!
//! Classification of everything that can go wrong while reconciling a certificate.
//! The host engine decides whether to retry; the controller never retries itself.

use crate::constants::RESOURCE_TYPE;
use crate::parse::ParseError;
use crate::provider::ApiError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CertificateError {
    /// Invalid or conflicting configuration, detected before any remote call
    #[error("{0}")]
    Configuration(String),

    /// Malformed identity string
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A certificate with the same name already exists and is not tracked
    #[error(
        "a resource with the ID {id:?} already exists - to be managed via this controller this resource needs to be imported into the state. Please see the documentation for {RESOURCE_TYPE} for more information."
    )]
    AlreadyExists { id: String },

    /// A remote call failed for a reason other than the target being absent
    #[error("{action} App Service Certificate {name:?} (Resource Group {resource_group:?}): {source}")]
    RemoteApi {
        action: &'static str,
        name: String,
        resource_group: String,
        source: ApiError,
    },

    #[error("retrieving the Resource ID for the Key Vault at URL {base_url:?}: {source}")]
    KeyVaultLookup { base_url: String, source: ApiError },

    #[error("unable to determine the Resource ID for the Key Vault at URL {base_url:?}")]
    KeyVaultNotFound { base_url: String },

    #[error("the Key Vault URL {base_url:?} matches more than one Key Vault: {ids:?}")]
    KeyVaultAmbiguous { base_url: String, ids: Vec<String> },

    /// The create/update call succeeded but the object cannot be observed afterwards
    #[error("cannot read App Service Certificate {name:?} (Resource Group {resource_group:?}) ID")]
    Inconsistency { name: String, resource_group: String },

    /// Import targeted an identity with no remote object
    #[error("cannot import non-existent remote object {id:?}")]
    ImportNotFound { id: String },

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

impl CertificateError {
    /// Stable label for metrics and logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            CertificateError::Configuration(_) => "configuration",
            CertificateError::Parse(_) => "parse",
            CertificateError::AlreadyExists { .. } => "already_exists",
            CertificateError::RemoteApi { .. } => "remote_api",
            CertificateError::KeyVaultLookup { .. }
            | CertificateError::KeyVaultNotFound { .. }
            | CertificateError::KeyVaultAmbiguous { .. } => "key_vault",
            CertificateError::Inconsistency { .. } => "inconsistency",
            CertificateError::ImportNotFound { .. } => "import_not_found",
            CertificateError::Timeout { .. } => "timeout",
        }
    }

    /// True for errors raised by local validation, before any remote call
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CertificateError::Configuration(_) | CertificateError::Parse(_)
        )
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        CertificateError::Configuration(message.into())
    }
}
