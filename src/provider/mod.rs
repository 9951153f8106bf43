//! # Provider Modules
//!
//! Remote collaborators the controller talks to.
//!
//! - `CertificatesApi`: the Microsoft.Web certificates API
//! - `KeyVaultLocator`: resolves a Key Vault base URL to its management-plane ID
//!
//! Both are traits so the reconciliation operations can run against in-memory
//! fakes in tests and against Azure Resource Manager in production.

use async_trait::async_trait;
use thiserror::Error;

pub mod azure;
pub mod models;

pub use models::{Certificate, CertificateProperties, HostingEnvironmentProfile};

/// Failure of a single remote call
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed object does not exist (HTTP 404)
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Any other non-success status, with the Azure error code when the body carried one
    #[error("unexpected status {status} ({code}): {message}")]
    Status {
        status: u16,
        code: String,
        message: String,
    },

    #[error("sending request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("decoding response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Token acquisition failed
    #[error("authenticating: {0}")]
    Auth(String),

    /// A request URL that cannot be built, or a `nextLink` outside the endpoint
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// A success response whose content cannot be used
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ApiError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Microsoft.Web certificates API
#[async_trait]
pub trait CertificatesApi: Send + Sync {
    /// Fetch a certificate; `ApiError::NotFound` when it does not exist
    async fn get(&self, resource_group: &str, name: &str) -> Result<Certificate, ApiError>;

    /// Create the certificate, or replace it when it already exists
    async fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        envelope: &Certificate,
    ) -> Result<Certificate, ApiError>;

    async fn delete(&self, resource_group: &str, name: &str) -> Result<(), ApiError>;
}

/// Resolves Key Vault base URLs to management-plane resource IDs
#[async_trait]
pub trait KeyVaultLocator: Send + Sync {
    /// IDs of every vault whose URI matches `base_url`
    ///
    /// An empty result means no vault in the subscription matches.
    async fn key_vault_ids_from_base_url(&self, base_url: &str) -> Result<Vec<String>, ApiError>;
}
