//! # Azure Credential Selection
//!
//! Chooses how Resource Manager tokens are acquired, based on the environment.

use super::controller::env_var_non_empty;
use crate::sensitive::Sensitive;

/// Credential used to authenticate against Azure Resource Manager
///
/// Selection order in [`AzureCredential::from_env`]:
/// 1. `AZURE_ACCESS_TOKEN` - a pre-acquired bearer token
/// 2. `AZURE_TENANT_ID` + `AZURE_CLIENT_ID` + `AZURE_CLIENT_SECRET` - service principal
/// 3. Managed Identity (optionally user-assigned via `AZURE_CLIENT_ID`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AzureCredential {
    /// Pre-acquired bearer token
    AccessToken(Sensitive<String>),
    /// Service principal with a client secret
    ClientSecret {
        tenant_id: String,
        client_id: String,
        client_secret: Sensitive<String>,
    },
    /// Managed Identity via the instance metadata service
    ManagedIdentity { client_id: Option<String> },
}

impl AzureCredential {
    /// Select a credential from environment variables
    pub fn from_env() -> Self {
        if let Some(token) = env_var_non_empty("AZURE_ACCESS_TOKEN") {
            return Self::AccessToken(Sensitive::new(token));
        }

        let client_id = env_var_non_empty("AZURE_CLIENT_ID");
        match (
            env_var_non_empty("AZURE_TENANT_ID"),
            client_id.clone(),
            env_var_non_empty("AZURE_CLIENT_SECRET"),
        ) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => Self::ClientSecret {
                tenant_id,
                client_id,
                client_secret: Sensitive::new(client_secret),
            },
            _ => Self::ManagedIdentity { client_id },
        }
    }

    /// Short label for logging
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AzureCredential::AccessToken(_) => "access-token",
            AzureCredential::ClientSecret { .. } => "client-secret",
            AzureCredential::ManagedIdentity { .. } => "managed-identity",
        }
    }
}
