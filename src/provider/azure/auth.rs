//! Azure AD token acquisition for Resource Manager.
//!
//! Tokens are acquired once per invocation and never cached on disk.

use crate::config::{AzureCredential, ControllerConfig};
use crate::constants::{ARM_RESOURCE, ARM_SCOPE, IMDS_API_VERSION, IMDS_TOKEN_ENDPOINT};
use crate::provider::ApiError;
use crate::sensitive::Sensitive;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

/// OAuth2 token response (AAD v2 endpoint and IMDS share this shape)
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Sensitive<String>,
}

/// Acquire a bearer token for Azure Resource Manager
pub(crate) async fn acquire_token(
    http_client: &Client,
    config: &ControllerConfig,
) -> Result<Sensitive<String>, ApiError> {
    info!(credential = config.credential.as_str(), "Acquiring Azure Resource Manager token");

    match &config.credential {
        AzureCredential::AccessToken(token) => Ok(token.clone()),
        AzureCredential::ClientSecret {
            tenant_id,
            client_id,
            client_secret,
        } => {
            let url = format!(
                "{}/{tenant_id}/oauth2/v2.0/token",
                config.authority_host.trim_end_matches('/')
            );
            let form = [
                ("grant_type", "client_credentials"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.expose().as_str()),
                ("scope", ARM_SCOPE),
            ];
            let response = http_client.post(&url).form(&form).send().await?;
            token_from_response(response, "client secret").await
        }
        AzureCredential::ManagedIdentity { client_id } => {
            let mut query = vec![("api-version", IMDS_API_VERSION), ("resource", ARM_RESOURCE)];
            if let Some(client_id) = client_id {
                query.push(("client_id", client_id.as_str()));
            }
            let response = http_client
                .get(IMDS_TOKEN_ENDPOINT)
                .header("Metadata", "true")
                .query(&query)
                .send()
                .await?;
            token_from_response(response, "managed identity").await
        }
    }
}

async fn token_from_response(
    response: reqwest::Response,
    source: &str,
) -> Result<Sensitive<String>, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        debug!(status = status.as_u16(), "Token endpoint rejected the request");
        return Err(ApiError::Auth(format!(
            "{source} token request failed with HTTP {}: {body}",
            status.as_u16()
        )));
    }
    let token: TokenResponse = serde_json::from_str(&body)?;
    Ok(token.access_token)
}
