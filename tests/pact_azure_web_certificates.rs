//! Pact contract tests for the Azure Resource Manager APIs
//!
//! These tests define the contract between the App Service Certificate Controller
//! and Azure Resource Manager (Microsoft.Web certificates, Microsoft.Resources and
//! Microsoft.KeyVault). The controller's own REST clients are pointed at the Pact
//! mock server.

#[cfg(test)]
mod common;

use app_service_certificate::provider::azure::{ArmClient, ResourcesClient, WebCertificatesClient};
use app_service_certificate::provider::{
    ApiError, Certificate, CertificateProperties, CertificatesApi, KeyVaultLocator,
};
use app_service_certificate::sensitive::Sensitive;
use common::{init_rustls, SUBSCRIPTION_ID};
use pact_consumer::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

const CERTIFICATE_PATH: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg1/providers/Microsoft.Web/certificates/cert1";
const VAULT_ID: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/security/providers/Microsoft.KeyVault/vaults/prod-vault";

fn pact_builder() -> PactBuilder {
    PactBuilder::new("App-Service-Certificate-Controller", "Azure-Resource-Manager")
}

/// ARM client pointed at the mock server
fn arm_client(mock_server: &dyn ValidatingMockServer) -> Arc<ArmClient> {
    // mock_server.url() returns a Url struct - convert to string and strip trailing slash
    let mut base_url = mock_server.url().to_string();
    if base_url.ends_with('/') {
        base_url.pop();
    }
    Arc::new(ArmClient::new(
        reqwest::Client::new(),
        &base_url,
        SUBSCRIPTION_ID,
        Sensitive::new("test-token".to_string()),
    ))
}

fn issued_certificate() -> serde_json::Value {
    json!({
        "id": CERTIFICATE_PATH,
        "name": "cert1",
        "type": "Microsoft.Web/certificates",
        "location": "West US",
        "tags": {"environment": "production"},
        "properties": {
            "friendlyName": "",
            "subjectName": "www.example.com",
            "hostNames": ["www.example.com", "example.com"],
            "issuer": "Example Issuing CA",
            "issueDate": "2021-03-04T05:06:07.1234567Z",
            "expirationDate": "2022-03-04T05:06:07+00:00",
            "thumbprint": "A1B2C3D4E5F60718293A4B5C6D7E8F9012345678"
        }
    })
}

#[tokio::test]
async fn test_azure_get_certificate_contract() {
    init_rustls();
    let mut pact_builder = pact_builder();

    pact_builder.interaction("get an App Service certificate", "", |mut i| {
        i.given("an App Service certificate cert1 exists in resource group rg1");
        i.request
            .method("GET")
            .path(CERTIFICATE_PATH)
            .header("authorization", "Bearer test-token")
            .query_param("api-version", "2021-02-01");
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(issued_certificate());
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = WebCertificatesClient::new(arm_client(mock_server.as_ref()));

    let certificate = client
        .get("rg1", "cert1")
        .await
        .expect("Failed to get certificate");

    assert_eq!(certificate.id.as_deref(), Some(CERTIFICATE_PATH));
    assert_eq!(certificate.name.as_deref(), Some("cert1"));
    let properties = certificate.properties.expect("properties");
    assert_eq!(properties.issuer.as_deref(), Some("Example Issuing CA"));
    assert_eq!(properties.host_names.map(|names| names.len()), Some(2));
}

#[tokio::test]
async fn test_azure_get_missing_certificate_contract() {
    init_rustls();
    let mut pact_builder = pact_builder();

    pact_builder.interaction("get a certificate that does not exist", "", |mut i| {
        i.given("no App Service certificate cert1 exists in resource group rg1");
        i.request
            .method("GET")
            .path(CERTIFICATE_PATH)
            .header("authorization", "Bearer test-token")
            .query_param("api-version", "2021-02-01");
        i.response
            .status(404)
            .header("content-type", "application/json")
            .json_body(json!({
                "error": {
                    "code": "ResourceNotFound",
                    "message": "The Resource 'Microsoft.Web/certificates/cert1' under resource group 'rg1' was not found."
                }
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = WebCertificatesClient::new(arm_client(mock_server.as_ref()));

    let error = client.get("rg1", "cert1").await.unwrap_err();
    match error {
        ApiError::NotFound { message } => assert!(message.contains("was not found")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_azure_create_certificate_contract() {
    init_rustls();
    let mut pact_builder = pact_builder();

    pact_builder.interaction("create an App Service certificate from a PFX blob", "", |mut i| {
        i.given("resource group rg1 exists and credentials are configured");
        i.request
            .method("PUT")
            .path(CERTIFICATE_PATH)
            .header("authorization", "Bearer test-token")
            .header("content-type", "application/json")
            .query_param("api-version", "2021-02-01")
            .json_body(json!({
                "location": "westus",
                "tags": {"environment": "production"},
                "properties": {
                    "pfxBlob": "aGVsbG8=",
                    "password": "p"
                }
            }));
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(issued_certificate());
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = WebCertificatesClient::new(arm_client(mock_server.as_ref()));

    let envelope = Certificate {
        location: Some("westus".to_string()),
        tags: Some(HashMap::from([(
            "environment".to_string(),
            Some("production".to_string()),
        )])),
        properties: Some(CertificateProperties {
            pfx_blob: Some(Sensitive::new(b"hello".to_vec())),
            password: Some(Sensitive::new("p".to_string())),
            ..Default::default()
        }),
        ..Default::default()
    };

    let created = client
        .create_or_update("rg1", "cert1", &envelope)
        .await
        .expect("Failed to create certificate");
    assert_eq!(created.id.as_deref(), Some(CERTIFICATE_PATH));
}

#[tokio::test]
async fn test_azure_create_certificate_bad_password_contract() {
    init_rustls();
    let mut pact_builder = pact_builder();

    pact_builder.interaction("create a certificate with the wrong PFX password", "", |mut i| {
        i.given("resource group rg1 exists and credentials are configured");
        i.request
            .method("PUT")
            .path(CERTIFICATE_PATH)
            .header("authorization", "Bearer test-token")
            .query_param("api-version", "2021-02-01");
        i.response
            .status(400)
            .header("content-type", "application/json")
            .json_body(json!({
                "error": {
                    "code": "BadRequest",
                    "message": "The specified network password is not correct."
                }
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = WebCertificatesClient::new(arm_client(mock_server.as_ref()));

    let envelope = Certificate {
        location: Some("westus".to_string()),
        properties: Some(CertificateProperties {
            pfx_blob: Some(Sensitive::new(b"hello".to_vec())),
            password: Some(Sensitive::new("wrong".to_string())),
            ..Default::default()
        }),
        ..Default::default()
    };

    let error = client
        .create_or_update("rg1", "cert1", &envelope)
        .await
        .unwrap_err();
    match error {
        ApiError::Status { status, code, .. } => {
            assert_eq!(status, 400);
            assert_eq!(code, "BadRequest");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_azure_delete_certificate_contract() {
    init_rustls();
    let mut pact_builder = pact_builder();

    pact_builder.interaction("delete an App Service certificate", "", |mut i| {
        i.given("an App Service certificate cert1 exists in resource group rg1");
        i.request
            .method("DELETE")
            .path(CERTIFICATE_PATH)
            .header("authorization", "Bearer test-token")
            .query_param("api-version", "2021-02-01");
        i.response.status(200);
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = WebCertificatesClient::new(arm_client(mock_server.as_ref()));

    client
        .delete("rg1", "cert1")
        .await
        .expect("Failed to delete certificate");
}

#[tokio::test]
async fn test_azure_resolve_key_vault_contract() {
    init_rustls();
    let mut pact_builder = pact_builder();

    pact_builder.interaction("list Key Vaults named prod-vault", "", |mut i| {
        i.given("a Key Vault prod-vault exists in resource group security");
        i.request
            .method("GET")
            .path("/subscriptions/00000000-0000-0000-0000-000000000000/resources")
            .header("authorization", "Bearer test-token")
            .query_param("api-version", "2020-06-01")
            .query_param(
                "$filter",
                "resourceType eq 'Microsoft.KeyVault/vaults' and name eq 'prod-vault'",
            )
            .query_param("$top", "5");
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "value": [{
                    "id": VAULT_ID,
                    "name": "prod-vault",
                    "type": "Microsoft.KeyVault/vaults",
                    "location": "westus"
                }]
            }));
        i
    });

    pact_builder.interaction("get Key Vault prod-vault", "", |mut i| {
        i.given("a Key Vault prod-vault exists in resource group security");
        i.request
            .method("GET")
            .path(VAULT_ID)
            .header("authorization", "Bearer test-token")
            .query_param("api-version", "2019-09-01");
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "id": VAULT_ID,
                "name": "prod-vault",
                "properties": {
                    "vaultUri": "https://prod-vault.vault.azure.net/",
                    "tenantId": "11111111-1111-1111-1111-111111111111"
                }
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = ResourcesClient::new(arm_client(mock_server.as_ref()));

    let ids = client
        .key_vault_ids_from_base_url("https://prod-vault.vault.azure.net/")
        .await
        .expect("Failed to resolve Key Vault");
    assert_eq!(ids, vec![VAULT_ID.to_string()]);
}
