//! Common test utilities
//!
//! In-memory fakes of the remote collaborators that record every call, a
//! scripted HTTP stub for the REST clients, plus rustls crypto provider setup
//! for the Pact tests.

#![allow(dead_code, reason = "each test crate uses a different subset of helpers")]

use app_service_certificate::controller::Clients;
use app_service_certificate::parse::CertificateId;
use app_service_certificate::provider::{
    ApiError, Certificate, CertificateProperties, CertificatesApi, KeyVaultLocator,
};
use app_service_certificate::schema::CertificateConfig;
use app_service_certificate::sensitive::Sensitive;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, Once};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
///
/// Uses a `Once` to ensure it's only called once across all tests.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        rustls::crypto::ring::default_provider()
            .install_default()
            .expect("Failed to install rustls crypto provider");
    });
}

pub const SUBSCRIPTION_ID: &str = "00000000-0000-0000-0000-000000000000";
pub const THUMBPRINT: &str = "A1B2C3D4E5F60718293A4B5C6D7E8F9012345678";

pub fn certificate_id(resource_group: &str, name: &str) -> String {
    CertificateId::new(SUBSCRIPTION_ID, resource_group, name).id()
}

/// `{name: cert1, resource_group: rg1, location: westus, pfx_blob: base64("hello"), password: p}`
pub fn inline_config() -> CertificateConfig {
    CertificateConfig {
        name: "cert1".to_string(),
        resource_group_name: "rg1".to_string(),
        location: "westus".to_string(),
        pfx_blob: Some(Sensitive::new("aGVsbG8=".to_string())),
        password: Some(Sensitive::new("p".to_string())),
        ..Default::default()
    }
}

pub fn vault_config(secret_id: &str) -> CertificateConfig {
    CertificateConfig {
        pfx_blob: None,
        password: None,
        key_vault_secret_id: Some(secret_id.to_string()),
        ..inline_config()
    }
}

/// A recorded call against [`FakeCertificates`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get {
        resource_group: String,
        name: String,
    },
    CreateOrUpdate {
        resource_group: String,
        name: String,
        envelope: Certificate,
    },
    Delete {
        resource_group: String,
        name: String,
    },
}

#[derive(Default)]
struct FakeState {
    objects: HashMap<(String, String), Certificate>,
    calls: Vec<Call>,
    /// Scripted `get` results, consumed before falling back to `objects`
    get_responses: VecDeque<Result<Certificate, ApiError>>,
    delete_error: Option<ApiError>,
    write_error: Option<ApiError>,
    /// Accept writes without storing them
    drop_writes: bool,
    /// Never answer any call
    hang: bool,
}

/// In-memory Microsoft.Web certificates API
#[derive(Default)]
pub struct FakeCertificates {
    state: Mutex<FakeState>,
}

impl FakeCertificates {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Pre-existing remote certificate, as Azure would return it
    pub fn insert_existing(&self, resource_group: &str, name: &str) -> String {
        let id = certificate_id(resource_group, name);
        let certificate = Certificate {
            id: Some(id.clone()),
            name: Some(name.to_string()),
            location: Some("West US".to_string()),
            tags: Some(HashMap::from([
                ("environment".to_string(), Some("production".to_string())),
                ("owner".to_string(), None),
            ])),
            properties: Some(issued_properties(CertificateProperties::default())),
        };
        self.lock()
            .objects
            .insert((resource_group.to_string(), name.to_string()), certificate);
        id
    }

    pub fn push_get_response(&self, response: Result<Certificate, ApiError>) {
        self.lock().get_responses.push_back(response);
    }

    pub fn fail_delete(&self, error: ApiError) {
        self.lock().delete_error = Some(error);
    }

    pub fn fail_write(&self, error: ApiError) {
        self.lock().write_error = Some(error);
    }

    pub fn drop_writes(&self) {
        self.lock().drop_writes = true;
    }

    pub fn hang(&self) {
        self.lock().hang = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn writes(&self) -> Vec<Certificate> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateOrUpdate { envelope, .. } => Some(envelope),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, resource_group: &str, name: &str) -> bool {
        self.lock()
            .objects
            .contains_key(&(resource_group.to_string(), name.to_string()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake state poisoned")
    }

    async fn maybe_hang(&self) {
        let hang = self.lock().hang;
        if hang {
            std::future::pending::<()>().await;
        }
    }
}

/// Computed properties Azure adds once a certificate is issued
fn issued_properties(properties: CertificateProperties) -> CertificateProperties {
    CertificateProperties {
        pfx_blob: None,
        password: None,
        friendly_name: Some(String::new()),
        subject_name: Some("www.example.com".to_string()),
        host_names: Some(vec![
            "www.example.com".to_string(),
            "example.com".to_string(),
        ]),
        issuer: Some("Example Issuing CA".to_string()),
        issue_date: Some("2021-03-04T05:06:07.1234567Z".to_string()),
        expiration_date: Some("2022-03-04T05:06:07+00:00".to_string()),
        thumbprint: Some(THUMBPRINT.to_string()),
        ..properties
    }
}

fn not_found(resource_group: &str, name: &str) -> ApiError {
    ApiError::NotFound {
        message: format!(
            "The Resource 'Microsoft.Web/certificates/{name}' under resource group '{resource_group}' was not found."
        ),
    }
}

#[async_trait]
impl CertificatesApi for FakeCertificates {
    async fn get(&self, resource_group: &str, name: &str) -> Result<Certificate, ApiError> {
        self.maybe_hang().await;
        let mut state = self.lock();
        state.calls.push(Call::Get {
            resource_group: resource_group.to_string(),
            name: name.to_string(),
        });
        if let Some(response) = state.get_responses.pop_front() {
            return response;
        }
        state
            .objects
            .get(&(resource_group.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| not_found(resource_group, name))
    }

    async fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        envelope: &Certificate,
    ) -> Result<Certificate, ApiError> {
        self.maybe_hang().await;
        let mut state = self.lock();
        state.calls.push(Call::CreateOrUpdate {
            resource_group: resource_group.to_string(),
            name: name.to_string(),
            envelope: envelope.clone(),
        });
        if let Some(error) = state.write_error.take() {
            return Err(error);
        }

        let stored = Certificate {
            id: Some(certificate_id(resource_group, name)),
            name: Some(name.to_string()),
            location: envelope.location.clone(),
            tags: envelope.tags.clone(),
            properties: Some(issued_properties(
                envelope.properties.clone().unwrap_or_default(),
            )),
        };
        if !state.drop_writes {
            state
                .objects
                .insert((resource_group.to_string(), name.to_string()), stored.clone());
        }
        Ok(stored)
    }

    async fn delete(&self, resource_group: &str, name: &str) -> Result<(), ApiError> {
        self.maybe_hang().await;
        let mut state = self.lock();
        state.calls.push(Call::Delete {
            resource_group: resource_group.to_string(),
            name: name.to_string(),
        });
        if let Some(error) = state.delete_error.take() {
            return Err(error);
        }
        state
            .objects
            .remove(&(resource_group.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| not_found(resource_group, name))
    }
}

/// In-memory Key Vault resolution
#[derive(Default)]
pub struct FakeKeyVaults {
    vaults: Mutex<HashMap<String, Vec<String>>>,
    error: Mutex<Option<ApiError>>,
    lookups: Mutex<Vec<String>>,
}

impl FakeKeyVaults {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn register(&self, base_url: &str, vault_id: &str) {
        self.vaults
            .lock()
            .expect("fake state poisoned")
            .entry(base_url.to_string())
            .or_default()
            .push(vault_id.to_string());
    }

    pub fn fail_lookup(&self, error: ApiError) {
        *self.error.lock().expect("fake state poisoned") = Some(error);
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().expect("fake state poisoned").clone()
    }
}

#[async_trait]
impl KeyVaultLocator for FakeKeyVaults {
    async fn key_vault_ids_from_base_url(&self, base_url: &str) -> Result<Vec<String>, ApiError> {
        self.lookups
            .lock()
            .expect("fake state poisoned")
            .push(base_url.to_string());
        if let Some(error) = self.error.lock().expect("fake state poisoned").take() {
            return Err(error);
        }
        Ok(self
            .vaults
            .lock()
            .expect("fake state poisoned")
            .get(base_url)
            .cloned()
            .unwrap_or_default())
    }
}

pub fn clients(certificates: &Arc<FakeCertificates>, key_vaults: &Arc<FakeKeyVaults>) -> Clients {
    Clients::new(
        Arc::clone(certificates) as Arc<dyn CertificatesApi>,
        Arc::clone(key_vaults) as Arc<dyn KeyVaultLocator>,
    )
}

/// HTTP server answering each connection with the next scripted response
///
/// Responses close the connection, so every request arrives on a fresh
/// connection in order. The join handle yields the request lines received.
#[derive(Debug)]
pub struct StubServer {
    listener: TcpListener,
    pub endpoint: String,
}

impl StubServer {
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let endpoint = format!(
            "http://{}",
            listener.local_addr().expect("stub server address")
        );
        Self { listener, endpoint }
    }

    pub fn serve(self, responses: Vec<(u16, serde_json::Value)>) -> JoinHandle<Vec<String>> {
        tokio::spawn(async move {
            let mut request_lines = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = self.listener.accept().await.expect("accept");
                let head = read_request_head(&mut socket).await;
                request_lines.push(head.lines().next().unwrap_or_default().to_string());

                let body = body.to_string();
                let response = format!(
                    "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket
                    .write_all(response.as_bytes())
                    .await
                    .expect("write response");
                let _ = socket.shutdown().await;
            }
            request_lines
        })
    }
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut head = Vec::new();
    let mut buffer = [0u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = socket.read(&mut buffer).await.expect("read request");
        if read == 0 {
            break;
        }
        head.extend_from_slice(&buffer[..read]);
    }
    String::from_utf8_lossy(&head).into_owned()
}
