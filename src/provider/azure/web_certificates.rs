//! Microsoft.Web certificates client.

use super::rest::ArmClient;
use crate::constants::WEB_API_VERSION;
use crate::parse::CertificateId;
use crate::provider::{ApiError, Certificate, CertificatesApi};
use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;
use tracing::{debug_span, info_span, Instrument};

const API: &str = "certificates";

#[derive(Debug, Clone)]
pub struct WebCertificatesClient {
    arm: Arc<ArmClient>,
}

impl WebCertificatesClient {
    pub fn new(arm: Arc<ArmClient>) -> Self {
        Self { arm }
    }

    fn url(&self, resource_group: &str, name: &str) -> Result<Url, ApiError> {
        let id = CertificateId::new(self.arm.subscription_id(), resource_group, name);
        self.arm.resource_url(id.path_segments())
    }
}

#[async_trait]
impl CertificatesApi for WebCertificatesClient {
    async fn get(&self, resource_group: &str, name: &str) -> Result<Certificate, ApiError> {
        let span = debug_span!("azure.certificate.get", resource_group, name);
        self.arm
            .get_json(API, self.url(resource_group, name)?, WEB_API_VERSION, &[])
            .instrument(span)
            .await
    }

    async fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        envelope: &Certificate,
    ) -> Result<Certificate, ApiError> {
        let span = info_span!("azure.certificate.create_or_update", resource_group, name);
        self.arm
            .put_json(API, self.url(resource_group, name)?, WEB_API_VERSION, envelope)
            .instrument(span)
            .await
    }

    async fn delete(&self, resource_group: &str, name: &str) -> Result<(), ApiError> {
        let span = info_span!("azure.certificate.delete", resource_group, name);
        self.arm
            .delete(API, self.url(resource_group, name)?, WEB_API_VERSION)
            .instrument(span)
            .await
    }
}
