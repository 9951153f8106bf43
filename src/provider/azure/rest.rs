//! Azure Resource Manager REST Client
//!
//! Thin reqwest wrapper shared by the Web and Resources clients. It builds
//! request URLs from percent-encoded path segments, adds the bearer token, a
//! client request ID and the `api-version` query parameter, records a metric
//! per request, and maps error bodies onto [`ApiError`].
//!
//! References:
//! - [ARM request conventions](https://learn.microsoft.com/en-us/rest/api/azure/)

use crate::observability::metrics;
use crate::provider::ApiError;
use crate::sensitive::Sensitive;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// ARM error response wrapper
#[derive(Debug, Deserialize)]
struct ArmErrorResponse {
    error: ArmError,
}

#[derive(Debug, Deserialize)]
struct ArmError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

pub struct ArmClient {
    http_client: Client,
    endpoint: String,
    subscription_id: String,
    access_token: Sensitive<String>,
}

impl std::fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmClient")
            .field("endpoint", &self.endpoint)
            .field("subscription_id", &self.subscription_id)
            .finish_non_exhaustive()
    }
}

impl ArmClient {
    pub fn new(
        http_client: Client,
        endpoint: &str,
        subscription_id: impl Into<String>,
        access_token: Sensitive<String>,
    ) -> Self {
        Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            subscription_id: subscription_id.into(),
            access_token,
        }
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    fn endpoint_url(&self) -> Result<Url, ApiError> {
        Url::parse(&self.endpoint)
            .map_err(|e| ApiError::InvalidUrl(format!("endpoint {:?}: {e}", self.endpoint)))
    }

    /// Endpoint URL addressing `segments`, each percent-encoded as a single path segment
    pub fn resource_url<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint_url()?;
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::InvalidUrl(format!("endpoint {:?} cannot be a base", self.endpoint))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Validate a `nextLink` from a list response
    ///
    /// The bearer token is only ever sent to the configured endpoint, so a
    /// link to any other origin is rejected.
    fn next_link_url(&self, link: &str) -> Result<Url, ApiError> {
        let url = Url::parse(link)
            .map_err(|e| ApiError::InvalidUrl(format!("nextLink {link:?}: {e}")))?;
        if url.origin() != self.endpoint_url()?.origin() {
            return Err(ApiError::InvalidUrl(format!(
                "nextLink {link:?} does not point at {}",
                self.endpoint
            )));
        }
        Ok(url)
    }

    /// Build a request with authentication headers
    fn make_request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .bearer_auth(self.access_token.expose())
            .header("x-ms-client-request-id", uuid::Uuid::new_v4().to_string())
            .header("Accept", "application/json")
    }

    async fn execute(
        &self,
        api: &'static str,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let request = request.build()?;
        let method = request.method().clone();
        debug!(api, method = %method, url = %request.url(), "Sending Resource Manager request");

        let response = match self.http_client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_api_request(api, method.as_str(), "error");
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        metrics::record_api_request(api, method.as_str(), status.as_str());
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        Err(handle_error_response(status, &error_text))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        api: &'static str,
        url: Url,
        api_version: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let request = self
            .make_request(Method::GET, url)
            .query(&[("api-version", api_version)])
            .query(query);
        let response = self.execute(api, request).await?;
        Self::decode(response).await
    }

    /// Follow a `nextLink`; the link already carries `api-version` and the original query
    pub async fn get_next_page<T: DeserializeOwned>(
        &self,
        api: &'static str,
        link: &str,
    ) -> Result<T, ApiError> {
        let request = self.make_request(Method::GET, self.next_link_url(link)?);
        let response = self.execute(api, request).await?;
        Self::decode(response).await
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        api: &'static str,
        url: Url,
        api_version: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .make_request(Method::PUT, url)
            .query(&[("api-version", api_version)])
            .json(body);
        let response = self.execute(api, request).await?;
        Self::decode(response).await
    }

    /// DELETE; any success status (200, 204) counts
    pub async fn delete(
        &self,
        api: &'static str,
        url: Url,
        api_version: &str,
    ) -> Result<(), ApiError> {
        let request = self
            .make_request(Method::DELETE, url)
            .query(&[("api-version", api_version)]);
        self.execute(api, request).await.map(|_| ())
    }
}

/// Map an error response onto [`ApiError`]; 404 always becomes `NotFound`
fn handle_error_response(status: StatusCode, error_text: &str) -> ApiError {
    let (code, message) = match serde_json::from_str::<ArmErrorResponse>(error_text) {
        Ok(response) => (response.error.code, response.error.message),
        Err(_) => (String::new(), error_text.to_string()),
    };

    if status == StatusCode::NOT_FOUND {
        return ApiError::NotFound { message };
    }

    warn!(status = status.as_u16(), code = %code, "Resource Manager request failed");
    ApiError::Status {
        status: status.as_u16(),
        code: if code.is_empty() {
            status.canonical_reason().unwrap_or("Unknown").to_string()
        } else {
            code
        },
        message,
    }
}
