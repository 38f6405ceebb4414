//! reqwest-backed implementation of the endpoint traits.

use async_trait::async_trait;
use authmatech_types::PhoneCandidate;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::{
    ConfirmRequest, ConfirmResponse, ConfirmationApi, EnrichmentApi, VerificationApi,
    VerifyRequest, VerifyResponse,
};
use crate::error::ClientError;

/// Endpoint URLs. An empty URL marks the endpoint as not configured.
#[derive(Clone, Debug, Default)]
pub struct Endpoints {
    pub enrichment: String,
    pub confirmation: String,
    pub verification: String,
}

/// HTTP client for the three backend endpoints.
///
/// Wraps `reqwest::Client` with the endpoint URLs and exposes one typed
/// method per endpoint through the traits in [`crate::api`].
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpClient {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, endpoints })
    }

    fn url<'a>(url: &'a str, name: &'static str) -> Result<&'a str, ClientError> {
        if url.trim().is_empty() {
            Err(ClientError::NotConfigured(name))
        } else {
            Ok(url)
        }
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl EnrichmentApi for HttpClient {
    /// The status code is not checked: any JSON body is accepted and a
    /// non-JSON body fails to parse.
    async fn fetch_candidate(&self) -> Result<PhoneCandidate, ClientError> {
        let url = Self::url(&self.endpoints.enrichment, "enrichment")?;
        tracing::debug!(url, "fetching mobile number");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Self::read_json(response).await
    }
}

#[async_trait]
impl ConfirmationApi for HttpClient {
    async fn confirm_mobile(&self, request: &ConfirmRequest) -> Result<ConfirmResponse, ClientError> {
        let url = Self::url(&self.endpoints.confirmation, "confirmation")?;
        tracing::debug!(url, "confirming mobile number");
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Self::read_json(response).await
    }
}

#[async_trait]
impl VerificationApi for HttpClient {
    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse, ClientError> {
        let url = Self::url(&self.endpoints.verification, "verification")?;
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(url, %status, "verification response");
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        Self::read_json(response).await
    }
}
