//! Nullable backend: scripted endpoint responses, recorded requests.

use async_trait::async_trait;
use authmatech_client::{
    ClientError, ConfirmRequest, ConfirmResponse, ConfirmationApi, EnrichmentApi,
    VerificationApi, VerifyRequest, VerifyResponse,
};
use authmatech_types::{PhoneCandidate, VerificationOutcome};
use std::sync::Mutex;

/// A scripted endpoint response.
#[derive(Clone, Debug)]
pub enum NullResponse<T> {
    Ok(T),
    /// Non-2xx HTTP status.
    Status(u16),
    /// Connection-level failure.
    Transport(String),
    /// Body that does not have the expected shape.
    Malformed(String),
}

impl<T: Clone> NullResponse<T> {
    fn to_result(&self) -> Result<T, ClientError> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Status(code) => Err(ClientError::Status(*code)),
            Self::Transport(msg) => Err(ClientError::Transport(msg.clone())),
            Self::Malformed(msg) => Err(ClientError::InvalidResponse(msg.clone())),
        }
    }
}

/// All three endpoints in one scripted double.
///
/// Each call yields to the executor once before answering, so a second
/// handler invocation can run while the first request is "in flight".
/// Unscripted endpoints answer with a transport error.
pub struct NullApi {
    enrichment: Mutex<NullResponse<PhoneCandidate>>,
    confirmation: Mutex<NullResponse<ConfirmResponse>>,
    verification: Mutex<NullResponse<VerifyResponse>>,
    enrichment_calls: Mutex<usize>,
    confirm_requests: Mutex<Vec<ConfirmRequest>>,
    verify_requests: Mutex<Vec<VerifyRequest>>,
}

impl NullApi {
    pub fn new() -> Self {
        let unscripted = || "no response scripted".to_string();
        Self {
            enrichment: Mutex::new(NullResponse::Transport(unscripted())),
            confirmation: Mutex::new(NullResponse::Transport(unscripted())),
            verification: Mutex::new(NullResponse::Transport(unscripted())),
            enrichment_calls: Mutex::new(0),
            confirm_requests: Mutex::new(Vec::new()),
            verify_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_candidate(self, response: NullResponse<PhoneCandidate>) -> Self {
        *self.enrichment.lock().unwrap() = response;
        self
    }

    pub fn with_confirmation(self, response: NullResponse<ConfirmResponse>) -> Self {
        *self.confirmation.lock().unwrap() = response;
        self
    }

    pub fn with_verification(self, response: NullResponse<VerifyResponse>) -> Self {
        *self.verification.lock().unwrap() = response;
        self
    }

    /// Shorthand for a successful confirmation response.
    pub fn confirming(self, success: bool) -> Self {
        self.with_confirmation(NullResponse::Ok(ConfirmResponse { success }))
    }

    /// Shorthand for a successful verification response.
    pub fn verifying(self, valid_number: bool) -> Self {
        self.with_verification(NullResponse::Ok(VerifyResponse {
            data: VerificationOutcome { valid_number },
        }))
    }

    pub fn enrichment_calls(&self) -> usize {
        *self.enrichment_calls.lock().unwrap()
    }

    pub fn confirm_requests(&self) -> Vec<ConfirmRequest> {
        self.confirm_requests.lock().unwrap().clone()
    }

    pub fn verify_requests(&self) -> Vec<VerifyRequest> {
        self.verify_requests.lock().unwrap().clone()
    }
}

impl Default for NullApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EnrichmentApi for NullApi {
    async fn fetch_candidate(&self) -> Result<PhoneCandidate, ClientError> {
        *self.enrichment_calls.lock().unwrap() += 1;
        tokio::task::yield_now().await;
        self.enrichment.lock().unwrap().to_result()
    }
}

#[async_trait]
impl ConfirmationApi for NullApi {
    async fn confirm_mobile(&self, request: &ConfirmRequest) -> Result<ConfirmResponse, ClientError> {
        self.confirm_requests.lock().unwrap().push(request.clone());
        tokio::task::yield_now().await;
        self.confirmation.lock().unwrap().to_result()
    }
}

#[async_trait]
impl VerificationApi for NullApi {
    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse, ClientError> {
        self.verify_requests.lock().unwrap().push(request.clone());
        tokio::task::yield_now().await;
        self.verification.lock().unwrap().to_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unscripted_endpoint_is_transport_error() {
        let api = NullApi::new();
        assert!(matches!(
            api.fetch_candidate().await,
            Err(ClientError::Transport(_))
        ));
        assert_eq!(api.enrichment_calls(), 1);
    }

    #[tokio::test]
    async fn records_requests_and_answers() {
        let api = NullApi::new().confirming(true).verifying(false);
        let confirmed = api
            .confirm_mobile(&ConfirmRequest {
                mobile: "791".into(),
            })
            .await
            .unwrap();
        assert!(confirmed.success);
        assert_eq!(api.confirm_requests()[0].mobile, "791");

        let verified = api
            .verify(&VerifyRequest {
                client_id: "c".into(),
                mobile_number: "1".into(),
                encrypted_mobile_number: "e".into(),
            })
            .await
            .unwrap();
        assert!(!verified.data.valid_number);
        assert_eq!(api.verify_requests().len(), 1);
    }

    #[tokio::test]
    async fn status_script_maps_to_status_error() {
        let api = NullApi::new().with_verification(NullResponse::Status(503));
        let err = api
            .verify(&VerifyRequest {
                client_id: "c".into(),
                mobile_number: "1".into(),
                encrypted_mobile_number: "e".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status(503)));
    }
}
