//! Endpoint traits and their wire payloads.

use async_trait::async_trait;
use authmatech_types::lenient::truthy;
use authmatech_types::{PhoneCandidate, VerificationOutcome};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Carrier header-enrichment lookup.
#[async_trait]
pub trait EnrichmentApi {
    async fn fetch_candidate(&self) -> Result<PhoneCandidate, ClientError>;
}

/// Confirms that the detected number belongs to the visitor.
#[async_trait]
pub trait ConfirmationApi {
    async fn confirm_mobile(&self, request: &ConfirmRequest) -> Result<ConfirmResponse, ClientError>;
}

/// Recombines the pending number with the gateway's encrypted value.
#[async_trait]
pub trait VerificationApi {
    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse, ClientError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub mobile: String,
}

/// `success` absent or falsy (`null`, `0`, `""`) is treated as `false`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub client_id: String,
    pub mobile_number: String,
    pub encrypted_mobile_number: String,
}

/// `data` is required; a body without it is a malformed response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub data: VerificationOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_request_uses_camel_case() {
        let req = VerifyRequest {
            client_id: "cid".into(),
            mobile_number: "962791234567".into(),
            encrypted_mobile_number: "abc".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "clientId": "cid",
                "mobileNumber": "962791234567",
                "encryptedMobileNumber": "abc",
            })
        );
    }

    #[test]
    fn confirm_response_defaults_to_failure() {
        let r: ConfirmResponse = serde_json::from_str("{}").unwrap();
        assert!(!r.success);
        let r: ConfirmResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(r.success);
    }

    #[test]
    fn falsy_success_is_a_mismatch_not_an_error() {
        for json in [r#"{"success":null}"#, r#"{"success":0}"#, r#"{"success":""}"#] {
            let r: ConfirmResponse = serde_json::from_str(json).unwrap();
            assert!(!r.success, "{json}");
        }
    }

    #[test]
    fn verify_response_reads_nested_flag() {
        let r: VerifyResponse =
            serde_json::from_str(r#"{"data":{"validNumber":true}}"#).unwrap();
        assert!(r.data.valid_number);
        let r: VerifyResponse = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert!(!r.data.valid_number);
        let r: VerifyResponse =
            serde_json::from_str(r#"{"data":{"validNumber":null}}"#).unwrap();
        assert!(!r.data.valid_number);
        assert!(serde_json::from_str::<VerifyResponse>("{}").is_err());
    }
}
