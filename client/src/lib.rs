//! Backend endpoints used by the verification flow.
//!
//! - Header enrichment: `GET`, returns the detected [`PhoneCandidate`]
//! - Mobile confirmation: `POST {mobile}`, returns `{success}`
//! - Verification: `POST {clientId, mobileNumber, encryptedMobileNumber}`,
//!   returns `{data: {validNumber}}`
//!
//! Each endpoint is a trait so flows can be driven by the nullables in tests
//! and by [`HttpClient`] in production.
//!
//! [`PhoneCandidate`]: authmatech_types::PhoneCandidate

pub mod api;
pub mod error;
pub mod http;

pub use api::{
    ConfirmRequest, ConfirmResponse, ConfirmationApi, EnrichmentApi, VerificationApi,
    VerifyRequest, VerifyResponse,
};
pub use error::ClientError;
pub use http::{Endpoints, HttpClient};
