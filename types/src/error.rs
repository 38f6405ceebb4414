//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for the verification flow.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no country matches {0:?}")]
    UnknownCountry(String),

    #[error("phone number is empty")]
    EmptyPhoneNumber,

    #[error("invalid route: {0}")]
    InvalidRoute(String),
}
