//! Verification outcome and the client-side routes it selects.

use crate::error::AuthError;
use crate::lenient::truthy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result of the verification call. Consumed immediately, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    /// Absent or falsy (`null`, `0`, `""`) reads as `false`.
    #[serde(default, deserialize_with = "truthy")]
    pub valid_number: bool,
}

impl VerificationOutcome {
    /// The client-side route to navigate to for this outcome.
    pub fn route(&self) -> Route {
        if self.valid_number {
            Route::VerificationSuccess
        } else {
            Route::VerificationFailed
        }
    }
}

/// Internal navigation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    VerificationSuccess,
    VerificationFailed,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::VerificationSuccess => "/verification-success",
            Self::VerificationFailed => "/verification-failed",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/verification-success" => Ok(Self::VerificationSuccess),
            "/verification-failed" => Ok(Self::VerificationFailed),
            other => Err(AuthError::InvalidRoute(other.to_string())),
        }
    }
}
