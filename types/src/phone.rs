//! Phone number entities: the enrichment candidate and the pending number.

use crate::country::Country;
use crate::lenient::text_or_empty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A number detected through carrier header enrichment.
///
/// Both fields read as empty when the endpoint omits them or sends `null`;
/// the confirmation screen renders them as-is.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneCandidate {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub mobile: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub country_code: String,
}

impl PhoneCandidate {
    pub fn new(mobile: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            mobile: mobile.into(),
            country_code: country_code.into(),
        }
    }

    /// The candidate used when enrichment fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.mobile.is_empty() && self.country_code.is_empty()
    }
}

/// Drop exactly one leading `0` from a locally-entered number.
pub fn normalize_local_number(local: &str) -> &str {
    local.strip_prefix('0').unwrap_or(local)
}

/// Dial-code digits followed by the normalized local number, no `+`.
///
/// Persisted right before the partner redirect and read back once on return.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PendingPhoneNumber(String);

impl PendingPhoneNumber {
    /// Build the pending number from the selected country and the user's input.
    pub fn from_parts(country: &Country, local: &str) -> Self {
        let mut full = String::with_capacity(country.dial_digits().len() + local.len());
        full.push_str(country.dial_digits());
        full.push_str(normalize_local_number(local));
        Self(full)
    }

    /// Wrap a value read back from storage.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PendingPhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::COUNTRIES;

    #[test]
    fn drops_single_leading_zero() {
        assert_eq!(normalize_local_number("0791234567"), "791234567");
        assert_eq!(normalize_local_number("00791"), "0791");
        assert_eq!(normalize_local_number("791234567"), "791234567");
        assert_eq!(normalize_local_number(""), "");
    }

    #[test]
    fn pending_number_concatenates_without_plus() {
        let jordan = &COUNTRIES[0];
        let pending = PendingPhoneNumber::from_parts(jordan, "0791234567");
        assert_eq!(pending.as_str(), "962791234567");
    }

    #[test]
    fn candidate_tolerates_missing_fields() {
        let c: PhoneCandidate = serde_json::from_str(r#"{"mobile":"0791"}"#).unwrap();
        assert_eq!(c.mobile, "0791");
        assert_eq!(c.country_code, "");

        let c: PhoneCandidate =
            serde_json::from_str(r#"{"mobile":"791","countryCode":"+962"}"#).unwrap();
        assert_eq!(c.country_code, "+962");
    }

    #[test]
    fn candidate_keeps_mobile_when_country_code_is_falsy() {
        for json in [
            r#"{"mobile":"791234567","countryCode":null}"#,
            r#"{"mobile":"791234567","countryCode":0}"#,
            r#"{"mobile":"791234567","countryCode":""}"#,
        ] {
            let c: PhoneCandidate = serde_json::from_str(json).unwrap();
            assert_eq!(c, PhoneCandidate::new("791234567", ""), "{json}");
        }
        let c: PhoneCandidate = serde_json::from_str(r#"{"mobile":null}"#).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn empty_candidate() {
        assert!(PhoneCandidate::empty().is_empty());
        assert!(!PhoneCandidate::new("1", "").is_empty());
    }
}
