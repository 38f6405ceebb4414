//! Partner gateway URLs: the outbound redirect and the parameters it
//! returns with.

use url::Url;

use crate::error::BrowserError;

/// `ec` value the gateway sends on a successful lookup.
pub const SUCCESS_SENTINEL: &str = "0";

/// Build `{gateway}?partnerId={partner_id}&rurl={return_url}`, with the
/// return address percent-encoded.
pub fn gateway_redirect_url(
    gateway: &str,
    partner_id: &str,
    return_url: &str,
) -> Result<Url, BrowserError> {
    let mut url = Url::parse(gateway).map_err(|e| BrowserError::InvalidUrl {
        url: gateway.to_string(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut()
        .append_pair("partnerId", partner_id)
        .append_pair("rurl", return_url);
    Ok(url)
}

/// The query part of a full URL, a `?`-prefixed query, or a bare query,
/// without the leading `?` or any fragment.
pub fn query_string(input: &str) -> String {
    if let Ok(url) = Url::parse(input) {
        return url.query().unwrap_or_default().to_string();
    }
    let without_fragment = input.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => query.to_string(),
        None if without_fragment.contains('=') => without_fragment.to_string(),
        None => String::new(),
    }
}

/// Query parameters the gateway appends when it sends the visitor back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReturnParams {
    /// `e`: opaque encrypted mobile number.
    pub encrypted: Option<String>,
    /// `ec`: gateway error code, `"0"` on success.
    pub error_code: Option<String>,
}

impl ReturnParams {
    /// Parse from a full URL, a `?`-prefixed query string, or a bare query.
    ///
    /// Only the first occurrence of each key counts. Empty values read as
    /// absent.
    pub fn parse(input: &str) -> Self {
        let query = query_string(input);
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "e" => &mut params.encrypted,
                "ec" => &mut params.error_code,
                _ => continue,
            };
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// `e` present and `ec` equal to the success sentinel.
    pub fn is_success(&self) -> bool {
        self.encrypted.is_some() && self.error_code.as_deref() == Some(SUCCESS_SENTINEL)
    }

    /// Any `ec` at all marks a return from the gateway.
    pub fn is_return(&self) -> bool {
        self.error_code.is_some()
    }
}
