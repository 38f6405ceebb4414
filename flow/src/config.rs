//! Flow configuration, loadable from TOML.

use authmatech_client::Endpoints;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::FlowError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Header-enrichment endpoint. Empty disables the lookup.
    #[serde(default)]
    pub enrichment_url: String,

    /// Mobile confirmation endpoint. Empty disables confirmation.
    #[serde(default)]
    pub confirmation_url: String,

    #[serde(default = "default_verification_url")]
    pub verification_url: String,

    /// Fixed client identifier sent with every verification request.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Partner header-enrichment redirect gateway.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    #[serde(default = "default_partner_id")]
    pub partner_id: String,

    /// Where the gateway sends the visitor back to.
    #[serde(default = "default_return_url")]
    pub return_url: String,

    /// Encoded in the desktop QR code.
    #[serde(default = "default_landing_url")]
    pub landing_url: String,

    /// Backing file for the local key-value store.
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_verification_url() -> String {
    "https://be-authmatech-production.up.railway.app/v1/api/verify".to_string()
}

fn default_client_id() -> String {
    "6bd57c0a-6e4b-4fae-88cf-f22ab89c8d5d".to_string()
}

fn default_gateway_url() -> String {
    "http://www.dot-jo.biz/appgw/PartnerHERedirect".to_string()
}

fn default_partner_id() -> String {
    "partner-a5601b8b".to_string()
}

fn default_return_url() -> String {
    "https://www.authmatech.com/example".to_string()
}

fn default_landing_url() -> String {
    "https://www.authmatech.com".to_string()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./authmatech_data/local_storage.json")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl FlowConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, FlowError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| FlowError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, FlowError> {
        toml::from_str(s).map_err(|e| FlowError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, FlowError> {
        toml::to_string_pretty(self).map_err(|e| FlowError::Config(e.to_string()))
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            enrichment: self.enrichment_url.clone(),
            confirmation: self.confirmation_url.clone(),
            verification: self.verification_url.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            enrichment_url: String::new(),
            confirmation_url: String::new(),
            verification_url: default_verification_url(),
            client_id: default_client_id(),
            gateway_url: default_gateway_url(),
            partner_id: default_partner_id(),
            return_url: default_return_url(),
            landing_url: default_landing_url(),
            storage_path: default_storage_path(),
            request_timeout_secs: default_request_timeout_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
