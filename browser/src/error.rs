use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("navigation failed: {0}")]
    Navigation(String),
}
