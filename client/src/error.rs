use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0} endpoint is not configured")]
    NotConfigured(&'static str),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
