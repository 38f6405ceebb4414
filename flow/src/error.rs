use authmatech_browser::BrowserError;
use authmatech_client::ClientError;
use authmatech_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("endpoint error: {0}")]
    Client(#[from] ClientError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("no pending phone number found")]
    MissingPendingNumber,

    #[error("operation not allowed in state {0}")]
    InvalidState(&'static str),

    #[error("QR code generation failed: {0}")]
    Qr(String),

    #[error("configuration error: {0}")]
    Config(String),
}
