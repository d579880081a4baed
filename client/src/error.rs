use shared::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Could not reach the server ({0}).")]
    Network(String),
    #[error("The server took too long to respond.")]
    Timeout,
    #[error("Received an unexpected response from the server.")]
    InvalidBody(String),
}

/// Everything a user action can fail with. `Display` is the text shown on
/// the notification line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("The request was cancelled.")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ClientError>;
