//! Client error types.

use thiserror::Error;

/// Errors returned by the pricing and maps clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The pricing service rejected or could not serve the request.
    #[error("Pricing service error: {0}")]
    Pricing(String),

    /// The maps service rejected or could not serve the request.
    #[error("Maps service error: {0}")]
    Maps(String),

    /// Transport failure or non-success status from a remote service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenience type alias for client results.
pub type Result<T> = std::result::Result<T, ClientError>;
