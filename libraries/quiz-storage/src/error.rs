//! Error types for the quiz store client.

use thiserror::Error;

/// Errors that can occur when talking to the quiz datastore.
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The datastore returned an error response
    #[error("Store error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a datastore response
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Map a non-success response to an API error.
///
/// Consumes the response body as the error message.
pub(crate) async fn response_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    StoreError::Api { status, message }
}
