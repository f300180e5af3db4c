//! Error types for the Spotify Web API client.

use thiserror::Error;

/// Errors that can occur when calling the Spotify Web API.
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Spotify returned an error response
    #[error("Spotify API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a Spotify response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Rate limited by Spotify
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },
}

impl SpotifyError {
    /// HTTP status of an API error response, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SpotifyError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for Spotify client operations.
pub type Result<T> = std::result::Result<T, SpotifyError>;

/// Map a non-success response to the matching error variant.
///
/// Consumes the response body as the error message; 429 is surfaced as
/// [`SpotifyError::RateLimited`] with the parsed `Retry-After` header.
pub(crate) async fn response_error(response: reqwest::Response) -> SpotifyError {
    let status = response.status();

    if status.as_u16() == 429 {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or(1);
        return SpotifyError::RateLimited { retry_after_secs };
    }

    let message = response.text().await.unwrap_or_default();
    SpotifyError::Api {
        status: status.as_u16(),
        message,
    }
}
