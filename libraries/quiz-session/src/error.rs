//! Error types for the playback session.

use quiz_spotify::SpotifyError;
use thiserror::Error;

/// Errors raised while managing the playback session.
///
/// These never escape the public operations: the manager folds them into
/// the published state's `error` field. They exist so internal steps and
/// [`PlayerConnector`](crate::PlayerConnector) implementations can use `?`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The player runtime could not be loaded
    #[error("player runtime failed to load: {0}")]
    SdkLoad(String),

    /// The player failed to connect
    #[error("player connection failed: {0}")]
    Connect(String),

    /// No registered device matched the session's player name
    #[error("playback device not found")]
    DeviceNotFound,

    /// A Spotify Web API call failed
    #[error("Spotify API call failed: {0}")]
    Spotify(#[from] SpotifyError),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
