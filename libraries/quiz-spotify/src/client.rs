//! Track search and lookup against the Spotify Web API.

use crate::error::{response_error, Result, SpotifyError};
use crate::types::{SearchResponse, SpotifyTrack};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default base URL of the Spotify Web API.
pub const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";

/// How many tracks a search returns at most.
const SEARCH_LIMIT: u32 = 10;

/// Client for token-authenticated track search and lookup.
///
/// One client is built per signed-in session; the bearer token is fixed at
/// construction time, matching how the host hands out short-lived sessions.
///
/// # Example
///
/// ```ignore
/// use quiz_spotify::SpotifyClient;
///
/// let client = SpotifyClient::new("access-token")?;
/// let tracks = client.search_tracks("daft punk").await?;
/// for track in tracks {
///     println!("{} - {}", track.display_artists(), track.name);
/// }
/// ```
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Create a client against the public Spotify Web API.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(SPOTIFY_API_BASE, access_token)
    }

    /// Create a client against a custom base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("QuizPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SpotifyError::Request)?;

        Ok(Self {
            http,
            base_url,
            access_token: access_token.into(),
        })
    }

    /// Search tracks by free-text query.
    ///
    /// Blank queries return an empty list without issuing a request.
    pub async fn search_tracks(&self, query: &str) -> Result<Vec<SpotifyTrack>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.base_url);
        debug!(url = %url, query = %query, "Searching tracks");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", &SEARCH_LIMIT.to_string()),
            ])
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        let raw: SearchResponse = response.json().await.map_err(|e| {
            SpotifyError::Parse(format!("Failed to parse search response: {}", e))
        })?;

        debug!(results = raw.tracks.items.len(), "Search complete");
        Ok(raw.tracks.items)
    }

    /// Look up a single track by id.
    pub async fn get_track(&self, id: &str) -> Result<SpotifyTrack> {
        let url = format!("{}/tracks/{}", self.base_url, id);
        debug!(url = %url, "Fetching track");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        response.json().await.map_err(|e| {
            SpotifyError::Parse(format!("Failed to parse track response: {}", e))
        })
    }
}
