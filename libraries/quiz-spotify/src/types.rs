//! Types for Spotify Web API requests and responses.

use serde::{Deserialize, Serialize};

/// A track as returned by the Spotify search and lookup endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpotifyTrack {
    /// Spotify track id
    pub id: String,
    /// Playback URI (`spotify:track:...`)
    pub uri: String,
    /// Track title
    pub name: String,
    /// Performing artists
    pub artists: Vec<SpotifyArtist>,
    /// Full track duration in milliseconds
    pub duration_ms: u64,
    /// Album the track belongs to
    pub album: SpotifyAlbum,
}

impl SpotifyTrack {
    /// Artist names joined for display, e.g. `"Daft Punk, Pharrell Williams"`.
    pub fn display_artists(&self) -> String {
        self.artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// URL of the largest album image, if any.
    pub fn cover_url(&self) -> Option<&str> {
        self.album.images.first().map(|image| image.url.as_str())
    }
}

/// An artist reference embedded in a track.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpotifyArtist {
    /// Artist name
    pub name: String,
}

/// Album metadata embedded in a track.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpotifyAlbum {
    /// Cover images, largest first (Spotify's ordering)
    #[serde(default)]
    pub images: Vec<AlbumImage>,
}

/// A single album cover rendition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumImage {
    /// Image URL
    pub url: String,
    /// Width in pixels, when reported
    pub width: Option<u32>,
    /// Height in pixels, when reported
    pub height: Option<u32>,
}

/// A playback device registered with the user's account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpotifyDevice {
    /// Device id; Spotify reports `null` for restricted devices
    pub id: Option<String>,
    /// Display name the device registered with
    pub name: String,
    /// Whether this device is the account's current playback target
    #[serde(default)]
    pub is_active: bool,
}

/// Wire shape of the search endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub tracks: SearchTracks,
}

/// Track page inside a search response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchTracks {
    pub items: Vec<SpotifyTrack>,
}

/// Wire shape of the device listing response.
#[derive(Debug, Deserialize)]
pub(crate) struct DevicesResponse {
    pub devices: Vec<SpotifyDevice>,
}
