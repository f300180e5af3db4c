//! Quiz Player Spotify Client
//!
//! HTTP client for the two Spotify Web API surfaces Quiz Player consumes:
//!
//! - **Search and lookup** ([`SpotifyClient`]): token-authenticated track
//!   search used when building a quiz round.
//! - **Player control** ([`PlayerClient`]): device listing, playback
//!   transfer, start and pause — the calls the playback session drives.
//!
//! Both surfaces take their base URL at construction time so tests can run
//! against a mock server.
//!
//! # Example
//!
//! ```ignore
//! use quiz_spotify::SpotifyClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpotifyClient::new("access-token")?;
//!     let tracks = client.search_tracks("hotel california").await?;
//!     println!("Found {} tracks", tracks.len());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod player;
mod types;

// Re-export main types
pub use client::{SpotifyClient, SPOTIFY_API_BASE};
pub use error::{Result, SpotifyError};
pub use player::PlayerClient;
pub use types::{AlbumImage, SpotifyAlbum, SpotifyArtist, SpotifyDevice, SpotifyTrack};
