/// Quiz track domain type
use crate::types::SnippetRange;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A track selected into a quiz round, with its snippet bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizTrack {
    /// Unique track record identifier (UUID)
    pub id: String,

    /// Streaming URI used to start playback (e.g., `spotify:track:...`)
    pub uri: String,

    /// Track title
    pub name: String,

    /// Display string of the performing artists
    pub artists: String,

    /// Full track duration in milliseconds
    pub duration_ms: u64,

    /// Snippet start offset in milliseconds
    pub start_ms: u64,

    /// Snippet end offset in milliseconds
    pub end_ms: u64,

    /// Position of the track within its quiz, starting at 0
    pub order: usize,

    /// Album cover URL, if one was captured at add time
    pub cover_url: Option<String>,
}

impl QuizTrack {
    /// Create a track with a fresh id and a default whole-intro snippet.
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        artists: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            uri: uri.into(),
            name: name.into(),
            artists: artists.into(),
            duration_ms,
            start_ms: 0,
            end_ms: duration_ms.min(30_000),
            order: 0,
            cover_url: None,
        }
    }

    /// The track's snippet bounds as a [`SnippetRange`].
    #[must_use]
    pub fn snippet(&self) -> SnippetRange {
        SnippetRange::new(self.start_ms, self.end_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_track_defaults_snippet_to_intro() {
        let track = QuizTrack::new("spotify:track:abc", "Song", "Artist", 210_000);
        assert_eq!(track.start_ms, 0);
        assert_eq!(track.end_ms, 30_000);
        assert_eq!(track.snippet(), SnippetRange::new(0, 30_000));
    }

    #[test]
    fn short_tracks_cap_snippet_at_duration() {
        let track = QuizTrack::new("spotify:track:abc", "Sting", "Artist", 12_000);
        assert_eq!(track.end_ms, 12_000);
    }
}
