//! Wire rows for the quiz datastore and their domain mapping.

use chrono::{DateTime, Utc};
use quiz_core::{Quiz, QuizTrack};
use serde::{Deserialize, Serialize};

/// Configuration for connecting to the quiz datastore.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the REST endpoint (e.g. `https://xyz.supabase.co/rest/v1`)
    pub base_url: String,
    /// Project API key sent alongside every request
    pub api_key: String,
}

impl StoreConfig {
    /// Create a store config.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

/// A quiz row with its embedded track rows.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizRow {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub quiz_tracks: Vec<QuizTrackRow>,
}

/// A quiz track row.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizTrackRow {
    pub id: String,
    pub quiz_id: String,
    pub uri: String,
    pub name: String,
    pub artists: String,
    pub duration_ms: u64,
    pub start_ms: u64,
    pub end_ms: u64,
    /// Nullable for rows written before ordering existed
    pub order_index: Option<i64>,
    pub preview_url: Option<String>,
}

impl QuizTrackRow {
    /// Map a row into the domain type, falling back to the row's position
    /// for legacy rows without an order.
    pub(crate) fn into_track(self, fallback_index: usize) -> QuizTrack {
        #[allow(clippy::cast_sign_loss)]
        let order = match self.order_index {
            Some(order) if order >= 0 => order as usize,
            _ => fallback_index,
        };

        QuizTrack {
            id: self.id,
            uri: self.uri,
            name: self.name,
            artists: self.artists,
            duration_ms: self.duration_ms,
            start_ms: self.start_ms,
            end_ms: self.end_ms,
            order,
            cover_url: self.preview_url.filter(|url| !url.is_empty()),
        }
    }
}

impl QuizRow {
    /// Map a row and its embedded tracks into the domain type.
    ///
    /// Tracks come back sorted by their resolved order.
    pub(crate) fn into_quiz(self) -> Quiz {
        let mut tracks: Vec<QuizTrack> = self
            .quiz_tracks
            .into_iter()
            .enumerate()
            .map(|(index, row)| row.into_track(index))
            .collect();
        tracks.sort_by_key(|track| track.order);

        Quiz {
            id: self.id,
            name: self.name,
            tracks,
            created_at: self.created_at,
        }
    }
}

/// Insert payload for a quiz.
#[derive(Debug, Serialize)]
pub(crate) struct NewQuizRow<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Insert/upsert payload for a quiz track.
#[derive(Debug, Serialize)]
pub(crate) struct TrackWriteRow<'a> {
    pub id: &'a str,
    pub quiz_id: &'a str,
    pub uri: &'a str,
    pub name: &'a str,
    pub artists: &'a str,
    pub duration_ms: u64,
    pub start_ms: u64,
    pub end_ms: u64,
    pub order_index: i64,
    pub preview_url: Option<&'a str>,
}

impl<'a> TrackWriteRow<'a> {
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn new(quiz_id: &'a str, track: &'a QuizTrack, order_index: usize) -> Self {
        Self {
            id: &track.id,
            quiz_id,
            uri: &track.uri,
            name: &track.name,
            artists: &track.artists,
            duration_ms: track.duration_ms,
            start_ms: track.start_ms,
            end_ms: track.end_ms,
            order_index: order_index as i64,
            preview_url: track.cover_url.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_row(id: &str, order_index: Option<i64>) -> QuizTrackRow {
        QuizTrackRow {
            id: id.to_string(),
            quiz_id: "quiz-1".to_string(),
            uri: format!("spotify:track:{id}"),
            name: id.to_string(),
            artists: "Artist".to_string(),
            duration_ms: 180_000,
            start_ms: 1_000,
            end_ms: 11_000,
            order_index,
            preview_url: None,
        }
    }

    #[test]
    fn missing_order_index_falls_back_to_row_position() {
        let track = track_row("a", None).into_track(4);
        assert_eq!(track.order, 4);

        let track = track_row("a", Some(-3)).into_track(4);
        assert_eq!(track.order, 4);
    }

    #[test]
    fn quiz_mapping_sorts_tracks_by_order() {
        let row = QuizRow {
            id: "quiz-1".to_string(),
            name: "Round 1".to_string(),
            created_at: Utc::now(),
            quiz_tracks: vec![
                track_row("second", Some(1)),
                track_row("first", Some(0)),
                track_row("last", None),
            ],
        };

        let quiz = row.into_quiz();
        let ids: Vec<&str> = quiz.tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "last"]);
    }

    #[test]
    fn empty_preview_url_becomes_none() {
        let mut row = track_row("a", Some(0));
        row.preview_url = Some(String::new());
        assert_eq!(row.into_track(0).cover_url, None);

        let mut row = track_row("a", Some(0));
        row.preview_url = Some("https://example.com/cover.jpg".to_string());
        assert_eq!(
            row.into_track(0).cover_url.as_deref(),
            Some("https://example.com/cover.jpg")
        );
    }
}
