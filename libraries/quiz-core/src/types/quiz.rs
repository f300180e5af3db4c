/// Quiz round domain type
use crate::types::QuizTrack;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction for nudging a track within its quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards the start of the round
    Up,
    /// Towards the end of the round
    Down,
}

/// A quiz round: a named, ordered collection of track snippets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique quiz identifier (UUID)
    pub id: String,

    /// Display name of the round
    pub name: String,

    /// Tracks in the round; `order` fields define presentation order
    pub tracks: Vec<QuizTrack>,

    /// When the quiz was created
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    /// Create an empty quiz with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            tracks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Tracks sorted by their `order` field.
    #[must_use]
    pub fn sorted_tracks(&self) -> Vec<&QuizTrack> {
        let mut tracks: Vec<&QuizTrack> = self.tracks.iter().collect();
        tracks.sort_by_key(|track| track.order);
        tracks
    }

    /// Append a track at the end of the round.
    pub fn push_track(&mut self, mut track: QuizTrack) {
        track.order = self.tracks.len();
        self.tracks.push(track);
    }

    /// Nudge a track one slot up or down, clamping at the list edges.
    ///
    /// Orders are renumbered densely from 0 afterwards. Unknown ids leave
    /// the existing orders untouched.
    pub fn move_track(&mut self, track_id: &str, direction: MoveDirection) {
        self.tracks.sort_by_key(|track| track.order);

        let Some(index) = self.tracks.iter().position(|track| track.id == track_id) else {
            return;
        };

        let target = match direction {
            MoveDirection::Up => index.saturating_sub(1),
            MoveDirection::Down => (index + 1).min(self.tracks.len() - 1),
        };

        if target != index {
            let track = self.tracks.remove(index);
            self.tracks.insert(target, track);
        }

        for (order, track) in self.tracks.iter_mut().enumerate() {
            track.order = order;
        }
    }
}

/// Pick which quiz should be selected after a list refresh.
///
/// Keeps the previous selection when it still exists, otherwise falls back
/// to the first quiz in the list.
#[must_use]
pub fn resolve_current_quiz<'a>(quizzes: &'a [Quiz], previous_id: Option<&str>) -> Option<&'a str> {
    if let Some(previous) = previous_id {
        if let Some(quiz) = quizzes.iter().find(|quiz| quiz.id == previous) {
            return Some(quiz.id.as_str());
        }
    }
    quizzes.first().map(|quiz| quiz.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, order: usize) -> QuizTrack {
        let mut track = QuizTrack::new(format!("spotify:track:{id}"), id, "Artist", 180_000);
        track.id = id.to_string();
        track.order = order;
        track
    }

    fn quiz_with_tracks() -> Quiz {
        let mut quiz = Quiz::new("Round 1");
        quiz.tracks = vec![track("a", 0), track("b", 1), track("c", 2)];
        quiz
    }

    #[test]
    fn sorted_tracks_follows_order_field() {
        let mut quiz = Quiz::new("Round 1");
        quiz.tracks = vec![track("b", 1), track("a", 0)];
        let ids: Vec<&str> = quiz.sorted_tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn move_track_swaps_neighbours_and_renumbers() {
        let mut quiz = quiz_with_tracks();
        quiz.move_track("b", MoveDirection::Up);
        let ids: Vec<&str> = quiz.sorted_tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
        let orders: Vec<usize> = quiz.sorted_tracks().iter().map(|t| t.order).collect();
        assert_eq!(orders, [0, 1, 2]);
    }

    #[test]
    fn move_track_clamps_at_edges() {
        let mut quiz = quiz_with_tracks();
        quiz.move_track("a", MoveDirection::Up);
        quiz.move_track("c", MoveDirection::Down);
        let ids: Vec<&str> = quiz.sorted_tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn move_track_ignores_unknown_ids() {
        let mut quiz = quiz_with_tracks();
        quiz.move_track("missing", MoveDirection::Down);
        let ids: Vec<&str> = quiz.sorted_tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn push_track_appends_with_next_order() {
        let mut quiz = quiz_with_tracks();
        quiz.push_track(track("d", 0));
        assert_eq!(quiz.tracks.last().map(|t| t.order), Some(3));
    }

    #[test]
    fn resolve_current_quiz_prefers_existing_previous() {
        let quizzes = vec![Quiz::new("one"), Quiz::new("two")];
        let previous = quizzes[1].id.clone();
        assert_eq!(
            resolve_current_quiz(&quizzes, Some(&previous)),
            Some(previous.as_str())
        );
    }

    #[test]
    fn resolve_current_quiz_falls_back_to_first() {
        let quizzes = vec![Quiz::new("one"), Quiz::new("two")];
        assert_eq!(
            resolve_current_quiz(&quizzes, Some("gone")),
            Some(quizzes[0].id.as_str())
        );
        assert_eq!(resolve_current_quiz(&[], Some("gone")), None);
    }
}
