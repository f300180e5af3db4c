/// Snippet range types for bounded playback
use serde::{Deserialize, Serialize};

/// A bounded playback window within a track, in milliseconds.
///
/// Callers may supply any pair of offsets, including reversed ones; the
/// playback session always works on [`SnippetRange::clamped`] bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetRange {
    /// Start offset into the track, in milliseconds
    pub start_ms: u64,

    /// End offset into the track, in milliseconds
    pub end_ms: u64,
}

impl SnippetRange {
    /// Shortest snippet the player will loop, in milliseconds.
    pub const MIN_LENGTH_MS: u64 = 200;

    /// Create a range from raw caller-supplied offsets.
    #[must_use]
    pub fn new(start_ms: u64, end_ms: u64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Normalize the range for playback.
    ///
    /// The effective start is the smaller of the two offsets; the effective
    /// end is pushed out so the snippet is at least
    /// [`SnippetRange::MIN_LENGTH_MS`] long.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let start_ms = self.start_ms.min(self.end_ms);
        let end_ms = self.end_ms.max(start_ms + Self::MIN_LENGTH_MS);
        Self { start_ms, end_ms }
    }

    /// Length of the snippet in milliseconds.
    ///
    /// Zero when the bounds are reversed; call [`SnippetRange::clamped`]
    /// first for the effective playback length.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}
