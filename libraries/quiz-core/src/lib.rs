//! Quiz Player Core
//!
//! Platform-agnostic domain types for Quiz Player.
//!
//! This crate defines the quiz round model shared by every other crate:
//! - **Quiz rounds**: [`Quiz`] and its ordered [`QuizTrack`] list
//! - **Snippets**: [`SnippetRange`], the bounded playback window looped by
//!   the playback session
//!
//! No I/O lives here; clients and the playback session build on these types.
//!
//! # Example
//!
//! ```rust
//! use quiz_core::{Quiz, SnippetRange};
//!
//! let quiz = Quiz::new("Friday night round");
//! assert!(quiz.tracks.is_empty());
//!
//! // Reversed bounds are tolerated; playback always re-clamps.
//! let range = SnippetRange::new(5000, 1000).clamped();
//! assert_eq!((range.start_ms, range.end_ms), (1000, 1200));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

// Re-export commonly used types
pub use types::{resolve_current_quiz, MoveDirection, Quiz, QuizTrack, SnippetRange};
