//! Quiz Player Storage
//!
//! Remote persistence client for quiz rounds against a PostgREST-style
//! datastore: quiz and track CRUD plus bulk reordering, mapped into the
//! `quiz-core` domain types.
//!
//! The base URL is part of [`StoreConfig`] so tests can run against a mock
//! server.
//!
//! # Example
//!
//! ```ignore
//! use quiz_storage::{QuizStore, StoreConfig};
//!
//! let store = QuizStore::new(StoreConfig::new(
//!     "https://project.example.co/rest/v1",
//!     "public-api-key",
//! ))?;
//!
//! let session = store.session(&user_token);
//! for quiz in session.fetch_quizzes(&user_id).await? {
//!     println!("{} ({} tracks)", quiz.name, quiz.tracks.len());
//! }
//! ```

mod client;
mod error;
mod types;

// Re-export main types
pub use client::{QuizStore, StoreSession};
pub use error::{Result, StoreError};
pub use types::{QuizRow, QuizTrackRow, StoreConfig};
