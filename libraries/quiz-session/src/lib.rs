//! Quiz Player - Playback Session
//!
//! The playback session manager for Quiz Player: one player connection per
//! signed-in user, looped snippet playback, and state broadcast.
//!
//! This crate provides:
//! - Credential-driven connection lifecycle (teardown + reconnect on change)
//! - Device discovery and lazy activation against the Spotify Web API
//! - Looped snippet playback with a single owned repeat timer
//! - Recovery from the ready-but-not-yet-active device race (one retry)
//! - Synchronous state broadcast with replay-on-subscribe
//!
//! # Architecture
//!
//! `quiz-session` never talks to a concrete player runtime. Hosts implement
//! [`PlayerConnector`] for their embedding (a webview bridge in the desktop
//! app, a double in tests) and inject it into the [`SessionManager`] at the
//! composition root. The manager is the only writer of the published
//! [`PlaybackState`]; consumers read snapshots or subscribe.
//!
//! All four public operations serialize on one internal lock, so the
//! process-wide invariants hold on any runtime: at most one player
//! connection, at most one pending repeat timer.
//!
//! # Example
//!
//! ```ignore
//! use quiz_core::SnippetRange;
//! use quiz_session::{SessionConfig, SessionManager};
//! use std::sync::Arc;
//!
//! let manager = SessionManager::new(SessionConfig::default(), Arc::new(MyConnector))?;
//!
//! let _subscription = manager.subscribe(|state| {
//!     if let Some(error) = &state.error {
//!         eprintln!("playback error: {error}");
//!     }
//! });
//!
//! manager.set_credential(Some("access-token".into())).await;
//! manager
//!     .play_track("spotify:track:abc", SnippetRange::new(15_000, 25_000))
//!     .await;
//! ```

mod connector;
mod error;
mod events;
mod manager;
mod state;
mod subscribers;

// Public exports
pub use connector::{ConnectOptions, PlayerConnector, PlayerHandle, TokenCallback};
pub use error::{Result, SessionError};
pub use events::PlayerEvent;
pub use manager::{SessionConfig, SessionManager};
pub use state::PlaybackState;
pub use subscribers::Subscription;
