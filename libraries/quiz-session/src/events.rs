//! Player events and state folding.
//!
//! The external player reports a small closed set of asynchronous events;
//! each one folds into the shared [`PlaybackState`] through a single
//! reducing function, independent of how a given player implementation
//! registers its callbacks.

use crate::state::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by a connected player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// The player came up and registered a playback device
    Ready {
        /// Id of the device the player registered
        device_id: String,
    },

    /// The device went away or the connection dropped
    NotReady,

    /// The player runtime failed to initialize
    InitializationError {
        /// Player-supplied failure description
        message: String,
    },

    /// The credential was rejected
    AuthenticationError {
        /// Player-supplied failure description
        message: String,
    },

    /// The account cannot use this player (e.g. no Premium)
    AccountError {
        /// Player-supplied failure description
        message: String,
    },

    /// Periodic playback snapshot from the player
    StateChanged {
        /// Position within the current track, in milliseconds
        position_ms: u64,
        /// URI of the current track, when the player reports one
        track_uri: Option<String>,
    },
}

/// Fold one player event into the published state.
pub(crate) fn fold_event(state: &mut PlaybackState, event: &PlayerEvent) {
    match event {
        PlayerEvent::Ready { device_id } => {
            state.is_ready = true;
            state.device_id = Some(device_id.clone());
            state.device_active = false;
            state.error = None;
        }
        PlayerEvent::NotReady => {
            state.is_ready = false;
            state.device_active = false;
        }
        PlayerEvent::InitializationError { message }
        | PlayerEvent::AuthenticationError { message }
        | PlayerEvent::AccountError { message } => {
            state.is_ready = false;
            state.device_active = false;
            state.error = Some(message.clone());
        }
        PlayerEvent::StateChanged {
            position_ms,
            track_uri,
        } => {
            state.position_ms = Some(*position_ms);
            state.current_track_uri = track_uri.clone();
        }
    }
}
