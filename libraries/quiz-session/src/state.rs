//! Published playback session state.

use serde::{Deserialize, Serialize};

/// The single mutable record the session broadcasts to subscribers.
///
/// Created once at session construction with everything unset; mutated only
/// by the session manager in response to player events or API call
/// outcomes; reset (never destroyed) on teardown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Id of the playback device created for this session, once the player
    /// has reported ready or a device listing resolved it
    pub device_id: Option<String>,

    /// Whether the player connection exists and has reported ready
    pub is_ready: bool,

    /// Whether this device is the account's current playback target.
    /// A ready device is not necessarily the one audio routes to;
    /// activation is a separate explicit step.
    pub device_active: bool,

    /// Last human-readable failure, if any
    pub error: Option<String>,

    /// Last playback position reported by the player, advisory only
    pub position_ms: Option<u64>,

    /// URI of the last track the player reported, advisory only
    pub current_track_uri: Option<String>,
}

impl PlaybackState {
    /// Reset the connection-scoped fields to their initial shape.
    ///
    /// `error` is deliberately left alone so a failure that caused the
    /// teardown stays visible until something clears it.
    pub(crate) fn reset_connection(&mut self) {
        self.device_id = None;
        self.is_ready = false;
        self.device_active = false;
        self.position_ms = None;
        self.current_track_uri = None;
    }
}
