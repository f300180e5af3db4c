//! The external-player seam.
//!
//! The session manager is agnostic of how the actual player runtime is
//! embedded (webview bridge, librespot, a test double). Hosts provide a
//! [`PlayerConnector`] that can load the runtime once and construct
//! connected players; the manager owns the returned [`PlayerHandle`] and
//! consumes the event stream.

use crate::error::Result;
use crate::events::PlayerEvent;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Pull-based credential source handed to the player.
///
/// The player asks for the token whenever it needs one instead of keeping
/// a static copy, so a credential change is picked up on the next pull.
/// Returns `None` once the session is signed out.
pub type TokenCallback = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Options for constructing a connected player.
pub struct ConnectOptions {
    /// Display name the playback device registers under
    pub name: String,

    /// Initial playback volume, 0.0 to 1.0
    pub volume: f32,

    /// Credential source the player pulls tokens from
    pub token: TokenCallback,
}

/// Capability to load the player runtime and construct connected players.
#[async_trait]
pub trait PlayerConnector: Send + Sync {
    /// Load the player runtime.
    ///
    /// Called before every connection attempt; the session guarantees a
    /// successful load happens at most once per process, so implementations
    /// may do one-shot global setup here. A failure is terminal for the
    /// current attempt only.
    async fn load(&self) -> Result<()>;

    /// Construct a player and connect it.
    ///
    /// Lifecycle events are delivered through `events` until the handle is
    /// disconnected or the channel is dropped.
    async fn connect(
        &self,
        options: ConnectOptions,
        events: mpsc::UnboundedSender<PlayerEvent>,
    ) -> Result<Box<dyn PlayerHandle>>;
}

/// A live player connection owned by the session.
pub trait PlayerHandle: Send + Sync {
    /// Tear down the connection and release the device.
    fn disconnect(&self);
}
