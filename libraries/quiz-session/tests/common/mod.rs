//! Shared test doubles and helpers for session tests.

use async_trait::async_trait;
use quiz_session::{
    ConnectOptions, PlaybackState, PlayerConnector, PlayerEvent, PlayerHandle, Result,
    SessionError, SessionManager, TokenCallback,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Connector double: records calls, hands the event sender to the test, and
/// can be told to fail loading or connecting.
#[derive(Default)]
pub struct MockConnector {
    pub load_calls: AtomicUsize,
    pub connect_calls: AtomicUsize,
    pub disconnect_calls: Arc<AtomicUsize>,
    pub fail_load: AtomicBool,
    pub fail_connect: AtomicBool,
    events: Mutex<Option<UnboundedSender<PlayerEvent>>>,
    token: Mutex<Option<TokenCallback>>,
}

impl MockConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Emit a player event into the most recent connection.
    pub fn emit(&self, event: PlayerEvent) {
        self.events
            .lock()
            .unwrap()
            .as_ref()
            .expect("no connection established")
            .send(event)
            .expect("event pump gone");
    }

    /// Pull a token the way the player runtime would.
    pub fn pull_token(&self) -> Option<String> {
        let callback = self.token.lock().unwrap();
        callback.as_ref().expect("no connection established")()
    }
}

#[async_trait]
impl PlayerConnector for MockConnector {
    async fn load(&self) -> Result<()> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(SessionError::SdkLoad("player runtime unavailable".into()));
        }
        Ok(())
    }

    async fn connect(
        &self,
        options: ConnectOptions,
        events: UnboundedSender<PlayerEvent>,
    ) -> Result<Box<dyn PlayerHandle>> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(SessionError::Connect("refused".into()));
        }

        *self.events.lock().unwrap() = Some(events);
        *self.token.lock().unwrap() = Some(options.token);

        Ok(Box::new(MockHandle {
            disconnects: Arc::clone(&self.disconnect_calls),
        }))
    }
}

pub struct MockHandle {
    disconnects: Arc<AtomicUsize>,
}

impl PlayerHandle for MockHandle {
    fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Poll the published state until the predicate holds.
pub async fn wait_for_state<F>(manager: &SessionManager, predicate: F) -> PlaybackState
where
    F: Fn(&PlaybackState) -> bool,
{
    for _ in 0..200 {
        let state = manager.state();
        if predicate(&state) {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for state, last seen: {:?}", manager.state());
}
