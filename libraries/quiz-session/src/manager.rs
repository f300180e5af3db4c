//! Playback session manager - core orchestration
//!
//! Owns the single player connection for the signed-in user, resolves and
//! activates the playback device, and drives looped snippet playback.

use crate::connector::{ConnectOptions, PlayerConnector, PlayerHandle, TokenCallback};
use crate::error::{Result, SessionError};
use crate::events::{fold_event, PlayerEvent};
use crate::state::PlaybackState;
use crate::subscribers::{SubscriberRegistry, Subscription};
use quiz_core::SnippetRange;
use quiz_spotify::{PlayerClient, SPOTIFY_API_BASE};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::{mpsc, Mutex, OnceCell};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Message published when playback is attempted without a credential.
const NOT_READY_MESSAGE: &str = "Player not ready";

/// Message published when no registered device matches the player name.
const DEVICE_NOT_FOUND_MESSAGE: &str = "Spotify player device not found";

/// Message published when the device exists but cannot become the active
/// playback target (404 from transfer/play).
const NOT_ACTIVE_MESSAGE: &str =
    "Spotify player not active. Open Spotify and try again (Premium required).";

/// Configuration for a playback session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the Spotify Web API
    pub api_base_url: String,

    /// Display name the playback device registers under; device discovery
    /// filters on this exact name
    pub player_name: String,

    /// Initial playback volume, 0.0 to 1.0
    pub volume: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: SPOTIFY_API_BASE.to_string(),
            player_name: "Quiz Player".to_string(),
            volume: 0.8,
        }
    }
}

/// The snippet currently looping, always stored with clamped bounds.
#[derive(Debug, Clone)]
struct ActiveSnippet {
    uri: String,
    range: SnippetRange,
}

/// Connection-scoped mutable record, owned by the operation lock.
#[derive(Default)]
struct SessionRecord {
    /// Live player connection, at most one per process
    player: Option<Box<dyn PlayerHandle>>,

    /// Task folding player events into the published state
    event_pump: Option<JoinHandle<()>>,

    /// Pending snippet-loop timer, at most one per process
    repeat_timer: Option<JoinHandle<()>>,

    /// Bumped on every timer cancel/schedule; a fired timer re-checks this
    /// before replaying so a superseded loop can never re-fire
    timer_generation: u64,

    /// The snippet currently looping; set and cleared together with
    /// `repeat_timer`
    active_snippet: Option<ActiveSnippet>,

    /// One-shot flag: whether activation has succeeded since the player
    /// last reported ready
    has_activated: bool,
}

/// Central playback session management.
///
/// One `SessionManager` exists per process, constructed at the composition
/// root and handed to consumers by cloning the handle. It maintains one
/// player connection per active credential, exposes snippet playback with
/// automatic looping and activation recovery, and broadcasts every state
/// transition to subscribers.
///
/// Failures never escape [`play_track`](SessionManager::play_track) or
/// [`pause`](SessionManager::pause): they are folded into the published
/// state's `error` field, and every failure leaves the session in a
/// consistent state the next call can retry from.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: SessionConfig,
    http: reqwest::Client,
    connector: Arc<dyn PlayerConnector>,

    /// Guards the one-time player runtime load; stays empty after a failed
    /// attempt so the next connection retries it
    sdk_loaded: OnceCell<()>,

    /// Current bearer token; `None` means signed out. Kept outside the
    /// operation lock so the player's pull-based token callback stays
    /// synchronous.
    credential: StdMutex<Option<String>>,

    /// The broadcastable state record
    state: StdMutex<PlaybackState>,

    /// State-change subscribers, notified in registration order
    subscribers: Arc<StdMutex<SubscriberRegistry>>,

    /// Serializes every session operation; holding it across the whole of
    /// an operation is what upholds the "at most one timer, at most one
    /// connection" invariants on a multi-threaded runtime
    session: Mutex<SessionRecord>,
}

impl SessionManager {
    /// Create a session manager with the given connector.
    pub fn new(config: SessionConfig, connector: Arc<dyn PlayerConnector>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("QuizPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(SessionInner {
                config,
                http,
                connector,
                sdk_loaded: OnceCell::new(),
                credential: StdMutex::new(None),
                state: StdMutex::new(PlaybackState::default()),
                subscribers: Arc::new(StdMutex::new(SubscriberRegistry::default())),
                session: Mutex::new(SessionRecord::default()),
            }),
        })
    }

    /// Snapshot of the current published state.
    pub fn state(&self) -> PlaybackState {
        self.inner.state.lock().expect("state lock poisoned").clone()
    }

    /// Register a callback for every future state change.
    ///
    /// The callback is invoked once immediately with the current state.
    /// Dropping the returned [`Subscription`] unregisters it. Callbacks run
    /// on whichever task publishes the change and must not call back into
    /// the manager.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&PlaybackState) + Send + Sync + 'static,
    {
        let id = self
            .inner
            .subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .insert(Box::new(callback));
        let subscription = Subscription::new(id, Arc::downgrade(&self.inner.subscribers));

        let snapshot = self.state();
        self.inner
            .subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .notify_one(id, &snapshot);

        subscription
    }

    /// Install the credential for the signed-in user, or `None` on sign-out.
    ///
    /// Idempotent: setting the same token again is a no-op. A changed token
    /// always tears the previous connection down fully before a new one is
    /// established.
    pub async fn set_credential(&self, token: Option<String>) {
        let inner = &self.inner;
        let mut session = inner.session.lock().await;

        {
            let current = inner.credential.lock().expect("credential lock poisoned");
            if *current == token {
                debug!("credential unchanged, skipping reconnect");
                return;
            }
        }

        inner.teardown(&mut session);
        let connect = token.is_some();
        *inner.credential.lock().expect("credential lock poisoned") = token;

        if connect {
            inner.establish(&mut session).await;
        }
    }

    /// Start looped playback of a track snippet.
    ///
    /// Returns `false` on any failure; the reason is published in the
    /// state's `error` field. On success the snippet loops until paused,
    /// replaced by another `play_track`, or the session is torn down.
    pub async fn play_track(&self, uri: &str, range: SnippetRange) -> bool {
        let mut session = self.inner.session.lock().await;
        self.inner.play_locked(&mut session, uri, range).await
    }

    /// Stop playback on the session's device.
    ///
    /// No-op without a credential or a known device. The pause call itself
    /// is best-effort; the snippet loop is always cancelled.
    pub async fn pause(&self) {
        let inner = &self.inner;
        let mut session = inner.session.lock().await;

        let token = inner.credential.lock().expect("credential lock poisoned").clone();
        let device_id = inner.state.lock().expect("state lock poisoned").device_id.clone();
        let (Some(token), Some(device_id)) = (token, device_id) else {
            return;
        };

        let player = PlayerClient::new(&inner.http, &inner.config.api_base_url, &token);
        if let Err(err) = player.pause_playback(&device_id).await {
            warn!(error = %err, "pause request failed");
        }

        session.active_snippet = None;
        SessionInner::cancel_repeat_timer(&mut session);
    }
}

impl SessionInner {
    // ===== Device lifecycle =====

    /// Establish a player connection for the current credential.
    ///
    /// Failures are published into the state; the session stays torn down.
    async fn establish(self: &Arc<Self>, session: &mut SessionRecord) {
        if let Err(err) = self
            .sdk_loaded
            .get_or_try_init(|| self.connector.load())
            .await
        {
            warn!(error = %err, "player runtime load failed");
            self.update_state(|state| {
                state.is_ready = false;
                state.device_active = false;
                state.error = Some(err.to_string());
            });
            return;
        }

        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let pump_inner = Arc::downgrade(self);
        session.event_pump = Some(tokio::spawn(async move {
            while let Some(event) = events_rx.recv().await {
                let Some(inner) = pump_inner.upgrade() else {
                    break;
                };
                inner.apply_event(event).await;
            }
        }));

        let token_inner = Arc::downgrade(self);
        let token: TokenCallback = Arc::new(move || {
            token_inner
                .upgrade()
                .and_then(|inner| inner.credential.lock().ok()?.clone())
        });

        let options = ConnectOptions {
            name: self.config.player_name.clone(),
            volume: self.config.volume,
            token,
        };

        match self.connector.connect(options, events_tx).await {
            Ok(player) => {
                info!(player_name = %self.config.player_name, "player connected");
                session.player = Some(player);
            }
            Err(err) => {
                warn!(error = %err, "player connection failed");
                if let Some(pump) = session.event_pump.take() {
                    pump.abort();
                }
                self.update_state(|state| {
                    state.is_ready = false;
                    state.device_active = false;
                    state.error = Some(err.to_string());
                });
            }
        }
    }

    /// Tear the current connection down and publish the reset state.
    fn teardown(&self, session: &mut SessionRecord) {
        Self::cancel_repeat_timer(session);
        if let Some(pump) = session.event_pump.take() {
            pump.abort();
        }
        if let Some(player) = session.player.take() {
            player.disconnect();
            info!("player disconnected");
        }
        session.active_snippet = None;
        session.has_activated = false;

        self.update_state(PlaybackState::reset_connection);
    }

    /// Fold one player event into the published state.
    async fn apply_event(&self, event: PlayerEvent) {
        debug!(?event, "player event");

        if matches!(event, PlayerEvent::Ready { .. }) {
            // A fresh ready means the account may no longer route audio to
            // this device; require a new activation before trusting it.
            let mut session = self.session.lock().await;
            session.has_activated = false;
        }

        self.update_state(|state| fold_event(state, &event));
    }

    // ===== Snippet playback =====

    async fn play_locked(
        self: &Arc<Self>,
        session: &mut SessionRecord,
        uri: &str,
        range: SnippetRange,
    ) -> bool {
        let Some(token) = self
            .credential
            .lock()
            .expect("credential lock poisoned")
            .clone()
        else {
            self.update_state(|state| state.error = Some(NOT_READY_MESSAGE.to_string()));
            return false;
        };

        // Whatever happens next, the previous snippet must stop looping.
        // The snippet reference and its timer are always cleared together.
        Self::cancel_repeat_timer(session);
        session.active_snippet = None;

        // Snapshot before the lazy activation below: a 404 from the play
        // call is only retried when activation had not yet succeeded when
        // this operation began.
        let had_activated = session.has_activated;

        let device_id = match self.resolve_device_id(&token).await {
            Ok(device_id) => device_id,
            Err(err) => {
                warn!(error = %err, "device resolution failed");
                self.update_state(|state| {
                    state.error = Some(DEVICE_NOT_FOUND_MESSAGE.to_string());
                });
                return false;
            }
        };

        let device_active = self.state.lock().expect("state lock poisoned").device_active;
        if !device_active && !self.activate_device(session, &token, &device_id).await {
            return false;
        }

        let clamped = range.clamped();
        let player = PlayerClient::new(&self.http, &self.config.api_base_url, &token);

        let mut outcome = player
            .start_playback(&device_id, uri, clamped.start_ms)
            .await;

        // The device can be ready per the player yet unknown to the account
        // API for a moment after (re)registration. One re-activation plus
        // one retry covers that window.
        if !had_activated && failed_with_status(&outcome, 404) {
            debug!("playback 404 before first activation, re-activating once");
            if self.activate_device(session, &token, &device_id).await {
                outcome = player
                    .start_playback(&device_id, uri, clamped.start_ms)
                    .await;
            }
        }

        if let Err(err) = outcome {
            let message = match err.status() {
                Some(404) => NOT_ACTIVE_MESSAGE.to_string(),
                Some(status) => format!("Play failed: {status}"),
                None => format!("Play failed: {err}"),
            };
            warn!(error = %err, uri = %uri, "start playback failed");
            self.update_state(|state| state.error = Some(message));
            return false;
        }

        session.active_snippet = Some(ActiveSnippet {
            uri: uri.to_string(),
            range: clamped,
        });
        self.update_state(|state| {
            state.current_track_uri = Some(uri.to_string());
            state.error = None;
        });

        self.schedule_repeat(session, uri.to_string(), range, clamped.duration_ms());
        true
    }

    /// Resolve the device id for this session's player name.
    ///
    /// Reuses the cached id when known; otherwise queries the account's
    /// device listing and caches the match.
    async fn resolve_device_id(&self, token: &str) -> Result<String> {
        if let Some(device_id) = self.state.lock().expect("state lock poisoned").device_id.clone() {
            return Ok(device_id);
        }

        let player = PlayerClient::new(&self.http, &self.config.api_base_url, token);
        let devices = player.list_devices().await?;

        let found = devices
            .into_iter()
            .find(|device| device.name == self.config.player_name)
            .and_then(|device| device.id);

        match found {
            Some(device_id) => {
                debug!(device_id = %device_id, "resolved playback device");
                self.update_state(|state| state.device_id = Some(device_id.clone()));
                Ok(device_id)
            }
            None => Err(SessionError::DeviceNotFound),
        }
    }

    /// Make the device the account's active playback target.
    ///
    /// Publishes the outcome and records the one-shot activation flag.
    async fn activate_device(
        &self,
        session: &mut SessionRecord,
        token: &str,
        device_id: &str,
    ) -> bool {
        let player = PlayerClient::new(&self.http, &self.config.api_base_url, token);

        match player.transfer_playback(device_id).await {
            Ok(()) => {
                debug!(device_id = %device_id, "device activated");
                session.has_activated = true;
                self.update_state(|state| {
                    state.device_active = true;
                    state.error = None;
                });
                true
            }
            Err(err) => {
                let message = match err.status() {
                    Some(404) => NOT_ACTIVE_MESSAGE.to_string(),
                    Some(status) => format!("Activate failed: {status}"),
                    None => format!("Activate failed: {err}"),
                };
                warn!(error = %err, device_id = %device_id, "device activation failed");
                self.update_state(|state| {
                    state.device_active = false;
                    state.error = Some(message);
                });
                false
            }
        }
    }

    // ===== Repeat timer =====

    /// Cancel any pending snippet-loop timer.
    fn cancel_repeat_timer(session: &mut SessionRecord) {
        session.timer_generation = session.timer_generation.wrapping_add(1);
        if let Some(timer) = session.repeat_timer.take() {
            timer.abort();
        }
    }

    /// Schedule the snippet to replay after its full length has elapsed.
    fn schedule_repeat(
        self: &Arc<Self>,
        session: &mut SessionRecord,
        uri: String,
        range: SnippetRange,
        delay_ms: u64,
    ) {
        session.timer_generation = session.timer_generation.wrapping_add(1);
        let generation = session.timer_generation;

        let inner = Arc::downgrade(self);
        session.repeat_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            let Some(inner) = inner.upgrade() else {
                return;
            };
            inner.replay_snippet(generation, &uri, range).await;
        }));
    }

    /// Timer body: replay the snippet unless it was superseded.
    async fn replay_snippet(self: Arc<Self>, generation: u64, uri: &str, range: SnippetRange) {
        let mut session = self.session.lock().await;
        if session.timer_generation != generation {
            // Another snippet (or a pause/teardown) took over while this
            // timer was sleeping or waiting for the lock.
            return;
        }

        // Take our own handle so the cancel inside play_locked does not
        // abort the very task running it.
        session.repeat_timer = None;

        debug!(uri = %uri, "looping snippet");
        self.play_locked(&mut session, uri, range).await;
    }

    // ===== State broadcast =====

    /// Apply a state mutation and notify every subscriber with the result.
    fn update_state(&self, mutate: impl FnOnce(&mut PlaybackState)) {
        let snapshot = {
            let mut state = self.state.lock().expect("state lock poisoned");
            mutate(&mut state);
            state.clone()
        };

        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .notify(&snapshot);
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        let session = self.session.get_mut();
        if let Some(timer) = session.repeat_timer.take() {
            timer.abort();
        }
        if let Some(pump) = session.event_pump.take() {
            pump.abort();
        }
        if let Some(player) = session.player.take() {
            player.disconnect();
        }
    }
}

/// Whether an API outcome failed with the given HTTP status.
fn failed_with_status(outcome: &quiz_spotify::Result<()>, status: u16) -> bool {
    matches!(outcome, Err(err) if err.status() == Some(status))
}
