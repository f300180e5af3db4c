//! Quiz datastore client.
//!
//! The datastore is a PostgREST-style REST API: every table is a resource,
//! filters are query parameters (`id=eq.{value}`), and upserts are inserts
//! with an `on_conflict` target plus a `Prefer: resolution=merge-duplicates`
//! header.

use crate::error::{response_error, Result, StoreError};
use crate::types::{NewQuizRow, QuizRow, StoreConfig, TrackWriteRow};
use quiz_core::{Quiz, QuizTrack};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Owning client for the quiz datastore.
///
/// Holds the HTTP client and project configuration; the signed-in user's
/// token is borrowed per batch of calls through [`QuizStore::session`], so a
/// credential change never leaves a stale token captured here.
///
/// # Example
///
/// ```ignore
/// use quiz_storage::{QuizStore, StoreConfig};
///
/// let store = QuizStore::new(StoreConfig::new(
///     "https://project.example.co/rest/v1",
///     "public-api-key",
/// ))?;
///
/// let quizzes = store.session(&user_token).fetch_quizzes(&user_id).await?;
/// ```
pub struct QuizStore {
    http: Client,
    config: StoreConfig,
}

impl QuizStore {
    /// Create a store client from the project configuration.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("QuizPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::Request)?;

        let config = StoreConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };

        Ok(Self { http, config })
    }

    /// Borrow a session handle for calls authorized by the given user token.
    pub fn session<'a>(&'a self, access_token: &'a str) -> StoreSession<'a> {
        StoreSession {
            http: &self.http,
            config: &self.config,
            access_token,
        }
    }
}

/// Borrowed handle for datastore calls on behalf of one signed-in user.
pub struct StoreSession<'a> {
    http: &'a Client,
    config: &'a StoreConfig,
    access_token: &'a str,
}

/// Embedded-select listing every column the track mapping needs.
const QUIZ_SELECT: &str = "id,name,created_at,\
    quiz_tracks(id,quiz_id,uri,name,artists,duration_ms,start_ms,end_ms,order_index,preview_url)";

impl StoreSession<'_> {
    /// Fetch the user's quizzes with their tracks, oldest round first.
    ///
    /// Tracks come back sorted by their stored order.
    pub async fn fetch_quizzes(&self, user_id: &str) -> Result<Vec<Quiz>> {
        let url = format!("{}/quizzes", self.config.base_url);
        debug!(url = %url, user_id = %user_id, "Fetching quizzes");

        let response = self
            .request(reqwest::Method::GET, &url)
            .query(&[
                ("select", QUIZ_SELECT),
                ("user_id", &format!("eq.{user_id}")),
                ("order", "created_at.asc"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        let rows: Vec<QuizRow> = response.json().await.map_err(|e| {
            StoreError::Parse(format!("Failed to parse quiz listing: {}", e))
        })?;

        debug!(quizzes = rows.len(), "Quiz listing complete");
        Ok(rows.into_iter().map(QuizRow::into_quiz).collect())
    }

    /// Persist a new quiz round for the user.
    ///
    /// Tracks are added separately through [`add_track`](Self::add_track).
    pub async fn create_quiz(&self, user_id: &str, quiz: &Quiz) -> Result<()> {
        let url = format!("{}/quizzes", self.config.base_url);
        debug!(url = %url, quiz_id = %quiz.id, "Creating quiz");

        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&NewQuizRow {
                id: &quiz.id,
                user_id,
                name: &quiz.name,
                created_at: quiz.created_at,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }

    /// Delete a quiz the user owns; its tracks cascade server-side.
    pub async fn delete_quiz(&self, quiz_id: &str, user_id: &str) -> Result<()> {
        let url = format!("{}/quizzes", self.config.base_url);
        debug!(url = %url, quiz_id = %quiz_id, "Deleting quiz");

        let response = self
            .request(reqwest::Method::DELETE, &url)
            .query(&[
                ("id", &format!("eq.{quiz_id}")),
                ("user_id", &format!("eq.{user_id}")),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }

    /// Insert a track into a quiz at an explicit position.
    pub async fn add_track(
        &self,
        quiz_id: &str,
        track: &QuizTrack,
        order_index: usize,
    ) -> Result<()> {
        let url = format!("{}/quiz_tracks", self.config.base_url);
        debug!(url = %url, quiz_id = %quiz_id, track_id = %track.id, "Adding track");

        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&TrackWriteRow::new(quiz_id, track, order_index))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }

    /// Update a track's snippet bounds.
    pub async fn update_track_range(
        &self,
        track_id: &str,
        start_ms: u64,
        end_ms: u64,
    ) -> Result<()> {
        let url = format!("{}/quiz_tracks", self.config.base_url);
        debug!(url = %url, track_id = %track_id, start_ms, end_ms, "Updating track range");

        let response = self
            .request(reqwest::Method::PATCH, &url)
            .query(&[("id", &format!("eq.{track_id}"))])
            .json(&json!({ "start_ms": start_ms, "end_ms": end_ms }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }

    /// Update or clear a track's cover URL.
    pub async fn update_track_cover(
        &self,
        track_id: &str,
        cover_url: Option<&str>,
    ) -> Result<()> {
        let url = format!("{}/quiz_tracks", self.config.base_url);
        debug!(url = %url, track_id = %track_id, "Updating track cover");

        let response = self
            .request(reqwest::Method::PATCH, &url)
            .query(&[("id", &format!("eq.{track_id}"))])
            .json(&json!({ "preview_url": cover_url }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }

    /// Remove a track from its quiz.
    pub async fn delete_track(&self, track_id: &str) -> Result<()> {
        let url = format!("{}/quiz_tracks", self.config.base_url);
        debug!(url = %url, track_id = %track_id, "Deleting track");

        let response = self
            .request(reqwest::Method::DELETE, &url)
            .query(&[("id", &format!("eq.{track_id}"))])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }

    /// Persist a quiz's track order in one upsert.
    ///
    /// Every row is rewritten with its position in `tracks` as the order.
    /// An empty track list sends nothing.
    pub async fn update_track_orders(&self, quiz_id: &str, tracks: &[QuizTrack]) -> Result<()> {
        if tracks.is_empty() {
            return Ok(());
        }

        let rows: Vec<TrackWriteRow<'_>> = tracks
            .iter()
            .enumerate()
            .map(|(index, track)| TrackWriteRow::new(quiz_id, track, index))
            .collect();

        let url = format!("{}/quiz_tracks", self.config.base_url);
        debug!(url = %url, quiz_id = %quiz_id, rows = rows.len(), "Upserting track order");

        let response = self
            .request(reqwest::Method::POST, &url)
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&rows)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }

    /// Base request with the project key and the user's bearer token.
    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.access_token)
    }
}
