//! Player-control endpoints of the Spotify Web API.
//!
//! These are the account-level calls the playback session drives: listing
//! devices, transferring playback onto a device, and starting/pausing
//! playback. A 404 from the transfer/play endpoints means the device is not
//! (or no longer) recognized as an active target.

use crate::error::{response_error, Result, SpotifyError};
use crate::types::{DevicesResponse, SpotifyDevice};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

/// Borrowed client for the player-control endpoints.
///
/// Cheap to construct per call; the owner supplies the HTTP client, base URL
/// and the current bearer token, so a credential change never leaves a stale
/// token captured here.
pub struct PlayerClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> PlayerClient<'a> {
    /// Borrow a player client for one or more calls with the same token.
    pub fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// List the playback devices registered with the user's account.
    pub async fn list_devices(&self) -> Result<Vec<SpotifyDevice>> {
        let url = format!("{}/me/player/devices", self.base_url);
        debug!(url = %url, "Listing playback devices");

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        let payload: DevicesResponse = response.json().await.map_err(|e| {
            SpotifyError::Parse(format!("Failed to parse device listing: {}", e))
        })?;

        debug!(devices = payload.devices.len(), "Device listing complete");
        Ok(payload.devices)
    }

    /// Make a device the account's active playback target without starting
    /// playback.
    pub async fn transfer_playback(&self, device_id: &str) -> Result<()> {
        let url = format!("{}/me/player", self.base_url);
        debug!(url = %url, device_id = %device_id, "Transferring playback");

        let response = self
            .http
            .put(&url)
            .bearer_auth(self.access_token)
            .json(&json!({ "device_ids": [device_id], "play": false }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }

    /// Start playback of a track on a device at a position offset.
    pub async fn start_playback(&self, device_id: &str, uri: &str, position_ms: u64) -> Result<()> {
        let url = format!("{}/me/player/play", self.base_url);
        debug!(
            url = %url,
            device_id = %device_id,
            uri = %uri,
            position_ms,
            "Starting playback"
        );

        let response = self
            .http
            .put(&url)
            .query(&[("device_id", device_id)])
            .bearer_auth(self.access_token)
            .json(&json!({ "uris": [uri], "position_ms": position_ms }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }

    /// Pause playback on a device.
    pub async fn pause_playback(&self, device_id: &str) -> Result<()> {
        let url = format!("{}/me/player/pause", self.base_url);
        debug!(url = %url, device_id = %device_id, "Pausing playback");

        let response = self
            .http
            .put(&url)
            .query(&[("device_id", device_id)])
            .bearer_auth(self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }
}
