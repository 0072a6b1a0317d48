//! REST client for the public FPL API.
//!
//! Wraps the unauthenticated read-only endpoints (static catalog, manager
//! entry, per-gameweek picks, season history) using [`reqwest`]. The base
//! URL is injected so tests can point the client at a mock server.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::types::{BootstrapStatic, GameweekPicks, ManagerEntry, ManagerHistory};

/// Default production base URL for the FPL API.
pub const DEFAULT_BASE_URL: &str = "https://fantasy.premierleague.com/api";

/// Per-request timeout applied to every upstream call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors from the FPL API layer.
#[derive(Debug, thiserror::Error)]
pub enum FplError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The FPL API returned a non-2xx status code.
    #[error("FPL API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl FplError {
    /// Whether the upstream rejected the request with a 404, which for the
    /// entry endpoints means the manager id does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FplError::Api { status: 404, .. })
    }
}

/// HTTP client for the FPL API.
#[derive(Debug, Clone)]
pub struct FplClient {
    client: reqwest::Client,
    base_url: String,
}

impl FplClient {
    /// Create a new client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the static catalog of players, clubs, and position types.
    pub async fn bootstrap_static(&self) -> Result<BootstrapStatic, FplError> {
        self.get_json(format!("{}/bootstrap-static/", self.base_url))
            .await
    }

    /// Fetch a manager's team summary (current gameweek, names, points, leagues).
    pub async fn entry(&self, manager_id: &str) -> Result<ManagerEntry, FplError> {
        self.get_json(format!("{}/entry/{}/", self.base_url, manager_id))
            .await
    }

    /// Fetch a manager's squad picks for one gameweek.
    pub async fn picks(&self, manager_id: &str, gameweek: i32) -> Result<GameweekPicks, FplError> {
        self.get_json(format!(
            "{}/entry/{}/event/{}/picks/",
            self.base_url, manager_id, gameweek
        ))
        .await
    }

    /// Fetch a manager's per-gameweek season history.
    pub async fn history(&self, manager_id: &str) -> Result<ManagerHistory, FplError> {
        self.get_json(format!("{}/entry/{}/history/", self.base_url, manager_id))
            .await
    }

    // ---- private helpers ----

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FplError> {
        let response = self.client.get(&url).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or an [`FplError::Api`] containing the status
    /// and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, FplError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FplError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
