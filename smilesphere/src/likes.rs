//! Like toggle client
//!
//! Each photo card carries a like button that POSTs to the server and
//! repaints the count and heart icon from the reply. The server owns
//! the toggle decision; the client never flips state optimistically.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::DEFAULT_LIKE_BASE_URL;

/// Default timeout for like requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Wire reply from the like endpoint
///
/// Failure replies may carry nothing but the flag, so the counters
/// default when absent.
#[derive(Debug, Deserialize)]
struct LikeResponse {
    success: bool,
    #[serde(default)]
    likes: u64,
    #[serde(default)]
    liked: bool,
}

/// Server-confirmed like state to paint into the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeUpdate {
    /// Total likes on the photo after the toggle
    pub likes: u64,
    /// Whether the current visitor now likes the photo
    pub liked: bool,
}

/// Error toggling a like
#[derive(Debug, thiserror::Error)]
pub enum LikeError {
    /// The request never produced a usable reply
    #[error("Like request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Like endpoint returned status {status}")]
    Status {
        /// HTTP status code from the reply
        status: u16,
    },
}

/// Client for the photo like endpoint
#[derive(Debug, Clone)]
pub struct LikeClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl LikeClient {
    /// Create a client against the default server address
    pub fn new() -> Result<Self, LikeError> {
        Self::with_base_url(DEFAULT_LIKE_BASE_URL)
    }

    /// Create a client against a custom server address
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, LikeError> {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            http_client,
        })
    }

    /// The server address requests go to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Toggle the visitor's like on a photo
    ///
    /// Returns the confirmed state to paint, or `None` when the server
    /// declined the toggle; either way the page shows nothing until the
    /// server has spoken.
    pub async fn toggle(&self, photo_id: u64) -> Result<Option<LikeUpdate>, LikeError> {
        let url = format!("{}/like/{}", self.base_url, photo_id);
        debug!(photo_id, "Toggling like");

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(photo_id, status = status.as_u16(), "Like request rejected");
            return Err(LikeError::Status {
                status: status.as_u16(),
            });
        }

        let reply: LikeResponse = response.json().await?;
        if !reply.success {
            debug!(photo_id, "Server declined the like toggle");
            return Ok(None);
        }

        Ok(Some(LikeUpdate {
            likes: reply.likes,
            liked: reply.liked,
        }))
    }
}
