//! HTTP client and wire types for the chat backend.
//!
//! One endpoint matters: `POST {base}/chat` with a JSON body
//! `{"message": ...}`, answered by `{"reply": ..., "voice": {...}}`. There
//! is no authentication and no status-code taxonomy; any transport or
//! decode failure is reported as one [`ChatError::Backend`].

use crate::error::{ChatError, Result};
use crate::speech::voice::VoiceGender;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Compiled-in default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Request body for `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,
}

/// Backend voice defaults attached to a reply.
///
/// Advisory only: the dispatcher picks the utterance gender uniformly at
/// random and ignores this block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyVoice {
    /// Suggested gender.
    pub gender: VoiceGender,
    /// Suggested voice index.
    pub index: u32,
    /// Suggested pitch multiplier.
    pub pitch: f32,
    /// Suggested rate multiplier.
    pub rate: f32,
}

impl Default for ReplyVoice {
    fn default() -> Self {
        Self {
            gender: VoiceGender::Female,
            index: 0,
            pitch: 1.0,
            rate: 1.0,
        }
    }
}

/// Response body for `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// The AI reply text.
    pub reply: String,
    /// Backend voice defaults (absent from minimal backends).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<ReplyVoice>,
}

/// Client for the chat backend.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChatClient {
    /// Create a client for the given base URL (no trailing `/chat`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one user message and return the parsed reply.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Backend`] for any transport failure or a body
    /// that does not decode to [`ChatReply`]. Non-2xx statuses are not
    /// special-cased: their bodies go through the same decode path.
    pub async fn send(&self, message: &str) -> Result<ChatReply> {
        let url = format!("{}/chat", self.base_url.trim_end_matches('/'));
        debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .json(&ChatRequest {
                message: message.to_owned(),
            })
            .send()
            .await
            .map_err(|e| ChatError::Backend(format!("chat request failed: {e}")))?;

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ChatError::Backend(format!("invalid chat response: {e}")))
    }
}
