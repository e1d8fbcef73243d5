//! Offline keyword-matching reply engine.
//!
//! No model, no network: a handful of keyword rules plus a configurable
//! fallback pool. The backend exists to give the client a real peer, not to
//! be clever.

use crate::config::ReplyConfig;
use crate::transcript::TranscriptEntry;
use rand::Rng;
use rand::seq::SliceRandom;

/// Greeting returned for hello/hi/hey inputs.
const GREETING: &str = "Hi — I'm Neura (offline). How can I help?";

/// Offline reply generator.
#[derive(Debug, Clone)]
pub struct ReplyEngine {
    fallbacks: Vec<String>,
    history_window: usize,
}

impl ReplyEngine {
    /// Build an engine from config.
    ///
    /// An empty fallback list falls back to the built-in defaults so
    /// [`Self::reply`] always has something to say.
    pub fn new(config: &ReplyConfig) -> Self {
        let fallbacks = if config.fallback_responses.is_empty() {
            ReplyConfig::default().fallback_responses
        } else {
            config.fallback_responses.clone()
        };
        Self {
            fallbacks,
            history_window: config.history_window,
        }
    }

    /// Generate a reply for one user message.
    pub fn reply(&self, text: &str) -> String {
        let t = text.to_lowercase();

        if ["hello", "hi", "hey"].iter().any(|w| t.contains(w)) {
            return GREETING.to_owned();
        }
        if t.contains("crypto") {
            return "Offline crypto tip: check volume and market cap. For live prices use an \
                    exchange API."
                .to_owned();
        }
        if t.contains("weather") {
            return "Offline weather info: I cannot access live data now. Try local weather apps."
                .to_owned();
        }
        if t.trim().len() < 3 {
            return "Could you give me a bit more detail?".to_owned();
        }

        self.random_fallback(&mut rand::thread_rng())
    }

    /// Summarize a conversation, keeping only the trailing window.
    ///
    /// Returns one `role: text` line per kept entry, or a fixed line when
    /// the history is empty.
    pub fn summarize_history(&self, history: &[TranscriptEntry]) -> String {
        if history.is_empty() {
            return "No conversation history.".to_owned();
        }
        let start = history.len().saturating_sub(self.history_window);
        history[start..]
            .iter()
            .map(|entry| format!("{}: {}", entry.role, entry.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn random_fallback<R: Rng>(&self, rng: &mut R) -> String {
        // `new` guarantees the pool is non-empty.
        self.fallbacks
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| GREETING.to_owned())
    }
}

impl Default for ReplyEngine {
    fn default() -> Self {
        Self::new(&ReplyConfig::default())
    }
}
