//! Message dispatch: transcript rendering, backend round-trip, and speech.
//!
//! One dispatch per user action: render the user entry, issue one request,
//! render the reply (or the fallback) as an AI entry, and hand AI entries to
//! the speaker. Nothing caps concurrent dispatches; overlapping sends may
//! render their replies out of order, and no correlation token ties a reply
//! to its originating request.

use crate::chat::ChatClient;
use crate::speech::Speaker;
use crate::speech::voice::{Voice, VoiceGender};
use crate::transcript::{Role, Transcript, TranscriptEntry};
use rand::Rng;
use tokio::sync::Mutex;
use tracing::error;

/// Fixed AI entry rendered when the backend cannot be reached or answers
/// with something unparseable.
pub const FALLBACK_REPLY: &str = "Error: Cannot reach backend.";

/// Dispatches user input through the transcript, backend, and speaker.
///
/// Methods take `&self`; wrap in an [`Arc`](std::sync::Arc) to dispatch from
/// multiple tasks.
pub struct MessageDispatcher {
    client: ChatClient,
    transcript: Mutex<Transcript>,
    speaker: Mutex<Speaker>,
}

impl MessageDispatcher {
    /// Create a dispatcher over a backend client, a transcript, and a speaker.
    pub fn new(client: ChatClient, transcript: Transcript, speaker: Speaker) -> Self {
        Self {
            client,
            transcript: Mutex::new(transcript),
            speaker: Mutex::new(speaker),
        }
    }

    /// Dispatch one user input.
    ///
    /// Whitespace-only input is ignored entirely: no transcript entry, no
    /// request. Otherwise the trimmed text is rendered as a user entry
    /// before any network activity, sent to the backend, and the reply (or
    /// [`FALLBACK_REPLY`] on any failure) is rendered as an AI entry. Every
    /// AI entry triggers exactly one speech attempt with a uniformly random
    /// gender; failures never propagate to the caller.
    pub async fn send_message(&self, input: &str) {
        let text = input.trim();
        if text.is_empty() {
            return;
        }

        self.transcript.lock().await.push(Role::User, text);

        match self.client.send(text).await {
            Ok(reply) => self.render_ai(&reply.reply).await,
            Err(e) => {
                error!("chat request failed: {e}");
                self.render_ai(FALLBACK_REPLY).await;
            }
        }
    }

    /// Apply a refreshed voice catalog to the speaker.
    ///
    /// Called from the engine's catalog-ready subscription.
    pub async fn apply_voice_catalog(&self, voices: Vec<Voice>) {
        self.speaker.lock().await.apply_catalog(voices);
    }

    /// Snapshot of the transcript entries in append order.
    pub async fn entries(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().await.entries().to_vec()
    }

    /// Render an AI entry and trigger its single speech attempt.
    async fn render_ai(&self, text: &str) {
        self.transcript.lock().await.push(Role::Ai, text);

        let gender = if rand::thread_rng().gen_bool(0.5) {
            VoiceGender::Male
        } else {
            VoiceGender::Female
        };
        // Fire-and-forget: the handle is dropped, the engine queue owns
        // playback from here.
        let _ = self.speaker.lock().await.speak(text, gender);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::speech::voice::Voice;
    use crate::speech::{SpeechEngine, SpeechHandle, Utterance};
    use std::sync::{Arc, Mutex as StdMutex};

    struct RecordingEngine {
        voices: Vec<Voice>,
        submitted: StdMutex<Vec<Utterance>>,
    }

    impl SpeechEngine for RecordingEngine {
        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn submit(&self, utterance: Utterance) -> SpeechHandle {
            self.submitted.lock().unwrap().push(utterance);
            SpeechHandle::completed()
        }
    }

    fn dispatcher_with_engine(base_url: &str) -> (MessageDispatcher, Arc<RecordingEngine>) {
        let engine = Arc::new(RecordingEngine {
            voices: vec![Voice::new("Google UK English Female", "en-GB")],
            submitted: StdMutex::new(Vec::new()),
        });
        let speaker = Speaker::new(Arc::clone(&engine) as Arc<dyn SpeechEngine>);
        let dispatcher =
            MessageDispatcher::new(ChatClient::new(base_url), Transcript::new(), speaker);
        (dispatcher, engine)
    }

    #[tokio::test]
    async fn whitespace_input_renders_nothing() {
        // Unroutable address; must not matter, no request is issued.
        let (dispatcher, engine) = dispatcher_with_engine("http://127.0.0.1:1");

        dispatcher.send_message("   \t  ").await;

        assert!(dispatcher.entries().await.is_empty());
        assert!(engine.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_backend_renders_fallback_and_speaks_it() {
        let (dispatcher, engine) = dispatcher_with_engine("http://127.0.0.1:1");

        dispatcher.send_message("hello").await;

        let entries = dispatcher.entries().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, Role::User);
        assert_eq!(entries[0].text, "hello");
        assert_eq!(entries[1].role, Role::Ai);
        assert_eq!(entries[1].text, FALLBACK_REPLY);

        let submitted = engine.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn user_entries_never_speak() {
        let (dispatcher, engine) = dispatcher_with_engine("http://127.0.0.1:1");

        dispatcher.send_message("one").await;
        dispatcher.send_message("two").await;

        // Two dispatches, two AI fallbacks, exactly two speech attempts.
        assert_eq!(engine.submitted.lock().unwrap().len(), 2);
    }
}
