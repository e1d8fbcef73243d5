//! Speech output: voice selection and utterance submission.
//!
//! The [`Speaker`] is the client-facing entry point. It keeps an explicit
//! [`VoiceCatalog`](voice::VoiceCatalog) cache of the engine's voices,
//! picks a voice for each utterance with the gender-name heuristic in
//! [`selector`], applies small random pitch/rate jitter, and submits the
//! result to a [`SpeechEngine`]. Submission is fire-and-forget; the returned
//! [`SpeechHandle`] exists so tests can await completion instead of racing
//! the playback queue.

pub mod queue;
pub mod selector;
pub mod voice;

use crate::speech::voice::{Voice, VoiceCatalog, VoiceGender};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

/// A single text-to-speech playback request.
///
/// Constructed fresh per spoken message; never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak.
    pub text: String,
    /// The chosen voice.
    pub voice: Voice,
    /// Pitch multiplier, jittered per utterance.
    pub pitch: f32,
    /// Rate multiplier, jittered per utterance.
    pub rate: f32,
}

/// Completion signal for a submitted utterance.
///
/// Resolves once the engine has finished (or failed, or discarded) the
/// utterance. Production callers typically drop it.
#[derive(Debug)]
pub struct SpeechHandle {
    done: oneshot::Receiver<()>,
}

impl SpeechHandle {
    /// Wrap a completion receiver.
    pub fn new(done: oneshot::Receiver<()>) -> Self {
        Self { done }
    }

    /// A handle that is already complete.
    pub fn completed() -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(());
        Self { done: rx }
    }

    /// Wait until the utterance has been processed.
    ///
    /// An engine that went away counts as done; this never hangs on a
    /// dropped sender.
    pub async fn finished(self) {
        let _ = self.done.await;
    }
}

/// Engine seam for speech output.
///
/// The engine owns the real voice list (possibly enumerated asynchronously
/// after startup) and an internal queue that serializes playback. The crate
/// ships [`queue::SpeechQueue`]; hosts with a platform speech service plug
/// in their own implementation.
pub trait SpeechEngine: Send + Sync {
    /// Snapshot of the currently enumerated voices. May be empty until the
    /// engine is ready.
    fn voices(&self) -> Vec<Voice>;

    /// Submit an utterance for playback. Must not block on playback.
    fn submit(&self, utterance: Utterance) -> SpeechHandle;
}

/// Voice selection front end over a [`SpeechEngine`].
pub struct Speaker {
    engine: Arc<dyn SpeechEngine>,
    catalog: VoiceCatalog,
}

impl Speaker {
    /// Create a speaker with an empty catalog.
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            catalog: VoiceCatalog::new(),
        }
    }

    /// Replace the cached catalog wholesale.
    ///
    /// Wired to the engine's catalog-ready notification, subscribed once at
    /// startup.
    pub fn apply_catalog(&mut self, voices: Vec<Voice>) {
        self.catalog.replace(voices);
    }

    /// The cached catalog.
    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    /// Speak `text` with a voice matching `gender`.
    ///
    /// An empty catalog is refreshed from the engine snapshot first; if it
    /// is still empty (engine not ready, or host has no voices) the call is
    /// a no-op and returns `None`. This is the accepted race with engine
    /// startup and is not retried.
    pub fn speak(&mut self, text: &str, gender: VoiceGender) -> Option<SpeechHandle> {
        if self.catalog.is_empty() {
            self.catalog.replace(self.engine.voices());
        }

        let mut rng = rand::thread_rng();
        let Some(voice) = selector::pick_voice(&self.catalog, gender, &mut rng) else {
            debug!("no voices available; skipping speech for \"{text}\"");
            return None;
        };

        let utterance = Utterance {
            text: text.to_owned(),
            voice: voice.clone(),
            pitch: selector::jitter(&mut rng),
            rate: selector::jitter(&mut rng),
        };
        Some(self.engine.submit(utterance))
    }
}
