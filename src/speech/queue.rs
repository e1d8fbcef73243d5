//! Utterance queue backed by a playback worker task.
//!
//! The queue is the crate's stand-in for the platform speech service: it
//! accepts utterances from any number of callers and drains them one at a
//! time through a [`SpeechSink`], so overlapping submissions serialize on
//! playback without the callers coordinating. It also owns the voice list
//! and publishes wholesale updates on a watch channel, which is how the
//! catalog-ready notification reaches subscribers.

use super::{SpeechEngine, SpeechHandle, Utterance};
use crate::error::Result;
use crate::speech::voice::Voice;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Playback output the queue drains into.
///
/// Implementations do the actual audio work (or none at all, for headless
/// hosts). Playback errors are logged and swallowed by the queue; a failed
/// utterance still counts as completed.
#[async_trait]
pub trait SpeechSink: Send {
    /// Play one utterance to completion.
    async fn play(&mut self, utterance: &Utterance) -> Result<()>;
}

/// Sink that discards utterances. For hosts without audio output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl SpeechSink for NullSink {
    async fn play(&mut self, _utterance: &Utterance) -> Result<()> {
        Ok(())
    }
}

/// Sink that logs each utterance instead of playing it.
///
/// Used by the terminal client, where there is no audio device to drive.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl SpeechSink for TracingSink {
    async fn play(&mut self, utterance: &Utterance) -> Result<()> {
        tracing::info!(
            voice = %utterance.voice.name,
            pitch = utterance.pitch,
            rate = utterance.rate,
            "speaking: \"{}\"",
            utterance.text,
        );
        Ok(())
    }
}

/// One queued utterance plus its completion signal.
struct QueuedUtterance {
    utterance: Utterance,
    done: oneshot::Sender<()>,
}

/// Serializing utterance queue.
///
/// Submissions are fire-and-forget: [`SpeechEngine::submit`] enqueues and
/// returns immediately with a [`SpeechHandle`] that resolves once the sink
/// has finished (or failed) playing the utterance.
pub struct SpeechQueue {
    tx: mpsc::UnboundedSender<QueuedUtterance>,
    catalog_tx: watch::Sender<Vec<Voice>>,
    worker: JoinHandle<()>,
}

impl SpeechQueue {
    /// Start a queue draining into `sink`.
    ///
    /// Spawns the worker task, so this must run inside a tokio runtime.
    /// The voice list starts empty; the host calls [`Self::set_voices`] once
    /// its engine has enumerated voices (possibly well after startup).
    pub fn new<S: SpeechSink + 'static>(sink: S) -> Self {
        Self::with_voices(sink, Vec::new())
    }

    /// Start a queue with an already-known voice list.
    pub fn with_voices<S: SpeechSink + 'static>(mut sink: S, voices: Vec<Voice>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<QueuedUtterance>();
        let (catalog_tx, _) = watch::channel(voices);

        let worker = tokio::spawn(async move {
            while let Some(queued) = rx.recv().await {
                if let Err(e) = sink.play(&queued.utterance).await {
                    warn!("speech playback failed: {e}");
                }
                // Receiver may have been dropped (fire-and-forget caller).
                let _ = queued.done.send(());
            }
            debug!("speech queue worker stopped");
        });

        Self {
            tx,
            catalog_tx,
            worker,
        }
    }

    /// Replace the voice list wholesale and notify subscribers.
    pub fn set_voices(&self, voices: Vec<Voice>) {
        self.catalog_tx.send_replace(voices);
    }

    /// Subscribe to voice list updates (the catalog-ready notification).
    ///
    /// The receiver yields the full list on every change; subscribers apply
    /// it wholesale.
    pub fn subscribe_voices(&self) -> watch::Receiver<Vec<Voice>> {
        self.catalog_tx.subscribe()
    }
}

impl SpeechEngine for SpeechQueue {
    fn voices(&self) -> Vec<Voice> {
        self.catalog_tx.borrow().clone()
    }

    fn submit(&self, utterance: Utterance) -> SpeechHandle {
        let (done, handle_rx) = oneshot::channel();
        let queued = QueuedUtterance { utterance, done };
        if self.tx.send(queued).is_err() {
            // Worker gone; the dropped sender resolves the handle anyway.
            warn!("speech queue worker is gone; dropping utterance");
        }
        SpeechHandle::new(handle_rx)
    }
}

impl Drop for SpeechQueue {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::speech::voice::VoiceGender;
    use crate::speech::{Speaker, selector};
    use std::sync::{Arc, Mutex};

    /// Sink that records utterance texts in playback order.
    struct RecordingSink {
        played: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl SpeechSink for RecordingSink {
        async fn play(&mut self, utterance: &Utterance) -> Result<()> {
            self.played.lock().unwrap().push(utterance.text.clone());
            Ok(())
        }
    }

    fn utterance(text: &str) -> Utterance {
        Utterance {
            text: text.to_owned(),
            voice: Voice::new("Test Voice", "en-US"),
            pitch: 1.0,
            rate: 1.0,
        }
    }

    #[tokio::test]
    async fn submissions_play_in_order() {
        let played = Arc::new(Mutex::new(Vec::new()));
        let queue = SpeechQueue::new(RecordingSink {
            played: Arc::clone(&played),
        });

        let first = queue.submit(utterance("one"));
        let second = queue.submit(utterance("two"));
        first.finished().await;
        second.finished().await;

        assert_eq!(*played.lock().unwrap(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn dropped_handle_still_plays() {
        let played = Arc::new(Mutex::new(Vec::new()));
        let queue = SpeechQueue::new(RecordingSink {
            played: Arc::clone(&played),
        });

        drop(queue.submit(utterance("fire and forget")));
        // A second submission's completion implies the first one drained.
        queue.submit(utterance("marker")).finished().await;

        assert_eq!(
            *played.lock().unwrap(),
            vec!["fire and forget", "marker"],
        );
    }

    #[tokio::test]
    async fn set_voices_replaces_and_notifies() {
        let queue = SpeechQueue::new(NullSink);
        let mut rx = queue.subscribe_voices();
        assert!(queue.voices().is_empty());

        queue.set_voices(vec![Voice::new("Alpha", "en-US")]);
        queue.set_voices(vec![Voice::new("Beta", "en-GB")]);

        rx.changed().await.unwrap();
        let latest = rx.borrow_and_update().clone();
        // Last writer wins, wholesale.
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].name, "Beta");
        assert_eq!(queue.voices(), latest);
    }

    #[tokio::test]
    async fn speaker_end_to_end_through_queue() {
        let played = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::new(SpeechQueue::with_voices(
            RecordingSink {
                played: Arc::clone(&played),
            },
            vec![Voice::new("Google UK English Female", "en-GB")],
        ));

        let mut speaker = Speaker::new(Arc::clone(&queue) as Arc<dyn SpeechEngine>);
        let handle = speaker.speak("hello", VoiceGender::Female).unwrap();
        handle.finished().await;

        assert_eq!(*played.lock().unwrap(), vec!["hello"]);
    }

    #[test]
    fn jitter_bounds_hold_for_generated_utterances() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let pitch = selector::jitter(&mut rng);
            let rate = selector::jitter(&mut rng);
            assert!((0.9..=1.1).contains(&pitch));
            assert!((0.9..=1.1).contains(&rate));
        }
    }
}
