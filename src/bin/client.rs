//! Terminal chat client.
//!
//! Reads one message per line from stdin (Enter submits), renders the
//! transcript to stdout as entries arrive, and speaks AI replies through
//! the logging speech sink. Tracing goes to stderr so stdout stays a clean
//! transcript.

use neura::config::NeuraConfig;
use neura::dispatcher::MessageDispatcher;
use neura::speech::queue::{SpeechQueue, TracingSink};
use neura::speech::{Speaker, SpeechEngine};
use neura::transcript::{Transcript, TranscriptEvent};
use neura::{ChatClient, Role};
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("neura=info")),
        )
        .init();

    let config = NeuraConfig::load().map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;
    info!("chat backend: {}", config.backend.base_url);

    // The queue stands in for the platform speech service; voices arrive
    // through its catalog notification like an engine that enumerates late.
    let queue = Arc::new(SpeechQueue::new(TracingSink));
    let mut catalog_rx = queue.subscribe_voices();
    if config.speech.enabled {
        queue.set_voices(config.speech.voices.clone());
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<TranscriptEvent>();
    let speaker = Speaker::new(Arc::clone(&queue) as Arc<dyn SpeechEngine>);
    let dispatcher = Arc::new(MessageDispatcher::new(
        ChatClient::new(config.backend.base_url.clone()),
        Transcript::with_events(event_tx),
        speaker,
    ));

    // Apply catalog updates as the engine publishes them.
    let catalog_dispatcher = Arc::clone(&dispatcher);
    tokio::spawn(async move {
        while catalog_rx.changed().await.is_ok() {
            let voices = catalog_rx.borrow_and_update().clone();
            catalog_dispatcher.apply_voice_catalog(voices).await;
        }
    });

    // Render entries as they are appended, newest at the bottom.
    tokio::spawn(async move {
        while let Some(TranscriptEvent::Appended(entry)) = event_rx.recv().await {
            let label = match entry.role {
                Role::User => "USER",
                Role::Ai => "AI",
            };
            println!("{label}: {}", entry.text);
        }
    });

    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down...");
            shutdown_signal.cancel();
        }
    });

    println!("Neura v{}", env!("CARGO_PKG_VERSION"));
    println!("Type a message and press Enter. Press Ctrl+C to quit.\n");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        // Each dispatch runs detached: the reader never
                        // blocks on the backend, matching the one-request-
                        // per-submit, no-in-flight-cap model.
                        let dispatcher = Arc::clone(&dispatcher);
                        tokio::spawn(async move {
                            dispatcher.send_message(&line).await;
                        });
                    }
                    None => break, // stdin closed
                }
            }
        }
    }

    Ok(())
}
