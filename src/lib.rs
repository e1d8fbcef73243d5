//! Neura: voice-enabled AI chat client with a companion offline backend.
//!
//! The client side is a short pipeline:
//! User input → Transcript → Chat backend → Transcript → Speech
//!
//! # Architecture
//!
//! - **Transcript**: append-only message log, one event per rendered entry
//! - **Dispatcher**: one backend round-trip per user input, fallback entry
//!   on failure
//! - **Speech**: gender-heuristic voice selection over an engine-owned
//!   voice catalog, utterances serialized through a playback queue
//! - **Server**: optional companion backend (`GET /` health, `POST /chat`)
//!   over an offline keyword reply engine

pub mod chat;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod server;
pub mod speech;
pub mod transcript;

pub use chat::{ChatClient, ChatReply, DEFAULT_BACKEND_URL};
pub use config::NeuraConfig;
pub use dispatcher::{FALLBACK_REPLY, MessageDispatcher};
pub use error::{ChatError, Result};
pub use server::{ChatServer, ReplyEngine};
pub use speech::{Speaker, SpeechEngine, SpeechHandle, Utterance};
pub use transcript::{Role, Transcript, TranscriptEntry, TranscriptEvent};
