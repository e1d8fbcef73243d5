//! Companion HTTP backend for the chat client.
//!
//! Two routes:
//!
//! - `GET /`: plain-text health line
//! - `POST /chat`: one reply per message, generated by the offline
//!   [`ReplyEngine`], with the configured voice defaults attached
//!
//! No authentication, no sessions, no streaming.

pub mod engine;

pub use engine::ReplyEngine;

use crate::chat::{ChatReply, ChatRequest};
use crate::config::ServerConfig;
use crate::error::{ChatError, Result};
use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

/// Health line served at `GET /`.
const HEALTH_LINE: &str = "Neura backend is running";

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    engine: Arc<ReplyEngine>,
    voice: crate::chat::ReplyVoice,
}

/// Chat backend HTTP server.
///
/// Serves in a background tokio task; the task is aborted when the handle
/// is dropped.
pub struct ChatServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ChatServer {
    /// Start the backend server.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for
    /// auto-assign) and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(engine: ReplyEngine, config: &ServerConfig) -> Result<Self> {
        let state = AppState {
            engine: Arc::new(engine),
            voice: config.voice.clone(),
        };

        let app = Router::new()
            .route("/", get(handle_health))
            .route("/chat", post(handle_chat))
            .with_state(state);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ChatError::Server(format!("bind failed on {bind_addr}: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| ChatError::Server(format!("failed to get local addr: {e}")))?;

        info!("chat backend listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("chat backend error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Base URL clients should point at.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for ChatServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// `GET /`: health check.
async fn handle_health() -> &'static str {
    HEALTH_LINE
}

/// `POST /chat`: generate one reply.
async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    let reply = state.engine.reply(&request.message);
    Json(ChatReply {
        reply,
        voice: Some(state.voice.clone()),
    })
}
