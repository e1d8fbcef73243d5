//! Append-only conversation transcript.
//!
//! The transcript is the single rendering surface for the chat: every user
//! and AI message becomes one entry, appended at the end, never edited or
//! removed. Each append emits a [`TranscriptEvent`] so a frontend can keep
//! the newest entry visible without polling.

use tokio::sync::mpsc;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A message typed by the user.
    User,
    /// A reply produced by the chat backend.
    Ai,
}

impl Role {
    /// Stable lowercase label for logs and history rendering.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Who authored the message.
    pub role: Role,
    /// The message text.
    pub text: String,
}

/// Event emitted for each appended entry.
#[derive(Debug, Clone)]
pub enum TranscriptEvent {
    /// A new entry was appended at the end of the transcript.
    Appended(TranscriptEntry),
}

/// Append-only message log.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    event_tx: Option<mpsc::UnboundedSender<TranscriptEvent>>,
}

impl Transcript {
    /// Create an empty transcript with no event subscriber.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty transcript that emits [`TranscriptEvent`]s on `event_tx`.
    ///
    /// A closed receiver is tolerated: appends still succeed, the event is
    /// simply dropped.
    pub fn with_events(event_tx: mpsc::UnboundedSender<TranscriptEvent>) -> Self {
        Self {
            entries: Vec::new(),
            event_tx: Some(event_tx),
        }
    }

    /// Append an entry at the end of the transcript.
    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        let entry = TranscriptEntry {
            role,
            text: text.into(),
        };
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(TranscriptEvent::Appended(entry.clone()));
        }
        self.entries.push(entry);
    }

    /// All entries in append order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The newest entry, if any.
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn push_appends_in_order() {
        let mut transcript = Transcript::new();
        transcript.push(Role::User, "hello");
        transcript.push(Role::Ai, "hi there");

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.entries()[0].role, Role::User);
        assert_eq!(transcript.entries()[0].text, "hello");
        assert_eq!(transcript.last().unwrap().role, Role::Ai);
    }

    #[test]
    fn push_emits_one_event_per_entry() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut transcript = Transcript::with_events(tx);
        transcript.push(Role::User, "ping");

        let TranscriptEvent::Appended(entry) = rx.try_recv().unwrap();
        assert_eq!(entry.role, Role::User);
        assert_eq!(entry.text, "ping");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn push_survives_closed_event_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut transcript = Transcript::with_events(tx);
        transcript.push(Role::Ai, "still appended");
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn role_labels_are_stable() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Ai.to_string(), "ai");
    }
}
