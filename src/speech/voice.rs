//! Voice catalog types.

use serde::{Deserialize, Serialize};

/// A synthesized voice exposed by the speech engine.
///
/// Read-only from the client's point of view: the engine owns the list and
/// may populate it asynchronously after startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Display name as reported by the engine (e.g. `"Google UK English Female"`).
    pub name: String,
    /// BCP-47 language tag (e.g. `"en-GB"`).
    pub lang: String,
}

impl Voice {
    /// Create a voice from a display name and language tag.
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Requested gender for voice selection.
///
/// This is a hint matched against voice display names, not a guarantee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    /// Prefer a male-sounding voice.
    Male,
    /// Prefer a female-sounding voice.
    #[default]
    Female,
}

impl VoiceGender {
    /// Stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Client-side cache of the engine's voice list.
///
/// Refreshes replace the whole list (last writer wins, no merge). The cache
/// may be empty until the engine finishes enumerating its voices.
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
}

impl VoiceCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog contents wholesale.
    pub fn replace(&mut self, voices: Vec<Voice>) {
        self.voices = voices;
    }

    /// All voices in engine order.
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// The first voice in engine order, if any.
    pub fn first(&self) -> Option<&Voice> {
        self.voices.first()
    }

    /// Number of voices.
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// Whether the catalog has no voices.
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}
