//! Configuration types for the chat client and companion backend.

use crate::chat::ReplyVoice;
use crate::speech::voice::Voice;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NeuraConfig {
    /// Chat backend connection settings.
    pub backend: BackendConfig,
    /// Speech output settings.
    pub speech: SpeechConfig,
    /// Companion backend server settings.
    pub server: ServerConfig,
    /// Offline reply engine settings.
    pub reply: ReplyConfig,
}

/// Chat backend connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the chat backend (no trailing `/chat`).
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: crate::chat::DEFAULT_BACKEND_URL.to_owned(),
        }
    }
}

/// Speech output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whether AI replies are spoken at all.
    pub enabled: bool,
    /// Voices registered with the queue at startup.
    ///
    /// Stands in for platform voice enumeration on hosts without a speech
    /// service. An empty list leaves the catalog empty until the host's
    /// engine publishes one.
    pub voices: Vec<Voice>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            voices: vec![
                Voice::new("Google UK English Male", "en-GB"),
                Voice::new("Google UK English Female", "en-GB"),
                Voice::new("Microsoft David - English (United States)", "en-US"),
                Voice::new("Microsoft Emma - English (United Kingdom)", "en-GB"),
            ],
        }
    }
}

/// Companion backend server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind.
    pub host: String,
    /// Port to bind (0 = auto-assign).
    pub port: u16,
    /// Voice defaults attached to every reply.
    pub voice: ReplyVoice,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            voice: ReplyVoice::default(),
        }
    }
}

/// Offline reply engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    /// Responses picked at random when no keyword rule applies.
    pub fallback_responses: Vec<String>,
    /// How many trailing messages the history summary keeps.
    pub history_window: usize,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            fallback_responses: vec![
                "I'm offline right now — I can still help with general guidance.".to_owned(),
                "Offline: try breaking the task into smaller steps and asking me for each step."
                    .to_owned(),
                "Hi — I'm Neura (offline). How can I help?".to_owned(),
            ],
            history_window: 12,
        }
    }
}

impl NeuraConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::ChatError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot
    /// be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ChatError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration the way the binaries do: the `NEURA_CONFIG` file
    /// if the variable is set, else the default path if it exists, else
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named or existing file fails to
    /// load; a missing default file is not an error.
    pub fn load() -> crate::error::Result<Self> {
        if let Some(path) = std::env::var_os("NEURA_CONFIG") {
            return Self::from_file(&PathBuf::from(path));
        }
        let default_path = Self::default_config_path();
        if default_path.exists() {
            return Self::from_file(&default_path);
        }
        Ok(Self::default())
    }

    /// Returns the default config file path: `~/.config/neura/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("neura").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("neura")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/neura-config/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::speech::voice::VoiceGender;

    #[test]
    fn defaults_are_sane() {
        let config = NeuraConfig::default();
        assert_eq!(config.backend.base_url, crate::chat::DEFAULT_BACKEND_URL);
        assert!(config.speech.enabled);
        assert!(!config.speech.voices.is_empty());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.voice.gender, VoiceGender::Female);
        assert_eq!(config.reply.history_window, 12);
        assert_eq!(config.reply.fallback_responses.len(), 3);
    }

    #[test]
    fn roundtrips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = NeuraConfig::default();
        config.backend.base_url = "http://10.0.0.2:8080".to_owned();
        config.server.port = 0;
        config.reply.history_window = 4;
        config.save_to_file(&path).unwrap();

        let loaded = NeuraConfig::from_file(&path).unwrap();
        assert_eq!(loaded.backend.base_url, "http://10.0.0.2:8080");
        assert_eq!(loaded.server.port, 0);
        assert_eq!(loaded.reply.history_window, 4);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[backend]\nbase_url = \"http://example.com\"\n").unwrap();

        let loaded = NeuraConfig::from_file(&path).unwrap();
        assert_eq!(loaded.backend.base_url, "http://example.com");
        assert_eq!(loaded.server.port, 5000);
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = NeuraConfig::from_file(std::path::Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        let result = NeuraConfig::from_file(&path);
        assert!(result.is_err());
    }
}
