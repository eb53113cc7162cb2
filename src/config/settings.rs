//! Configuration settings for ticketlens.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub provider: ProviderSettings,
    pub embedding: EmbeddingSettings,
    pub chat: ChatSettings,
    pub search: SearchSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Credentials and transport settings for the remote model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API key. Falls back to `OPENAI_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Alternate API base URL (for proxies and compatible vendors).
    pub api_base: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: None,
            timeout_secs: 300,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Requested output dimensions. `None` keeps the model's native width.
    pub dimensions: Option<u32>,
    /// Maximum number of texts per embedding request.
    pub batch_size: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: None,
            batch_size: 100,
        }
    }
}

/// Chat completion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Model used to generate ticket insights.
    pub model: String,
    /// Sampling temperature. `None` leaves the provider default.
    pub temperature: Option<f32>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: None,
        }
    }
}

/// Similarity search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum number of tickets returned per query.
    pub top_k: usize,
    /// Minimum cosine similarity for a ticket to be kept.
    pub threshold: f32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            top_k: 5,
            threshold: 0.5,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Environment overrides are applied after the file is read.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply environment overrides using the given lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(model) = non_empty("EMBEDDING_MODEL") {
            self.embedding.model = model;
        }
        if let Some(model) = non_empty("CHAT_MODEL") {
            self.chat.model = model;
        }
        if self.provider.api_key.is_none() {
            self.provider.api_key = non_empty("OPENAI_API_KEY");
        }
        if self.provider.api_base.is_none() {
            self.provider.api_base = non_empty("OPENAI_API_BASE");
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TicketLensError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ticketlens")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Whether provider credentials are available.
    pub fn has_api_key(&self) -> bool {
        self.provider
            .api_key
            .as_ref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.embedding.model, "text-embedding-3-small");
        assert_eq!(settings.embedding.batch_size, 100);
        assert_eq!(settings.chat.model, "gpt-3.5-turbo");
        assert_eq!(settings.search.top_k, 5);
        assert!((settings.search.threshold - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("EMBEDDING_MODEL", "text-embedding-3-large"),
            ("CHAT_MODEL", "gpt-4o-mini"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_API_BASE", "  "),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(settings.embedding.model, "text-embedding-3-large");
        assert_eq!(settings.chat.model, "gpt-4o-mini");
        assert_eq!(settings.provider.api_key.as_deref(), Some("sk-test"));
        assert!(settings.provider.api_base.is_none());
        assert!(settings.has_api_key());
    }

    #[test]
    fn test_config_file_key_wins_over_env() {
        let mut settings = Settings::default();
        settings.provider.api_key = Some("sk-file".to_string());
        settings.apply_env_overrides(|_| Some("sk-env".to_string()));
        assert_eq!(settings.provider.api_key.as_deref(), Some("sk-file"));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\ntop_k = 3\n").unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.search.top_k, 3);
        assert!((settings.search.threshold - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.chat.temperature = Some(0.2);
        settings.save_to(&path).unwrap();

        let loaded: Settings = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.chat.temperature, Some(0.2));
    }
}
