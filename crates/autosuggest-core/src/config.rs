//! Configuration loading for the autocomplete controller

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AutosuggestError, AutosuggestResult};

/// Autocomplete behaviour settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteConfig {
    /// Quiet period before a typed value triggers a fetch
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of suggestions shown in the dropdown
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Minimum trimmed query length that triggers a fetch
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_suggestions: default_max_suggestions(),
            min_query_chars: default_min_query_chars(),
        }
    }
}

impl AutocompleteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    pub fn with_min_query_chars(mut self, min: usize) -> Self {
        self.min_query_chars = min;
        self
    }

    pub fn validate(&self) -> AutosuggestResult<()> {
        if self.max_suggestions == 0 {
            return Err(AutosuggestError::Config(
                "max_suggestions must be greater than 0".to_string(),
            ));
        }
        if self.min_query_chars == 0 {
            return Err(AutosuggestError::Config(
                "min_query_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_max_suggestions() -> usize {
    crate::ranker::DEFAULT_MAX_SUGGESTIONS
}

fn default_min_query_chars() -> usize {
    1
}

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Some(ConfigFormat::Yaml),
            Some("json") => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

/// Loads and validates [`AutocompleteConfig`] from YAML or JSON
///
/// Hosts that keep more settings in the same file can read their own document type
/// with [`ConfigLoader::read_path`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file, choosing the format by extension
    pub fn load_from_path(path: &Path) -> AutosuggestResult<AutocompleteConfig> {
        let config: AutocompleteConfig = Self::read_path(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a string
    pub fn load_from_string(
        content: &str,
        format: ConfigFormat,
    ) -> AutosuggestResult<AutocompleteConfig> {
        let config: AutocompleteConfig = Self::read_str(content, format)?;
        config.validate()?;
        Ok(config)
    }

    /// Deserialize any settings document from a file, choosing the format by extension
    pub fn read_path<T: DeserializeOwned>(path: &Path) -> AutosuggestResult<T> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            AutosuggestError::Config(format!(
                "Unsupported configuration file: {}",
                path.display()
            ))
        })?;
        let content = std::fs::read_to_string(path)?;
        Self::read_str(&content, format)
    }

    pub fn read_str<T: DeserializeOwned>(
        content: &str,
        format: ConfigFormat,
    ) -> AutosuggestResult<T> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        })
    }
}
