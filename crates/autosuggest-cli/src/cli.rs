// Command-line arguments

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use autosuggest_core::{AutocompleteConfig, ConfigLoader, StaticSource, SuggestionSource};
use autosuggest_http::{HttpConfig, HttpSuggestionSource};
use clap::Parser;
use serde::Deserialize;

use crate::fruits;

/// Layout of the `--config` file: autocomplete keys at the top level, request
/// settings for `--url` under `http:`
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(flatten)]
    autocomplete: AutocompleteConfig,
    #[serde(default)]
    http: HttpConfig,
}

/// Autosuggest - type-ahead search in the terminal
#[derive(Parser, Debug)]
#[command(name = "autosuggest")]
#[command(bin_name = "autosuggest")]
#[command(about = "Type-ahead search over a suggestion list, in the terminal")]
#[command(version)]
#[command(author = "Autosuggest Contributors")]
pub struct Cli {
    /// Fetch suggestions from this URL (a JSON array of {id, name, ...} records)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Load autocomplete settings from a YAML or JSON file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the debounce delay in milliseconds
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Override the number of suggestions shown
    #[arg(long, value_name = "N")]
    pub max_suggestions: Option<usize>,

    /// Text the input starts with
    #[arg(long, default_value = "")]
    pub initial: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Write logs here instead of the temp directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    fn settings_file(&self) -> Result<SettingsFile> {
        match &self.config {
            Some(path) => ConfigLoader::read_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display())),
            None => Ok(SettingsFile::default()),
        }
    }

    /// Settings from the config file, with command-line overrides applied
    pub fn autocomplete_config(&self) -> Result<AutocompleteConfig> {
        let mut config = self.settings_file()?.autocomplete;

        if let Some(ms) = self.debounce_ms {
            config = config.with_debounce(Duration::from_millis(ms));
        }
        if let Some(max) = self.max_suggestions {
            config = config.with_max_suggestions(max);
        }

        config.validate()?;
        Ok(config)
    }

    /// Request settings for the HTTP source, from the `http:` section of the config file
    pub fn http_config(&self) -> Result<HttpConfig> {
        Ok(self.settings_file()?.http)
    }

    /// The HTTP source when `--url` is given, the built-in fruit list otherwise
    pub fn source(&self) -> Result<Arc<dyn SuggestionSource>> {
        match &self.url {
            Some(url) => {
                let source = HttpSuggestionSource::new(url, self.http_config()?)
                    .with_context(|| format!("Invalid suggestion URL {}", url))?;
                Ok(Arc::new(source))
            }
            None => Ok(Arc::new(StaticSource::new(fruits::catalog()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["autosuggest"]);
        assert!(cli.url.is_none());
        assert_eq!(cli.initial, "");
        assert_eq!(cli.autocomplete_config().unwrap(), AutocompleteConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "autosuggest",
            "--debounce-ms",
            "120",
            "--max-suggestions",
            "8",
            "--initial",
            "Ki",
            "-v",
        ]);

        let config = cli.autocomplete_config().unwrap();
        assert_eq!(config.debounce_ms, 120);
        assert_eq!(config.max_suggestions, 8);
        assert_eq!(cli.initial, "Ki");
        assert!(cli.verbose);
    }

    #[test]
    fn test_config_file_with_override() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "debounce_ms: 500\nmax_suggestions: 3").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["autosuggest", "--config", &path, "--debounce-ms", "50"]);

        let config = cli.autocomplete_config().unwrap();
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.max_suggestions, 3);
    }

    #[test]
    fn test_http_section_in_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "max_suggestions: 4\nhttp:\n  timeout_ms: 1500\n  retries: 0\n  proxy: http://proxy.local:3128"
        )
        .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::parse_from([
            "autosuggest",
            "--config",
            &path,
            "--url",
            "http://localhost:8080/fruits",
        ]);

        let http = cli.http_config().unwrap();
        assert_eq!(http.timeout(), Duration::from_millis(1500));
        assert_eq!(http.retries, 0);
        assert_eq!(http.proxy.as_deref(), Some("http://proxy.local:3128"));
        assert_eq!(http.connect_timeout(), HttpConfig::default().connect_timeout());
        assert_eq!(cli.autocomplete_config().unwrap().max_suggestions, 4);
        assert!(cli.source().is_ok());
    }

    #[test]
    fn test_http_defaults_without_config_file() {
        let cli = Cli::parse_from(["autosuggest"]);
        assert_eq!(cli.http_config().unwrap(), HttpConfig::default());
    }

    #[test]
    fn test_zero_suggestions_rejected() {
        let cli = Cli::parse_from(["autosuggest", "--max-suggestions", "0"]);
        assert!(cli.autocomplete_config().is_err());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let cli = Cli::parse_from(["autosuggest", "--url", "not a url"]);
        assert!(cli.source().is_err());
    }

    #[test]
    fn test_builtin_source() {
        let cli = Cli::parse_from(["autosuggest"]);
        assert!(cli.source().is_ok());
    }
}
