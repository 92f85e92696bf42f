// Logging setup
//
// The terminal belongs to the UI, so log records go to a file.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

/// Log level for the verbosity flags
pub fn level_for(verbose: bool, quiet: bool) -> tracing::Level {
    if quiet {
        tracing::Level::ERROR
    } else if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

/// Default log location when `--log-file` is not given
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("autosuggest.log")
}

/// Install the global subscriber and return the file it writes to
pub fn init_logging(verbose: bool, quiet: bool, log_file: Option<&Path>) -> Result<PathBuf> {
    let path = log_file.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_target(verbose)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(false, false), tracing::Level::INFO);
        assert_eq!(level_for(true, false), tracing::Level::DEBUG);
        assert_eq!(level_for(true, true), tracing::Level::ERROR);
    }

    #[test]
    fn test_default_log_path() {
        assert!(default_log_path().ends_with("autosuggest.log"));
    }
}
