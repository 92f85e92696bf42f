//! Request settings for the HTTP source
//!
//! Durations are whole milliseconds, matching the autocomplete settings, so the
//! section can sit under `http:` in the same YAML or JSON file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Deadline for one attempt, body included
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    /// Extra attempts after a transient failure
    pub retries: u32,
    /// Backoff before the first retry; doubles on each further retry
    pub retry_delay_ms: u64,
    pub proxy: Option<String>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
            retries: 2,
            retry_delay_ms: 250,
            proxy: None,
            user_agent: concat!("autosuggest/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    /// Short deadlines and no retries, for lookups that must answer while the user types
    pub fn fast() -> Self {
        Self {
            timeout_ms: 3_000,
            connect_timeout_ms: 1_000,
            retries: 0,
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}
