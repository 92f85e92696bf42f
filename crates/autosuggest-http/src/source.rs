//! Suggestion source backed by a GET endpoint

use std::sync::Arc;

use async_trait::async_trait;
use autosuggest_core::{FetchError, SuggestionItem, SuggestionSource};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::client::{HttpClient, HttpClientTrait};
use crate::config::HttpConfig;
use crate::error::{HttpError, Result};

/// Fetches the whole candidate list from `url` on every request
///
/// The endpoint must answer with a JSON array of records that carry at least `id`
/// and `name`. The query is not sent; filtering happens client-side.
pub struct HttpSuggestionSource {
    client: Arc<dyn HttpClientTrait>,
    url: Url,
}

impl HttpSuggestionSource {
    pub fn new(url: &str, config: HttpConfig) -> Result<Self> {
        let client = Arc::new(HttpClient::new(config)?);
        Self::with_client(client, url)
    }

    /// Use an existing transport, e.g. a mock
    pub fn with_client(client: Arc<dyn HttpClientTrait>, url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn load(&self) -> Result<Vec<SuggestionItem>> {
        let body = self.client.get(&self.url).await?.text().await?;
        let items: Vec<SuggestionItem> = serde_json::from_str(&body)?;
        debug!(url = %self.url, count = items.len(), "Loaded suggestion records");
        Ok(items)
    }
}

#[async_trait]
impl SuggestionSource for HttpSuggestionSource {
    async fn fetch(
        &self,
        cancel: CancellationToken,
    ) -> std::result::Result<Vec<SuggestionItem>, FetchError> {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(HttpError::Cancelled),
            result = self.load() => result,
        };
        result.map_err(FetchError::from)
    }
}
