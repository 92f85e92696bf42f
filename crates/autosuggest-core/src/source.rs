//! Suggestion sources
//!
//! A source returns the full, unfiltered candidate list on every call. Filtering by
//! the typed query happens on the client, so sources never see the query.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::FetchError;
use crate::types::SuggestionItem;

/// Anything that can produce the candidate list
///
/// Implementations should stop work and return [`FetchError::Cancelled`] once `cancel`
/// fires. The fetcher does not rely on that: a cancelled request is discarded whatever
/// the source returns.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch(&self, cancel: CancellationToken) -> Result<Vec<SuggestionItem>, FetchError>;
}

/// In-memory source serving a fixed candidate list
pub struct StaticSource {
    items: Vec<SuggestionItem>,
    latency: Duration,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(items: Vec<SuggestionItem>) -> Self {
        Self {
            items,
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Build a source from display names, numbering the ids from 1
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| SuggestionItem::new(i as u64 + 1, name))
            .collect();
        Self::new(items)
    }

    /// Simulate a slow source
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of fetches started against this source
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SuggestionSource for StaticSource {
    async fn fetch(&self, cancel: CancellationToken) -> Result<Vec<SuggestionItem>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::select! {
                _ = cancel.cancelled() => return Err(FetchError::Cancelled),
                _ = tokio::time::sleep(self.latency) => {}
            }
        }

        Ok(self.items.clone())
    }
}

/// Adapts an async closure into a [`SuggestionSource`]
pub struct FnSource<F> {
    fetch: F,
}

impl<F, Fut> FnSource<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<SuggestionItem>, FetchError>> + Send + 'static,
{
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl<F, Fut> SuggestionSource for FnSource<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<SuggestionItem>, FetchError>> + Send + 'static,
{
    async fn fetch(&self, cancel: CancellationToken) -> Result<Vec<SuggestionItem>, FetchError> {
        (self.fetch)(cancel).await
    }
}
