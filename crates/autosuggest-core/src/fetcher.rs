//! Cancellable suggestion fetching
//!
//! At most one request per component instance is live. Starting a new request cancels
//! the previous one through its [`CancellationToken`], and outcomes of cancelled
//! requests are dropped when they come back, so a superseded request can never
//! overwrite newer state.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::FetchError;
use crate::source::SuggestionSource;
use crate::types::SuggestionItem;

/// Sequence number of a request within one fetcher
pub type RequestId = u64;

/// Request counters, split so cancellations never count as failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchStats {
    pub issued: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub cancelled: u64,
}

struct InFlight {
    id: RequestId,
    token: CancellationToken,
}

/// A started request, ready to be driven to completion
pub struct FetchTicket {
    id: RequestId,
    query: String,
    token: CancellationToken,
    source: Arc<dyn SuggestionSource>,
}

impl FetchTicket {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Run the request until it completes or is cancelled
    pub async fn run(self) -> FetchOutcome {
        let result = tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(FetchError::Cancelled),
            result = self.source.fetch(self.token.clone()) => result,
        };

        FetchOutcome {
            id: self.id,
            query: self.query,
            token: self.token,
            result,
        }
    }
}

/// The result of a request, still tagged with its cancellation token
pub struct FetchOutcome {
    id: RequestId,
    query: String,
    token: CancellationToken,
    result: Result<Vec<SuggestionItem>, FetchError>,
}

impl FetchOutcome {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// A request that was cancelled must not touch state
    pub fn is_stale(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// What a completed request means for the caller
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    /// The request was cancelled; ignore it entirely
    Stale,
    /// The full candidate list for `query`
    Loaded {
        query: String,
        items: Vec<SuggestionItem>,
    },
    /// The current request did not produce candidates
    Failed(FetchError),
}

/// Issues requests against a [`SuggestionSource`], keeping only the latest alive
pub struct SuggestionFetcher {
    source: Arc<dyn SuggestionSource>,
    lifecycle: CancellationToken,
    in_flight: Option<InFlight>,
    next_id: RequestId,
    stats: FetchStats,
}

impl SuggestionFetcher {
    /// Create a fetcher whose requests are all cancelled when `lifecycle` is
    pub fn new(source: Arc<dyn SuggestionSource>, lifecycle: CancellationToken) -> Self {
        Self {
            source,
            lifecycle,
            in_flight: None,
            next_id: 0,
            stats: FetchStats::default(),
        }
    }

    /// Start a request for `query`, cancelling the one in flight
    ///
    /// Returns `None` without contacting the source when the trimmed query is empty.
    pub fn begin(&mut self, query: &str) -> Option<FetchTicket> {
        self.cancel();

        if query.trim().is_empty() {
            return None;
        }

        self.next_id += 1;
        let id = self.next_id;
        let token = self.lifecycle.child_token();
        self.in_flight = Some(InFlight {
            id,
            token: token.clone(),
        });
        self.stats.issued += 1;
        debug!(request = id, query, "Fetching suggestions");

        Some(FetchTicket {
            id,
            query: query.to_string(),
            token,
            source: Arc::clone(&self.source),
        })
    }

    /// Cancel the request in flight, if any
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(in_flight) => {
                in_flight.token.cancel();
                self.stats.cancelled += 1;
                true
            }
            None => false,
        }
    }

    /// Classify a completed request
    pub fn settle(&mut self, outcome: FetchOutcome) -> Settled {
        if outcome.is_stale() {
            return Settled::Stale;
        }

        if self.in_flight.as_ref().map(|f| f.id) == Some(outcome.id) {
            self.in_flight = None;
        }

        match outcome.result {
            Ok(items) => {
                self.stats.succeeded += 1;
                debug!(
                    request = outcome.id,
                    candidates = items.len(),
                    "Suggestions loaded"
                );
                Settled::Loaded {
                    query: outcome.query,
                    items,
                }
            }
            Err(FetchError::Cancelled) => {
                // The source gave up on its own; nothing superseded it.
                self.stats.cancelled += 1;
                Settled::Failed(FetchError::Cancelled)
            }
            Err(err) => {
                self.stats.failed += 1;
                Settled::Failed(err)
            }
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn stats(&self) -> FetchStats {
        self.stats
    }
}
