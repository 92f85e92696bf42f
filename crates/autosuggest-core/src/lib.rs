//! Autosuggest Core
//!
//! A headless autocomplete component: the input text, a debounced query, a cancellable
//! request for candidates, a ranked top-N list and the dropdown focus. Rendering is left
//! to the host, which forwards UI events and draws whatever [`SearchState`] it is given.
//!
//! # Pipeline
//!
//! 1. **Input**: every edit replaces the raw text, notifies the host and restarts the
//!    debounce timer
//! 2. **Debounce**: once the text is stable for the configured delay it becomes the query
//! 3. **Fetch**: the query supersedes the request in flight; superseded results are dropped
//! 4. **Rank**: candidates are filtered by case-insensitive prefix and sorted by name
//! 5. **Navigate**: arrow keys, Enter, clicks and outside interactions drive the dropdown
//!
//! # Core Components
//!
//! - [`SearchMachine`]: pure transitions from [`Action`] to [`SearchState`] plus [`Effect`]s
//! - [`Debouncer`]: trailing-edge timer, cancel-safe inside `tokio::select!`
//! - [`SuggestionFetcher`]: one live request, cancelled through a [`CancellationToken`]
//! - [`PrefixRanker`]: filter, sort and truncate
//! - [`InteractionHub`]: reports pointer interactions outside a registered region
//! - [`AutocompleteBuilder`]: mounts a controller task that wires all of the above
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod fetcher;
pub mod ghost_text;
pub mod outside;
pub mod ranker;
pub mod source;
pub mod state;
pub mod types;

pub use config::{AutocompleteConfig, ConfigFormat, ConfigLoader};
pub use controller::{AutocompleteBuilder, AutocompleteHandle, UiEvent, ValueChangeListener};
pub use debounce::Debouncer;
pub use error::{AutosuggestError, AutosuggestResult, FetchError};
pub use fetcher::{FetchOutcome, FetchStats, FetchTicket, RequestId, Settled, SuggestionFetcher};
pub use ghost_text::GhostText;
pub use outside::{Bounds, InteractionHub, OutsideInteractionGuard, Point, Region};
pub use ranker::{collate, filter_and_rank, matches_prefix, PrefixRanker, DEFAULT_MAX_SUGGESTIONS};
pub use source::{FnSource, StaticSource, SuggestionSource};
pub use state::{Action, Effect, Key, SearchMachine, SearchState};
pub use types::{MatchHighlight, SuggestionId, SuggestionItem};
