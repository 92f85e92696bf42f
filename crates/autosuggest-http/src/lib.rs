//! HTTP suggestion source for autosuggest
//!
//! Serves the candidate list from a GET endpoint that returns a JSON array of
//! suggestion records.
//!
//! ## Features
//!
//! - **Cancellable**: a cancelled fetch drops the request and any pending retry
//! - **Retries**: transient failures (connect errors, timeouts, 5xx, 429) are retried
//!   with exponential backoff
//! - **Mockable**: the transport sits behind `HttpClientTrait`

pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod source;

pub use client::{HttpClient, HttpClientTrait};
pub use config::HttpConfig;
pub use error::{HttpError, Result};
pub use middleware::{RetryConfig, RetryMiddleware};
pub use source::HttpSuggestionSource;

pub use reqwest::{Response, StatusCode};
