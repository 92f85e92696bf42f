//! Terminal demo host for the autosuggest component
//!
//! Wires an [`autosuggest_core::AutocompleteHandle`] to a ratatui screen: a text input
//! with ghost text, a dropdown with the matched prefix in bold, keyboard navigation,
//! and mouse clicks inside and outside the component.

pub mod app;
pub mod cli;
pub mod fruits;
pub mod input;
pub mod logging;
pub mod render;

pub use app::App;
pub use cli::Cli;
