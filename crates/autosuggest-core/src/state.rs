//! Selection and navigation state machine
//!
//! All component state lives in one [`SearchState`] value that only
//! [`SearchMachine::apply`] mutates. Each transition returns the side effects it
//! needs as [`Effect`] descriptions; running them (timers, requests, host
//! callbacks) is left to the controller.
//!
//! | action              | focus                          | dropdown | text       |
//! |---------------------|--------------------------------|----------|------------|
//! | text input          | kept                           | kept     | replaced   |
//! | input activated     | none                           | open     | kept       |
//! | arrow down          | +1, stops at last              | open     | kept       |
//! | arrow up            | -1, stops at 0                 | kept     | kept       |
//! | enter, focused      | kept                           | closed   | committed  |
//! | enter, no focus     | first suggestion               | kept     | kept       |
//! | suggestion clicked  | kept                           | closed   | committed  |
//! | outside interaction | none                           | closed   | kept       |
//! | suggestions loaded  | none                           | kept     | kept       |

use tracing::trace;

use crate::ghost_text::GhostText;
use crate::ranker::PrefixRanker;
use crate::types::SuggestionItem;

/// Keys the component reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
}

/// Everything that can happen to the component
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user edited the input
    TextInput(String),
    /// The input was clicked or focused
    InputActivated,
    ArrowDown,
    ArrowUp,
    Enter,
    /// A suggestion in the dropdown was clicked
    SuggestionClicked(usize),
    /// A pointer interaction happened outside the component
    OutsideInteraction,
    /// The typed text has been stable for the debounce period
    DebounceElapsed(String),
    /// A request for the current debounced text went out
    FetchStarted,
    /// The current request returned its candidate list
    FetchSucceeded {
        query: String,
        items: Vec<SuggestionItem>,
    },
    /// The current request ended without candidates
    FetchFailed,
}

impl From<Key> for Action {
    fn from(key: Key) -> Self {
        match key {
            Key::ArrowDown => Action::ArrowDown,
            Key::ArrowUp => Action::ArrowUp,
            Key::Enter => Action::Enter,
        }
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Tell the host the committed text changed
    NotifyValueChanged(String),
    /// Restart the debounce timer with this text
    RestartDebounce(String),
    /// Fetch candidates for this query, superseding any request in flight
    IssueFetch(String),
    /// Cancel the request in flight
    CancelFetch,
}

/// Snapshot of one autocomplete instance, as seen by the rendering layer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    raw_text: String,
    debounced_text: String,
    is_loading: bool,
    suggestions: Vec<SuggestionItem>,
    focused_index: Option<usize>,
    dropdown_visible: bool,
}

impl SearchState {
    /// Fresh state seeded with the host's initial value
    pub fn new(initial_value: impl Into<String>) -> Self {
        let raw_text = initial_value.into();
        Self {
            debounced_text: raw_text.clone(),
            raw_text,
            ..Default::default()
        }
    }

    /// Text shown in the input
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Last text that survived the debounce period
    pub fn debounced_text(&self) -> &str {
        &self.debounced_text
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn suggestions(&self) -> &[SuggestionItem] {
        &self.suggestions
    }

    /// Index of the highlighted suggestion; always within `suggestions`
    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    pub fn focused_suggestion(&self) -> Option<&SuggestionItem> {
        self.focused_index.and_then(|i| self.suggestions.get(i))
    }

    /// Whether the rendering layer may show the dropdown, even if it is empty
    pub fn dropdown_visible(&self) -> bool {
        self.dropdown_visible
    }

    /// Inline completion of the typed text from the first suggestion
    pub fn ghost_text(&self) -> Option<GhostText> {
        GhostText::from_suggestions(&self.raw_text, &self.suggestions)
    }

    fn replace_suggestions(&mut self, suggestions: Vec<SuggestionItem>) {
        self.suggestions = suggestions;
        self.focused_index = None;
    }
}

/// Applies [`Action`]s to a [`SearchState`]
#[derive(Debug, Clone)]
pub struct SearchMachine {
    state: SearchState,
    ranker: PrefixRanker,
    min_query_chars: usize,
}

impl SearchMachine {
    pub fn new(initial_value: impl Into<String>, ranker: PrefixRanker) -> Self {
        Self {
            state: SearchState::new(initial_value),
            ranker,
            min_query_chars: 1,
        }
    }

    /// Require at least `min` trimmed characters before fetching
    pub fn with_min_query_chars(mut self, min: usize) -> Self {
        self.min_query_chars = min.max(1);
        self
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Run one transition and return the effects it asks for
    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        trace!(?action, "Applying autocomplete action");
        let mut effects = Vec::new();
        let state = &mut self.state;

        match action {
            Action::TextInput(text) => {
                Self::set_raw_text(state, text, &mut effects);
            }
            Action::InputActivated => {
                state.focused_index = None;
                state.dropdown_visible = true;
            }
            Action::ArrowDown => {
                let next = state.focused_index.map_or(0, |i| i + 1);
                if next < state.suggestions.len() {
                    state.focused_index = Some(next);
                }
                state.dropdown_visible = true;
            }
            Action::ArrowUp => {
                if let Some(i) = state.focused_index {
                    if i > 0 {
                        state.focused_index = Some(i - 1);
                    }
                }
            }
            Action::Enter => match state.focused_suggestion().map(|item| item.name.clone()) {
                Some(name) => {
                    Self::set_raw_text(state, name, &mut effects);
                    state.dropdown_visible = false;
                }
                None => {
                    // First Enter arms the top suggestion; the next one commits it.
                    if !state.suggestions.is_empty() {
                        state.focused_index = Some(0);
                    }
                }
            },
            Action::SuggestionClicked(index) => {
                if let Some(name) = state.suggestions.get(index).map(|item| item.name.clone()) {
                    Self::set_raw_text(state, name, &mut effects);
                    state.dropdown_visible = false;
                } else {
                    trace!(index, "Ignoring click outside the suggestion list");
                }
            }
            Action::OutsideInteraction => {
                state.focused_index = None;
                state.dropdown_visible = false;
            }
            Action::DebounceElapsed(text) => {
                let long_enough = text.trim().chars().count() >= self.min_query_chars;
                state.debounced_text = text.clone();
                if long_enough {
                    effects.push(Effect::IssueFetch(text));
                } else {
                    state.replace_suggestions(Vec::new());
                    state.is_loading = false;
                    effects.push(Effect::CancelFetch);
                }
            }
            Action::FetchStarted => {
                state.is_loading = true;
            }
            Action::FetchSucceeded { query, items } => {
                let ranked = self.ranker.rank(items, &query);
                state.replace_suggestions(ranked);
                state.is_loading = false;
            }
            Action::FetchFailed => {
                // Keep the last good suggestions on screen.
                state.is_loading = false;
            }
        }

        effects
    }

    fn set_raw_text(state: &mut SearchState, text: String, effects: &mut Vec<Effect>) {
        if state.raw_text == text {
            return;
        }
        state.raw_text = text.clone();
        effects.push(Effect::RestartDebounce(text.clone()));
        effects.push(Effect::NotifyValueChanged(text));
    }
}
