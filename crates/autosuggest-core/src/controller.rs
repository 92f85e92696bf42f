//! Autocomplete controller
//!
//! One controller task runs per mounted component. It owns the [`SearchMachine`], the
//! debounce timer and the fetcher, so nothing it touches needs a lock. The host talks
//! to it through an [`AutocompleteHandle`]:
//!
//! - UI events go in over an unbounded channel and are applied in order;
//! - every settled state is published on a `watch` channel for the rendering layer;
//! - committed text changes are reported to a [`ValueChangeListener`].
//!
//! Unmounting (dropping the handle or calling [`AutocompleteHandle::unmount`]) cancels
//! the lifecycle token, which cancels any request in flight and stops the task before
//! a pending debounce can fire.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::AutocompleteConfig;
use crate::debounce::Debouncer;
use crate::error::{AutosuggestError, AutosuggestResult};
use crate::fetcher::{FetchOutcome, FetchStats, Settled, SuggestionFetcher};
use crate::outside::{InteractionHub, OutsideInteractionGuard, Region, Registration};
use crate::ranker::PrefixRanker;
use crate::source::SuggestionSource;
use crate::state::{Action, Effect, Key, SearchMachine, SearchState};

/// Receives the committed text every time it changes
pub trait ValueChangeListener: Send + Sync {
    fn value_changed(&self, committed: &str);
}

impl<F> ValueChangeListener for F
where
    F: Fn(&str) + Send + Sync,
{
    fn value_changed(&self, committed: &str) {
        self(committed)
    }
}

/// Events the rendering layer forwards to the component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    InputChanged(String),
    InputActivated,
    KeyDown(Key),
    SuggestionClicked(usize),
    OutsideClicked,
}

impl From<UiEvent> for Action {
    fn from(event: UiEvent) -> Self {
        match event {
            UiEvent::InputChanged(text) => Action::TextInput(text),
            UiEvent::InputActivated => Action::InputActivated,
            UiEvent::KeyDown(key) => key.into(),
            UiEvent::SuggestionClicked(index) => Action::SuggestionClicked(index),
            UiEvent::OutsideClicked => Action::OutsideInteraction,
        }
    }
}

/// Builds and mounts an autocomplete controller
pub struct AutocompleteBuilder {
    source: Arc<dyn SuggestionSource>,
    config: AutocompleteConfig,
    initial_value: String,
    listener: Option<Arc<dyn ValueChangeListener>>,
}

impl AutocompleteBuilder {
    pub fn new(source: Arc<dyn SuggestionSource>) -> Self {
        Self {
            source,
            config: AutocompleteConfig::default(),
            initial_value: String::new(),
            listener: None,
        }
    }

    pub fn config(mut self, config: AutocompleteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn on_value_change(mut self, listener: impl ValueChangeListener + 'static) -> Self {
        self.listener = Some(Arc::new(listener));
        self
    }

    /// Spawn the controller task on the current tokio runtime
    pub fn mount(self) -> AutosuggestResult<AutocompleteHandle> {
        self.config.validate()?;

        let lifecycle = CancellationToken::new();
        let machine = SearchMachine::new(
            self.initial_value.clone(),
            PrefixRanker::new(self.config.max_suggestions),
        )
        .with_min_query_chars(self.config.min_query_chars);

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(machine.state().clone());
        let (stats_tx, stats_rx) = watch::channel(FetchStats::default());

        let controller = Controller {
            machine,
            debouncer: Debouncer::new(self.config.debounce()),
            fetcher: SuggestionFetcher::new(self.source, lifecycle.clone()),
            listener: self.listener,
            events: events_rx,
            outcomes_tx,
            outcomes: outcomes_rx,
            state_tx,
            stats_tx,
            lifecycle: lifecycle.clone(),
        };

        debug!(initial = %self.initial_value, "Mounting autocomplete");
        let task = tokio::spawn(controller.run(self.initial_value));

        Ok(AutocompleteHandle {
            events: events_tx,
            state: state_rx,
            stats: stats_rx,
            lifecycle,
            outside: Mutex::new(Vec::new()),
            task: Some(task),
        })
    }
}

/// Host-side handle of a mounted autocomplete
///
/// Dropping the handle unmounts the component.
pub struct AutocompleteHandle {
    events: mpsc::UnboundedSender<UiEvent>,
    state: watch::Receiver<SearchState>,
    stats: watch::Receiver<FetchStats>,
    lifecycle: CancellationToken,
    outside: Mutex<Vec<Registration>>,
    task: Option<JoinHandle<()>>,
}

impl AutocompleteHandle {
    pub fn send(&self, event: UiEvent) -> AutosuggestResult<()> {
        self.events
            .send(event)
            .map_err(|_| AutosuggestError::ControllerClosed)
    }

    pub fn input_changed(&self, text: impl Into<String>) -> AutosuggestResult<()> {
        self.send(UiEvent::InputChanged(text.into()))
    }

    pub fn activate(&self) -> AutosuggestResult<()> {
        self.send(UiEvent::InputActivated)
    }

    pub fn key_down(&self, key: Key) -> AutosuggestResult<()> {
        self.send(UiEvent::KeyDown(key))
    }

    pub fn click_suggestion(&self, index: usize) -> AutosuggestResult<()> {
        self.send(UiEvent::SuggestionClicked(index))
    }

    pub fn outside_click(&self) -> AutosuggestResult<()> {
        self.send(UiEvent::OutsideClicked)
    }

    /// Latest published state
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Follow state changes
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    pub fn stats(&self) -> FetchStats {
        *self.stats.borrow()
    }

    /// Close the dropdown whenever `hub` sees an interaction outside `region`
    ///
    /// The listener lives until the guard is dropped or the component unmounts,
    /// whichever comes first.
    pub fn watch_outside(
        &self,
        hub: &InteractionHub,
        region: impl Into<Region>,
    ) -> OutsideInteractionGuard {
        let events = self.events.clone();
        let guard = hub.on_outside(region, move || {
            let _ = events.send(UiEvent::OutsideClicked);
        });
        self.outside.lock().push(guard.registration());
        guard
    }

    pub fn is_mounted(&self) -> bool {
        !self.lifecycle.is_cancelled()
    }

    /// Unmount and wait for the controller task to finish
    pub async fn unmount(mut self) {
        self.detach();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!("Autocomplete task ended abnormally: {}", err);
            }
        }
    }

    fn detach(&self) {
        for registration in self.outside.lock().drain(..) {
            registration.remove();
        }
        self.lifecycle.cancel();
    }
}

impl Drop for AutocompleteHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

struct Controller {
    machine: SearchMachine,
    debouncer: Debouncer<String>,
    fetcher: SuggestionFetcher,
    listener: Option<Arc<dyn ValueChangeListener>>,
    events: mpsc::UnboundedReceiver<UiEvent>,
    outcomes_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcomes: mpsc::UnboundedReceiver<FetchOutcome>,
    state_tx: watch::Sender<SearchState>,
    stats_tx: watch::Sender<FetchStats>,
    lifecycle: CancellationToken,
}

impl Controller {
    async fn run(mut self, initial_value: String) {
        // The initial value counts as already debounced.
        self.dispatch(Action::DebounceElapsed(initial_value));

        loop {
            tokio::select! {
                biased;
                _ = self.lifecycle.cancelled() => break,
                event = self.events.recv() => match event {
                    Some(event) => self.dispatch(event.into()),
                    None => break,
                },
                Some(outcome) = self.outcomes.recv() => self.settle(outcome),
                text = self.debouncer.fired() => self.dispatch(Action::DebounceElapsed(text)),
            }
        }

        self.teardown();
    }

    /// Apply `action` and every follow-up it causes, then publish once
    fn dispatch(&mut self, action: Action) {
        let mut pending = VecDeque::from([action]);
        while let Some(action) = pending.pop_front() {
            for effect in self.machine.apply(action) {
                pending.extend(self.run_effect(effect));
            }
        }

        self.state_tx.send_replace(self.machine.state().clone());
    }

    fn run_effect(&mut self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::NotifyValueChanged(text) => {
                if let Some(listener) = &self.listener {
                    listener.value_changed(&text);
                }
            }
            Effect::RestartDebounce(text) => {
                self.debouncer.schedule(text);
            }
            Effect::IssueFetch(query) => {
                if let Some(ticket) = self.fetcher.begin(&query) {
                    let outcomes = self.outcomes_tx.clone();
                    tokio::spawn(async move {
                        let _ = outcomes.send(ticket.run().await);
                    });
                    self.publish_stats();
                    return Some(Action::FetchStarted);
                }
            }
            Effect::CancelFetch => {
                if self.fetcher.cancel() {
                    self.publish_stats();
                }
            }
        }
        None
    }

    fn settle(&mut self, outcome: FetchOutcome) {
        let settled = self.fetcher.settle(outcome);
        self.publish_stats();

        match settled {
            Settled::Stale => {}
            Settled::Loaded { query, items } => {
                self.dispatch(Action::FetchSucceeded { query, items });
            }
            Settled::Failed(err) => {
                if !err.is_cancellation() {
                    warn!("Failed to fetch suggestions: {}", err);
                }
                self.dispatch(Action::FetchFailed);
            }
        }
    }

    fn publish_stats(&self) {
        self.stats_tx.send_replace(self.fetcher.stats());
    }

    fn teardown(&mut self) {
        self.lifecycle.cancel();
        self.debouncer.cancel();
        self.fetcher.cancel();
        self.publish_stats();
        debug!("Autocomplete unmounted");
    }
}
