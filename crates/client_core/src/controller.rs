//! Per-mode search state and the controller that drives searches through a [`PoemSource`].
//!
//! A search runs in three steps: [`SearchController::begin`] resets the mode's
//! state and validates the inputs, [`PendingSearch::run`] performs the lookup
//! without borrowing the controller, and [`SearchController::complete`] stores
//! the outcome. Each mode keeps a ticket; an outcome that does not carry the
//! mode's latest ticket is dropped, so the newest search of a mode always wins.

use std::sync::Arc;

use shared::{
    domain::{Poem, PoemQuery, SearchMode},
    error::SearchError,
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::client::PoemSource;

const FETCH_FAILED_PREFIX: &str = "Failed to fetch poems: ";
const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// What one search mode currently shows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchState {
    results: Vec<Poem>,
    error_message: Option<String>,
    last_query: Option<PoemQuery>,
    phase: SearchPhase,
}

impl SearchState {
    pub fn results(&self) -> &[Poem] {
        &self.results
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn last_query(&self) -> Option<&PoemQuery> {
        self.last_query.as_ref()
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }
}

#[derive(Debug, Default)]
struct ModeSlot {
    state: SearchState,
    ticket: u64,
}

/// A validated search waiting to be sent.
pub struct PendingSearch {
    query: PoemQuery,
    ticket: u64,
    source: Arc<dyn PoemSource>,
}

impl PendingSearch {
    pub fn mode(&self) -> SearchMode {
        self.query.mode()
    }

    pub fn query(&self) -> &PoemQuery {
        &self.query
    }

    pub async fn run(self) -> SearchOutcome {
        let result = self.source.find(&self.query).await;
        SearchOutcome {
            query: self.query,
            ticket: self.ticket,
            result,
        }
    }

    /// Runs the search on the tokio runtime.
    pub fn spawn(self) -> SpawnedSearch {
        let query = self.query.clone();
        let ticket = self.ticket;
        SpawnedSearch {
            query,
            ticket,
            handle: tokio::spawn(self.run()),
        }
    }
}

pub struct SpawnedSearch {
    query: PoemQuery,
    ticket: u64,
    handle: JoinHandle<SearchOutcome>,
}

impl SpawnedSearch {
    pub fn mode(&self) -> SearchMode {
        self.query.mode()
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Waits for the task. A task that panicked or was aborted yields
    /// [`SearchError::Unknown`].
    pub async fn outcome(self) -> SearchOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(mode = %self.query.mode(), error = %err, "search task did not finish");
                SearchOutcome {
                    query: self.query,
                    ticket: self.ticket,
                    result: Err(SearchError::Unknown),
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct SearchOutcome {
    query: PoemQuery,
    ticket: u64,
    result: Result<Vec<Poem>, SearchError>,
}

impl SearchOutcome {
    pub fn mode(&self) -> SearchMode {
        self.query.mode()
    }

    pub fn result(&self) -> &Result<Vec<Poem>, SearchError> {
        &self.result
    }
}

/// Owns one [`SearchState`] per [`SearchMode`]. Modes never touch each other's state.
pub struct SearchController {
    source: Arc<dyn PoemSource>,
    slots: [ModeSlot; 3],
}

impl SearchController {
    pub fn new(source: Arc<dyn PoemSource>) -> Self {
        Self {
            source,
            slots: Default::default(),
        }
    }

    pub fn state(&self, mode: SearchMode) -> &SearchState {
        &self.slots[mode.index()].state
    }

    /// Resets the mode's state and validates the query. Returns `None` when a
    /// required input is blank; the validation prompt is then already stored.
    pub fn begin(&mut self, query: PoemQuery) -> Option<PendingSearch> {
        let mode = query.mode();
        let slot = &mut self.slots[mode.index()];
        slot.ticket += 1;
        slot.state = SearchState {
            last_query: Some(query.clone()),
            ..SearchState::default()
        };

        if let Err(err) = query.validate() {
            debug!(%mode, error = %err, "search rejected before request");
            slot.state.error_message = Some(err.to_string());
            slot.state.phase = SearchPhase::Failed;
            return None;
        }

        slot.state.phase = SearchPhase::Loading;
        Some(PendingSearch {
            query,
            ticket: slot.ticket,
            source: Arc::clone(&self.source),
        })
    }

    /// Stores a finished search. Returns `false` when a newer search of the
    /// same mode has started since, in which case the outcome is discarded.
    pub fn complete(&mut self, outcome: SearchOutcome) -> bool {
        let mode = outcome.mode();
        let slot = &mut self.slots[mode.index()];
        if outcome.ticket != slot.ticket {
            debug!(
                %mode,
                ticket = outcome.ticket,
                current = slot.ticket,
                "dropping outcome of superseded search"
            );
            return false;
        }

        match outcome.result {
            Ok(poems) => {
                info!(%mode, count = poems.len(), "poems fetched");
                if poems.is_empty() {
                    slot.state.error_message = Some(outcome.query.not_found_message());
                }
                slot.state.results = poems;
                slot.state.phase = SearchPhase::Loaded;
            }
            Err(err) => {
                error!(%mode, error = %err, "error fetching poems");
                let reason = err.user_message().unwrap_or(UNKNOWN_ERROR);
                slot.state.results.clear();
                slot.state.error_message = Some(format!("{FETCH_FAILED_PREFIX}{reason}"));
                slot.state.phase = SearchPhase::Failed;
            }
        }
        true
    }

    /// Runs one search to completion and returns the mode's resulting state.
    pub async fn search(&mut self, query: PoemQuery) -> &SearchState {
        let mode = query.mode();
        if let Some(pending) = self.begin(query) {
            let outcome = pending.run().await;
            self.complete(outcome);
        }
        self.state(mode)
    }

    pub async fn search_by_author(&mut self, author: &str) -> &SearchState {
        self.search(PoemQuery::by_author(author)).await
    }

    pub async fn search_by_title(&mut self, title: &str) -> &SearchState {
        self.search(PoemQuery::by_title(title)).await
    }

    pub async fn search_by_author_and_title(&mut self, author: &str, title: &str) -> &SearchState {
        self.search(PoemQuery::by_author_and_title(author, title)).await
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
