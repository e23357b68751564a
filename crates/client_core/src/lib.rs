//! PoetryDB client and the search controller that keeps one state per search mode.

pub mod client;
pub mod controller;

pub use client::{PoemSource, PoetryClient, DEFAULT_BASE_URL};
pub use controller::{
    PendingSearch, SearchController, SearchOutcome, SearchPhase, SearchState, SpawnedSearch,
};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
