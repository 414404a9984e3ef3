//! Search outcomes.

use std::fmt;
use std::time::Duration;

/// A candidate whose digest equals the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The matching preimage
    pub candidate: String,
    /// The ID of the worker that found it
    pub worker_id: usize,
}

/// Final result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// A preimage was found.
    Found(Match),
    /// The whole space was searched without a match.
    NotFound,
    /// The search was stopped externally (e.g. Ctrl-C) before completing.
    Cancelled,
}

impl SearchResult {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }

    /// Returns the matched candidate, if any.
    pub fn candidate(&self) -> Option<&str> {
        match self {
            SearchResult::Found(m) => Some(&m.candidate),
            _ => None,
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchResult::Found(m) => write!(f, "found {:?}", m.candidate),
            SearchResult::NotFound => write!(f, "not found"),
            SearchResult::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A search result plus the statistics gathered while producing it.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub result: SearchResult,
    /// Exact number of digests computed across all workers
    pub total_hashes: u64,
    pub elapsed: Duration,
    /// Peak resident memory in MB, when profiling was enabled
    pub peak_memory_mb: Option<f64>,
}

impl SearchReport {
    /// Average hashes per second over the whole search.
    pub fn hashes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_hashes as f64 / secs
        } else {
            0.0
        }
    }
}
