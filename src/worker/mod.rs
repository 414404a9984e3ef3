//! Worker pool for parallel preimage search.
//!
//! This module provides:
//! - Multi-threaded CPU workers draining a shard queue
//! - Lock-free shared state (termination flag, hash counter)
//! - The coordinator that owns the pool and produces the final report
//! - Periodic hash-rate reporting

mod cpu;
mod pool;
mod reporter;
mod state;

pub use cpu::CpuWorker;
pub use pool::{Coordinator, SearchError};
pub use reporter::{format_rate, RateLogError, RateReporter, RateSample};
pub use state::SharedSearchState;
