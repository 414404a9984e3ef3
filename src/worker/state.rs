//! State shared by every worker and the rate reporter.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::crypto::TargetDigest;

/// The only cross-thread mutable state of a search.
///
/// Everything here is lock-free: workers bump the hash counter once per
/// digest and poll the termination flag before each candidate.
#[derive(Debug)]
pub struct SharedSearchState {
    /// Set once: by the worker that claims a match, or by an external stop.
    terminated: AtomicBool,
    /// Hashes since the last reporter sample.
    hash_counter: AtomicU64,
    /// Hashes already taken out of `hash_counter` by the reporter.
    drained: AtomicU64,
    target: TargetDigest,
}

impl SharedSearchState {
    pub fn new(target: TargetDigest) -> Self {
        Self {
            terminated: AtomicBool::new(false),
            hash_counter: AtomicU64::new(0),
            drained: AtomicU64::new(0),
            target,
        }
    }

    #[inline]
    pub fn target(&self) -> &TargetDigest {
        &self.target
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    /// Atomically sets the termination flag.
    ///
    /// Returns true only for the single caller that flipped it, which is
    /// the one allowed to publish a match.
    #[inline]
    pub fn try_terminate(&self) -> bool {
        self.terminated
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Stops the search without claiming a result.
    pub fn cancel(&self) {
        self.terminated.store(true, Ordering::Release);
    }

    #[inline]
    pub fn record_hash(&self) {
        self.hash_counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the hashes counted since the previous call and resets the counter.
    pub fn take_interval_count(&self) -> u64 {
        let count = self.hash_counter.swap(0, Ordering::AcqRel);
        self.drained.fetch_add(count, Ordering::Relaxed);
        count
    }

    /// Hashes counted since the last sample, without resetting.
    pub fn pending_count(&self) -> u64 {
        self.hash_counter.load(Ordering::Relaxed)
    }

    /// Total hashes performed. Exact once all workers and the reporter have stopped.
    pub fn total_hashes(&self) -> u64 {
        self.drained.load(Ordering::Relaxed) + self.hash_counter.load(Ordering::Relaxed)
    }
}
