//! Search coordination: shard queue, worker threads, reporter and final result.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::bounded;

use crate::config::{ConfigError, SearchConfig};
use crate::crypto::{DigestAlgorithm, TargetDigest};
use crate::search::{SearchReport, SearchResult};

use super::cpu::CpuWorker;
use super::reporter::RateReporter;
use super::SharedSearchState;

/// Owns the shared state of one search and drives it to completion.
pub struct Coordinator {
    config: SearchConfig,
    state: Arc<SharedSearchState>,
}

impl Coordinator {
    /// Creates a coordinator. Nothing runs until [`Coordinator::run`].
    pub fn new(config: SearchConfig, target: TargetDigest) -> Self {
        Self {
            config,
            state: Arc::new(SharedSearchState::new(target)),
        }
    }

    /// Decodes `hex_target` for `algorithm` and creates a coordinator.
    pub fn from_hex(
        config: SearchConfig,
        hex_target: &str,
        algorithm: DigestAlgorithm,
    ) -> Result<Self, SearchError> {
        let target = TargetDigest::from_hex(hex_target, algorithm)?;
        Ok(Self::new(config, target))
    }

    /// Returns a handle to the shared state for external use (e.g., signal handlers).
    pub fn state_handle(&self) -> Arc<SharedSearchState> {
        self.state.clone()
    }

    /// Signals all workers to stop.
    pub fn cancel(&self) {
        self.state.cancel();
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.config.workers()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search and blocks until every worker has exited.
    ///
    /// One shard per alphabet character is queued and the queue is closed;
    /// workers drain it until it is empty or the termination flag is set.
    pub fn run(self) -> Result<SearchReport, SearchError> {
        let start = Instant::now();
        let alphabet = Arc::new(self.config.alphabet().clone());
        let max_len = self.config.max_length();

        let (shard_tx, shard_rx) = bounded(alphabet.len());
        // Only the worker that wins the termination flag sends.
        let (result_tx, result_rx) = bounded(1);

        let mut workers: Vec<(usize, JoinHandle<()>)> = Vec::with_capacity(self.config.workers());
        for id in 0..self.config.workers() {
            let worker = CpuWorker::new(
                id,
                alphabet.clone(),
                max_len,
                shard_rx.clone(),
                result_tx.clone(),
                self.state.clone(),
            );
            let guard_state = self.state.clone();

            let spawned = thread::Builder::new()
                .name(format!("hash-worker-{}", id))
                .spawn(move || {
                    let _guard = CancelOnPanic(&guard_state);
                    worker.run();
                });

            match spawned {
                Ok(handle) => workers.push((id, handle)),
                Err(e) => {
                    self.state.cancel();
                    drop(shard_tx);
                    for (_, handle) in workers {
                        let _ = handle.join();
                    }
                    return Err(SearchError::Spawn(e));
                }
            }
        }

        // Drop the extra handles so the channels close when all workers finish
        drop(shard_rx);
        drop(result_tx);

        for shard in alphabet.shards() {
            if shard_tx.send(shard).is_err() {
                break;
            }
        }
        drop(shard_tx);

        let (shutdown_tx, shutdown_rx) = bounded::<()>(0);
        let reporter = self.config.report().cloned().and_then(|options| {
            let reporter = RateReporter::new(self.state.clone(), options);
            thread::Builder::new()
                .name("hash-rate-reporter".into())
                .spawn(move || reporter.run(shutdown_rx))
                .map_err(|e| log::warn!("rate reporter not started: {}", e))
                .ok()
        });

        let mut panicked = None;
        for (id, handle) in workers {
            if handle.join().is_err() {
                log::error!("worker {} panicked", id);
                panicked.get_or_insert(id);
            }
        }

        drop(shutdown_tx);
        let peak_memory_mb = reporter.and_then(|handle| handle.join().ok().flatten());

        let result = match result_rx.try_recv() {
            Ok(found) => SearchResult::Found(found),
            Err(_) => {
                if let Some(id) = panicked {
                    return Err(SearchError::WorkerPanicked(id));
                }
                if self.state.is_terminated() {
                    SearchResult::Cancelled
                } else {
                    SearchResult::NotFound
                }
            }
        };

        Ok(SearchReport {
            result,
            total_hashes: self.state.total_hashes(),
            elapsed: start.elapsed(),
            peak_memory_mb,
        })
    }
}

/// Sets the termination flag if the owning thread unwinds, so sibling
/// workers stop instead of searching for a result that will be discarded.
struct CancelOnPanic<'a>(&'a SharedSearchState);

impl Drop for CancelOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.cancel();
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),
}
