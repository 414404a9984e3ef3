//! CPU worker that drains the shard queue.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::search::{Alphabet, Match, Shard, ShardCandidates};

use super::SharedSearchState;

/// A worker that exhaustively hashes the candidates of each shard it receives.
pub struct CpuWorker {
    /// Worker ID
    id: usize,
    /// Characters allowed at every position
    alphabet: Arc<Alphabet>,
    /// Maximum candidate length
    max_len: usize,
    /// Queue of shards to search
    shard_rx: Receiver<Shard>,
    /// Channel to send the match
    result_tx: Sender<Match>,
    /// Shared termination flag, counter and target
    state: Arc<SharedSearchState>,
}

impl CpuWorker {
    /// Creates a new CPU worker.
    pub fn new(
        id: usize,
        alphabet: Arc<Alphabet>,
        max_len: usize,
        shard_rx: Receiver<Shard>,
        result_tx: Sender<Match>,
        state: Arc<SharedSearchState>,
    ) -> Self {
        Self {
            id,
            alphabet,
            max_len,
            shard_rx,
            result_tx,
            state,
        }
    }

    /// Runs the worker loop.
    ///
    /// Takes shards off the queue until:
    /// - The queue is closed and empty
    /// - This worker claims a match (sends it through the result channel)
    /// - Another worker or an external stop sets the termination flag
    pub fn run(&self) {
        for shard in self.shard_rx.iter() {
            if !self.search_shard(shard) {
                break;
            }
        }
        log::debug!("worker {} exiting", self.id);
    }

    /// Hashes every candidate in `shard`.
    ///
    /// Returns false if the search is over and the worker should stop.
    fn search_shard(&self, shard: Shard) -> bool {
        let target = self.state.target();
        let algorithm = target.algorithm();
        let mut candidates = ShardCandidates::new(shard, &self.alphabet, self.max_len);

        log::debug!("worker {} searching shard {:?}", self.id, shard.first() as char);

        loop {
            // Checked before every candidate: at most one hash of overshoot after a match.
            if self.state.is_terminated() {
                return false;
            }

            let Some(candidate) = candidates.next_candidate() else {
                return true;
            };

            let digest = algorithm.digest(candidate);
            self.state.record_hash();

            if target.matches(&digest) {
                if self.state.try_terminate() {
                    let result = Match {
                        candidate: String::from_utf8_lossy(candidate).into_owned(),
                        worker_id: self.id,
                    };
                    // Try to send result (ignore if channel closed)
                    let _ = self.result_tx.send(result);
                }
                return false;
            }
        }
    }

    /// Returns the worker ID.
    pub fn id(&self) -> usize {
        self.id
    }
}
