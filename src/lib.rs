//! # hash_breaker
//!
//! Multi-threaded brute-force preimage search for MD5 and SHA digests.
//!
//! ## Architecture
//!
//! - `crypto`: Digest algorithms and target comparison
//! - `search`: Alphabet, shards and depth-first candidate enumeration
//! - `worker`: Coordinator, worker pool, shared state and rate reporting
//! - `config`: Runtime configuration
//! - `memory`: Process memory sampling for profiling

pub mod config;
pub mod crypto;
pub mod memory;
pub mod search;
pub mod worker;

pub use config::{Config, ConfigError, ReportOptions, SearchConfig};
pub use crypto::{Digest, DigestAlgorithm, TargetDigest};
pub use search::{Alphabet, Match, SearchReport, SearchResult, Shard, ShardCandidates};
pub use worker::{Coordinator, RateReporter, SearchError, SharedSearchState};
