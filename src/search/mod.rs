//! The candidate search space.
//!
//! - `Alphabet`: characters allowed at every position
//! - `Shard`: all candidates sharing a first character, the unit of work
//! - `ShardCandidates`: depth-first enumeration of one shard

mod alphabet;
mod enumerator;
mod result;

pub use alphabet::{Alphabet, Shard, DEFAULT_FIRST, DEFAULT_LAST};
pub use enumerator::ShardCandidates;
pub use result::{Match, SearchReport, SearchResult};
