//! Digest functions and the target being searched for.
//!
//! This module provides:
//! - A closed set of supported hash algorithms (MD5, SHA-1, SHA-256, SHA-512)
//! - Allocation-free digest computation for the hot loop
//! - Target digest decoding and comparison

mod digest;
mod target;

pub use digest::{Digest, DigestAlgorithm, MAX_DIGEST_LEN};
pub use target::TargetDigest;
