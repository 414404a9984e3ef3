//! Depth-first enumeration of a shard's candidates.

use super::{Alphabet, Shard};

/// Walks every candidate of one shard in depth-first pre-order.
///
/// The shard's character is the root; each node's children append one
/// alphabet character, down to `max_len` characters. Every node is a
/// candidate, so shorter strings are tested before their extensions.
///
/// State is a single growing buffer plus one alphabet index per appended
/// position, so memory stays O(`max_len`) regardless of alphabet size.
/// Candidates are lent out one at a time through [`next_candidate`].
///
/// [`next_candidate`]: ShardCandidates::next_candidate
pub struct ShardCandidates<'a> {
    alphabet: &'a [u8],
    max_len: usize,
    /// The current candidate.
    buf: Vec<u8>,
    /// Alphabet index of `buf[i + 1]`.
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl<'a> ShardCandidates<'a> {
    pub fn new(shard: Shard, alphabet: &'a Alphabet, max_len: usize) -> Self {
        let mut buf = Vec::with_capacity(max_len.max(1));
        buf.push(shard.first());

        Self {
            alphabet: alphabet.as_bytes(),
            max_len,
            buf,
            indices: Vec::with_capacity(max_len),
            started: false,
            done: max_len == 0 || alphabet.is_empty(),
        }
    }

    /// Advances to the next candidate and returns it, or `None` once the
    /// shard is exhausted.
    pub fn next_candidate(&mut self) -> Option<&[u8]> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(&self.buf);
        }

        if self.buf.len() < self.max_len {
            // Descend to the first child.
            self.buf.push(self.alphabet[0]);
            self.indices.push(0);
            return Some(&self.buf);
        }

        // At a leaf: move to the next sibling, climbing while exhausted.
        loop {
            let Some(index) = self.indices.last_mut() else {
                self.done = true;
                return None;
            };

            if *index + 1 < self.alphabet.len() {
                *index += 1;
                let next = self.alphabet[*index];
                if let Some(last) = self.buf.last_mut() {
                    *last = next;
                }
                return Some(&self.buf);
            }

            self.indices.pop();
            self.buf.pop();
        }
    }

    /// Length of the current candidate (the traversal depth).
    #[inline]
    pub fn depth(&self) -> usize {
        self.buf.len()
    }

    /// Returns true once every candidate has been produced.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.done
    }
}
