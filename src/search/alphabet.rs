//! Candidate alphabet and shard partitioning.

use std::fmt;

use crate::config::ConfigError;

/// First character of the default alphabet.
pub const DEFAULT_FIRST: u8 = b'0';
/// Last character of the default alphabet (inclusive).
pub const DEFAULT_LAST: u8 = b'z';

/// An ordered, duplicate-free set of ASCII characters.
///
/// The same alphabet applies to every position of a candidate.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<u8>,
}

impl Alphabet {
    /// Builds an alphabet from an inclusive ASCII range.
    pub fn from_range(first: u8, last: u8) -> Result<Self, ConfigError> {
        if first > last || !last.is_ascii() {
            return Err(ConfigError::InvalidCharset(format!(
                "invalid range {:?}..={:?}",
                first as char, last as char
            )));
        }
        Ok(Self {
            chars: (first..=last).collect(),
        })
    }

    /// Builds an alphabet from the characters of `charset`, keeping the first
    /// occurrence of each.
    pub fn from_chars(charset: &str) -> Result<Self, ConfigError> {
        if charset.is_empty() {
            return Err(ConfigError::InvalidCharset("charset cannot be empty".into()));
        }
        if !charset.is_ascii() {
            return Err(ConfigError::InvalidCharset(
                "charset must contain only ASCII characters".into(),
            ));
        }

        let mut seen = [false; 128];
        let chars = charset
            .bytes()
            .filter(|&b| !std::mem::replace(&mut seen[b as usize], true))
            .collect();

        Ok(Self { chars })
    }

    /// Number of characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }

    /// Returns true if every byte of `s` is in the alphabet.
    pub fn contains_all(&self, s: &[u8]) -> bool {
        s.iter().all(|b| self.chars.contains(b))
    }

    /// One shard per character, in alphabet order.
    ///
    /// Shards partition the candidate space exactly: every candidate belongs
    /// to the shard of its first character.
    pub fn shards(&self) -> impl Iterator<Item = Shard> + '_ {
        self.chars.iter().map(|&first| Shard { first })
    }

    /// Number of candidates of length `1..=max_len`: A + A² + … + A^max_len.
    ///
    /// Returns `None` on overflow.
    pub fn space_size(&self, max_len: usize) -> Option<u128> {
        let a = self.chars.len() as u128;
        let mut level: u128 = 1;
        let mut total: u128 = 0;
        for _ in 0..max_len {
            level = level.checked_mul(a)?;
            total = total.checked_add(level)?;
        }
        Some(total)
    }

    /// Returns a human-readable size estimate for `max_len`.
    pub fn difficulty_description(&self, max_len: usize) -> String {
        match self.space_size(max_len) {
            Some(0..=1_000_000) => "Very Easy (< 1 second)".into(),
            Some(1_000_001..=100_000_000) => "Easy (seconds)".into(),
            Some(100_000_001..=10_000_000_000) => "Medium (minutes)".into(),
            Some(10_000_000_001..=1_000_000_000_000) => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            chars: (DEFAULT_FIRST..=DEFAULT_LAST).collect(),
        }
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({:?})", String::from_utf8_lossy(&self.chars))
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.chars.first(), self.chars.last()) {
            (Some(&first), Some(&last)) if self.chars.len() > 8 => {
                write!(f, "{}..{} ({} chars)", first as char, last as char, self.len())
            }
            _ => write!(f, "{}", String::from_utf8_lossy(&self.chars)),
        }
    }
}

/// The subset of candidates that start with one fixed character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shard {
    first: u8,
}

impl Shard {
    pub fn new(first: u8) -> Self {
        Self { first }
    }

    #[inline]
    pub fn first(&self) -> u8 {
        self.first
    }
}
