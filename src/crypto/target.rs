//! The digest being searched for.

use std::fmt;

use super::{Digest, DigestAlgorithm};
use crate::config::ConfigError;

/// A decoded target digest, checked against the algorithm it will be compared with.
#[derive(Clone, PartialEq, Eq)]
pub struct TargetDigest {
    bytes: Vec<u8>,
    algorithm: DigestAlgorithm,
}

impl TargetDigest {
    /// Decodes a hex-encoded target for `algorithm`.
    ///
    /// Rejects invalid hex and any digest whose length differs from the
    /// algorithm's output, since such a target could never be matched.
    pub fn from_hex(hex_str: &str, algorithm: DigestAlgorithm) -> Result<Self, ConfigError> {
        let bytes = hex::decode(hex_str.trim())?;
        Self::from_bytes(bytes, algorithm)
    }

    /// Wraps raw digest bytes for `algorithm`.
    pub fn from_bytes(bytes: Vec<u8>, algorithm: DigestAlgorithm) -> Result<Self, ConfigError> {
        if bytes.len() != algorithm.output_len() {
            return Err(ConfigError::DigestLengthMismatch {
                algorithm,
                expected: algorithm.output_len(),
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, algorithm })
    }

    /// Computes the target for a known preimage.
    pub fn of(preimage: &[u8], algorithm: DigestAlgorithm) -> Self {
        Self {
            bytes: algorithm.digest(preimage).as_bytes().to_vec(),
            algorithm,
        }
    }

    #[inline]
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns true if `digest` is byte-for-byte equal to the target.
    #[inline]
    pub fn matches(&self, digest: &Digest) -> bool {
        digest.len() == self.bytes.len() && digest.as_bytes() == self.bytes.as_slice()
    }

    /// Hashes `candidate` with the target's algorithm and compares.
    #[inline]
    pub fn is_preimage(&self, candidate: &[u8]) -> bool {
        self.matches(&self.algorithm.digest(candidate))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Debug for TargetDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetDigest({}:{})", self.algorithm, self.to_hex())
    }
}

impl fmt::Display for TargetDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MD5_ABC: &str = "900150983cd24fb0d6963f7d28e17f72";

    #[test]
    fn test_from_hex_accepts_matching_length() {
        let target = TargetDigest::from_hex(MD5_ABC, DigestAlgorithm::Md5).unwrap();
        assert_eq!(target.as_bytes().len(), 16);
        assert!(target.is_preimage(b"abc"));
        assert!(!target.is_preimage(b"abd"));
    }

    #[test]
    fn test_from_hex_is_case_insensitive() {
        let target =
            TargetDigest::from_hex(&MD5_ABC.to_uppercase(), DigestAlgorithm::Md5).unwrap();
        assert_eq!(target.to_hex(), MD5_ABC);
    }

    #[test]
    fn test_invalid_hex_rejected() {
        let err = TargetDigest::from_hex("zz", DigestAlgorithm::Md5).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHex(_)));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = TargetDigest::from_hex(MD5_ABC, DigestAlgorithm::Sha256).unwrap_err();
        match err {
            ConfigError::DigestLengthMismatch {
                algorithm,
                expected,
                actual,
            } => {
                assert_eq!(algorithm, DigestAlgorithm::Sha256);
                assert_eq!(expected, 32);
                assert_eq!(actual, 16);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_matches_short_circuits_on_length() {
        let target = TargetDigest::of(b"abc", DigestAlgorithm::Sha256);
        let truncated = Digest::from_slice(&target.as_bytes()[..16]);
        assert!(!target.matches(&truncated));
    }
}
