//! Runtime configuration for the hash breaker.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::crypto::{DigestAlgorithm, TargetDigest};
use crate::search::Alphabet;

/// Default interval between hash-rate samples.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_millis(300);

/// Brute-force preimage search for MD5/SHA digests
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Hex-encoded digest to break
    pub target: String,

    /// Maximum length of the candidate strings
    #[arg(short = 'l', long = "length", default_value = "4")]
    pub max_length: usize,

    /// Number of worker threads
    #[arg(short = 'w', long, default_value = "8")]
    pub workers: usize,

    /// Digest algorithm: sha1, sha256, sha512 or md5
    #[arg(short = 'e', long, visible_alias = "encryption", default_value = "sha256")]
    pub algorithm: DigestAlgorithm,

    /// Characters to build candidates from (default: every ASCII char from '0' to 'z')
    #[arg(short = 'c', long)]
    pub charset: Option<String>,

    /// Hash-rate report interval in milliseconds
    #[arg(short = 'r', long, default_value = "300")]
    pub report_interval: u64,

    /// Append the raw hash rate to a timestamped log file in the working directory
    #[arg(long, default_value = "false")]
    pub log: bool,

    /// Track process memory while searching
    #[arg(long, default_value = "false")]
    pub profile: bool,
}

impl Config {
    /// Parses the process arguments, accepting the single-dash `-log` spelling.
    pub fn from_args() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::InvalidLength(self.max_length));
        }

        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkers(self.workers));
        }

        if self.report_interval == 0 {
            return Err(ConfigError::InvalidReportInterval);
        }

        if let Some(ref charset) = self.charset {
            Alphabet::from_chars(charset)?;
        }

        Ok(())
    }

    /// Returns the alphabet selected by `--charset`, or the default range.
    pub fn alphabet(&self) -> Result<Alphabet, ConfigError> {
        match self.charset {
            Some(ref charset) => Alphabet::from_chars(charset),
            None => Ok(Alphabet::default()),
        }
    }

    /// Decodes the positional target for the selected algorithm.
    pub fn target_digest(&self) -> Result<TargetDigest, ConfigError> {
        TargetDigest::from_hex(&self.target, self.algorithm)
    }

    /// Builds the immutable search configuration.
    pub fn search_config(&self) -> Result<SearchConfig, ConfigError> {
        self.validate()?;

        let report = ReportOptions {
            interval: Duration::from_millis(self.report_interval),
            console: true,
            log_file: if self.log { Some(rate_log_path()) } else { None },
            profile: self.profile,
        };

        Ok(SearchConfig::new(self.alphabet()?, self.max_length, self.workers)?
            .with_report(report))
    }
}

/// Rewrites `-log` to `--log`; clap only supports single-character short flags.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| if arg == "-log" { OsString::from("--log") } else { arg })
        .collect()
}

/// Returns `log-<timestamp>.txt` in the working directory.
pub fn rate_log_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    PathBuf::from(format!("log-{}.txt", timestamp))
}

/// Immutable parameters of one search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    alphabet: Alphabet,
    max_length: usize,
    workers: usize,
    report: Option<ReportOptions>,
}

impl SearchConfig {
    /// Creates a configuration with rate reporting disabled.
    pub fn new(alphabet: Alphabet, max_length: usize, workers: usize) -> Result<Self, ConfigError> {
        if max_length == 0 {
            return Err(ConfigError::InvalidLength(max_length));
        }
        if workers == 0 {
            return Err(ConfigError::InvalidWorkers(workers));
        }
        if alphabet.is_empty() {
            return Err(ConfigError::InvalidCharset("charset cannot be empty".into()));
        }

        Ok(Self {
            alphabet,
            max_length,
            workers,
            report: None,
        })
    }

    /// Enables the rate reporter.
    pub fn with_report(mut self, report: ReportOptions) -> Self {
        self.report = Some(report);
        self
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn report(&self) -> Option<&ReportOptions> {
        self.report.as_ref()
    }
}

/// Settings for the rate reporter.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Time between samples
    pub interval: Duration,
    /// Print the rate to stdout
    pub console: bool,
    /// Append raw rates to this file
    pub log_file: Option<PathBuf>,
    /// Sample process memory alongside the rate
    pub profile: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REPORT_INTERVAL,
            console: true,
            log_file: None,
            profile: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid length: {0} (must be at least 1)")]
    InvalidLength(usize),

    #[error("Invalid worker count: {0} (must be at least 1)")]
    InvalidWorkers(usize),

    #[error("Invalid report interval: must be at least 1 ms")]
    InvalidReportInterval,

    #[error("Invalid charset: {0}")]
    InvalidCharset(String),

    #[error("Invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Digest length mismatch: {algorithm} produces {expected} bytes, target has {actual}")]
    DigestLengthMismatch {
        algorithm: DigestAlgorithm,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA256_ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        let args = std::iter::once("hash_breaker")
            .chain(args.iter().copied())
            .map(OsString::from);
        Config::try_parse_from(normalize_legacy_flags(args))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[SHA256_ABC]).unwrap();
        assert_eq!(config.max_length, 4);
        assert_eq!(config.workers, 8);
        assert_eq!(config.algorithm, DigestAlgorithm::Sha256);
        assert_eq!(config.report_interval, 300);
        assert!(!config.log);
        assert!(!config.profile);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = parse(&["-l", "2", "-w", "3", "-e", "md5", "--profile", "00"]).unwrap();
        assert_eq!(config.max_length, 2);
        assert_eq!(config.workers, 3);
        assert_eq!(config.algorithm, DigestAlgorithm::Md5);
        assert!(config.profile);
        assert_eq!(config.target, "00");
    }

    #[test]
    fn test_legacy_log_flag() {
        let config = parse(&["-log", SHA256_ABC]).unwrap();
        assert!(config.log);
        let config = parse(&["--log", SHA256_ABC]).unwrap();
        assert!(config.log);
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        assert!(parse(&["-e", "crc32", SHA256_ABC]).is_err());
    }

    #[test]
    fn test_missing_target_rejected() {
        assert!(parse(&["-l", "3"]).is_err());
    }

    #[test]
    fn test_zero_length_and_workers_rejected() {
        let config = parse(&["-l", "0", SHA256_ABC]).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLength(0))));

        let config = parse(&["-w", "0", SHA256_ABC]).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWorkers(0))));
    }

    #[test]
    fn test_target_digest_checks_algorithm_length() {
        let config = parse(&["-e", "md5", SHA256_ABC]).unwrap();
        assert!(matches!(
            config.target_digest(),
            Err(ConfigError::DigestLengthMismatch { .. })
        ));

        let config = parse(&[SHA256_ABC]).unwrap();
        assert!(config.target_digest().unwrap().is_preimage(b"abc"));
    }

    #[test]
    fn test_search_config_uses_charset() {
        let config = parse(&["-c", "abcab", "-l", "3", SHA256_ABC]).unwrap();
        let search = config.search_config().unwrap();
        assert_eq!(search.alphabet().as_bytes(), b"abc");
        assert_eq!(search.max_length(), 3);
        assert!(search.report().is_some());
    }

    #[test]
    fn test_rate_log_path_is_timestamped() {
        let name = rate_log_path().to_string_lossy().into_owned();
        assert!(name.starts_with("log-"));
        assert!(name.ends_with(".txt"));
    }
}
