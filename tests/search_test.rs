//! End-to-end search tests
//!
//! Runs the coordinator with real worker threads and checks:
//! - Exhaustiveness across worker counts
//! - Exact hash counts for completed searches
//! - Randomised preimages are always recovered
//! - Rejection of targets the algorithm can never produce

use std::time::Duration;

use hash_breaker::worker::RateReporter;
use hash_breaker::{
    Alphabet, Coordinator, DigestAlgorithm, ReportOptions, SearchConfig, SearchError,
    SearchResult, SharedSearchState, TargetDigest,
};
use rand::seq::SliceRandom;
use rand::Rng;

fn search(
    charset: &str,
    max_len: usize,
    workers: usize,
    target: TargetDigest,
) -> hash_breaker::SearchReport {
    let alphabet = Alphabet::from_chars(charset).unwrap();
    let config = SearchConfig::new(alphabet, max_len, workers).unwrap();
    Coordinator::new(config, target).run().unwrap()
}

#[test]
fn test_finds_abc_with_any_worker_count() {
    let target = TargetDigest::of(b"abc", DigestAlgorithm::Sha256);
    for workers in [1, 2, 8, 64] {
        let report = search("abcdef", 3, workers, target.clone());
        assert_eq!(
            report.result.candidate(),
            Some("abc"),
            "workers = {}",
            workers
        );
        assert!(report.total_hashes <= 6 + 36 + 216);
    }
}

#[test]
fn test_finds_abc_in_default_alphabet() {
    let target = TargetDigest::of(b"abc", DigestAlgorithm::Sha256);
    let config = SearchConfig::new(Alphabet::default(), 3, 8).unwrap();
    let report = Coordinator::new(config, target).run().unwrap();
    assert_eq!(report.result.candidate(), Some("abc"));
}

#[test]
fn test_completed_search_hashes_each_candidate_once() {
    let target = TargetDigest::of(b"absent", DigestAlgorithm::Md5);
    let alphabet = Alphabet::from_chars("0123").unwrap();
    let expected = alphabet.space_size(5).unwrap() as u64;
    assert_eq!(expected, 4 + 16 + 64 + 256 + 1024);

    for workers in [1, 3, 4, 9] {
        let report = search("0123", 5, workers, target.clone());
        assert_eq!(report.result, SearchResult::NotFound);
        assert_eq!(report.total_hashes, expected, "workers = {}", workers);
    }
}

#[test]
fn test_random_preimages_are_found() {
    let mut rng = rand::thread_rng();
    let pool: Vec<char> = ('a'..='z').chain('0'..='9').collect();

    for _ in 0..12 {
        let max_len = rng.gen_range(1..=3);
        let len = rng.gen_range(1..=max_len);

        let size = rng.gen_range(2..=6);
        let mut charset: Vec<char> = pool.choose_multiple(&mut rng, size).copied().collect();
        let preimage: String = (0..len)
            .map(|_| *charset.choose(&mut rng).unwrap())
            .collect();
        charset.shuffle(&mut rng);
        let charset: String = charset.into_iter().collect();

        let algorithm = *DigestAlgorithm::ALL.choose(&mut rng).unwrap();
        let workers = rng.gen_range(1..=8);

        let report = search(
            &charset,
            max_len,
            workers,
            TargetDigest::of(preimage.as_bytes(), algorithm),
        );
        assert_eq!(
            report.result.candidate(),
            Some(preimage.as_str()),
            "charset = {:?}, max_len = {}, workers = {}, algorithm = {}",
            charset,
            max_len,
            workers,
            algorithm
        );
    }
}

#[test]
fn test_unreachable_target_is_not_found() {
    // "abcd" is longer than the maximum length.
    let target = TargetDigest::of(b"abcd", DigestAlgorithm::Sha512);
    let report = search("abcd", 3, 4, target);
    assert_eq!(report.result, SearchResult::NotFound);
    assert_eq!(report.total_hashes, 4 + 16 + 64);
}

#[test]
fn test_md5_42_in_digits() {
    let target = TargetDigest::from_hex(
        "a1d0c6e83f027327d8461063f4ac58a6",
        DigestAlgorithm::Md5,
    )
    .unwrap();
    assert!(target.is_preimage(b"42"));

    for workers in [1, 4, 10] {
        let report = search("0123456789", 2, workers, target.clone());
        assert_eq!(report.result.candidate(), Some("42"));
        assert!(report.total_hashes <= 10 + 100);
    }
}

#[test]
fn test_single_worker_stops_right_after_match() {
    // Shards are taken in order; "4" is the fifth shard and "42" its fourth node.
    let target = TargetDigest::of(b"42", DigestAlgorithm::Md5);
    let report = search("0123456789", 2, 1, target);
    assert!(report.result.is_found());
    assert_eq!(report.total_hashes, 4 * 11 + 4);
}

#[test]
fn test_length_mismatch_rejected_before_search() {
    let sha1_hex = hex::encode(DigestAlgorithm::Sha1.digest(b"abc").as_bytes());
    let config = SearchConfig::new(Alphabet::from_chars("abc").unwrap(), 3, 2).unwrap();

    let err = Coordinator::from_hex(config, &sha1_hex, DigestAlgorithm::Sha256)
        .err()
        .expect("mismatched digest length must be rejected");
    assert!(matches!(err, SearchError::Config(_)));
}

#[test]
fn test_invalid_config_rejected() {
    assert!(SearchConfig::new(Alphabet::default(), 0, 1).is_err());
    assert!(SearchConfig::new(Alphabet::default(), 1, 0).is_err());
}

#[test]
fn test_reporter_does_not_change_result() {
    let target = TargetDigest::of(b"zz9", DigestAlgorithm::Sha256);
    let options = ReportOptions {
        interval: Duration::from_millis(5),
        console: false,
        log_file: None,
        profile: true,
    };
    let config = SearchConfig::new(Alphabet::from_chars("xyz89").unwrap(), 4, 3)
        .unwrap()
        .with_report(options);

    let report = Coordinator::new(config, target).run().unwrap();
    assert_eq!(report.result.candidate(), Some("zz9"));
}

#[test]
fn test_reported_rate_matches_interval_count() {
    let state = std::sync::Arc::new(SharedSearchState::new(TargetDigest::of(
        b"x",
        DigestAlgorithm::Md5,
    )));
    let options = ReportOptions {
        interval: Duration::from_millis(250),
        console: false,
        log_file: None,
        profile: false,
    };
    let reporter = RateReporter::new(state.clone(), options);

    for _ in 0..1_000 {
        state.record_hash();
    }
    let sample = reporter.sample();
    assert_eq!(sample.hashes, 1_000);
    assert!((sample.rate - 4_000.0).abs() < 1e-6);
    assert_eq!(state.pending_count(), 0);
    assert_eq!(state.total_hashes(), 1_000);
}
