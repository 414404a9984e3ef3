//! Hash Breaker CLI
//!
//! Usage:
//!   hash_breaker <hex-digest>                      # SHA-256, up to 4 chars
//!   hash_breaker -e md5 -l 5 <hex-digest>          # MD5, up to 5 chars
//!   hash_breaker -w 16 -c abc123 --log <hex-digest>

use std::process;
use std::sync::Arc;

use hash_breaker::{Config, Coordinator, SearchReport, SearchResult, SharedSearchState};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_args();

    // Validate configuration and decode the target before any thread starts
    let search_config = match config.search_config() {
        Ok(search_config) => search_config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let target = match config.target_digest() {
        Ok(target) => target,
        Err(e) => {
            eprintln!("Input error: {}", e);
            process::exit(1);
        }
    };

    let alphabet = search_config.alphabet();
    let space = alphabet
        .space_size(search_config.max_length())
        .map_or_else(|| "overflow".to_string(), format_number);

    // Print startup info
    println!("Hash Breaker");
    println!("============");
    println!("Algorithm:  {}", target.algorithm());
    println!("Target:     {}", target);
    println!("Alphabet:   {}", alphabet);
    println!("Max length: {}", search_config.max_length());
    println!("Candidates: {}", space);
    println!(
        "Difficulty: {}",
        alphabet.difficulty_description(search_config.max_length())
    );
    println!(
        "Workers:    {} ({} CPUs available)",
        search_config.workers(),
        num_cpus::get()
    );
    if let Some(path) = search_config.report().and_then(|r| r.log_file.as_ref()) {
        println!("Rate log:   {}", path.display());
    }
    println!();

    let coordinator = Coordinator::new(search_config, target);
    ctrlc_handler(coordinator.state_handle());

    println!("Searching... (Press Ctrl+C to stop)\n");

    let report = match coordinator.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Search failed: {}", e);
            process::exit(1);
        }
    };

    match report.result {
        SearchResult::Found(ref found) => {
            println!("✅ Found match: {}", found.candidate);
            println!("Worker:       {}", found.worker_id);
        }
        SearchResult::NotFound => {
            println!(
                "❌ No match found, try increasing the length of the string to check (use -l flag)"
            );
        }
        SearchResult::Cancelled => {
            println!("Stopped by user.");
        }
    }

    print_stats(&report);

    if report.result == SearchResult::Cancelled {
        process::exit(130);
    }
}

fn print_stats(report: &SearchReport) {
    println!("\n--- Final Statistics ---");
    println!("Total hashes:  {}", format_number(report.total_hashes as u128));
    println!("Time elapsed:  {:.2}s", report.elapsed.as_secs_f64());
    println!(
        "Average speed: {}/s",
        format_number(report.hashes_per_second() as u128)
    );
    if let Some(mb) = report.peak_memory_mb {
        println!("Peak memory:   {:.1} MB", mb);
    }
}

fn format_number(n: u128) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn ctrlc_handler(state: Arc<SharedSearchState>) {
    if let Err(e) = ctrlc::set_handler(move || state.cancel()) {
        log::warn!("Error setting Ctrl-C handler: {}", e);
    }
}
