//! Periodic hash-rate reporting.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::config::ReportOptions;
use crate::memory::MemoryProfile;

use super::SharedSearchState;

/// One reading of the hash counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSample {
    /// Hashes counted during the interval
    pub hashes: u64,
    /// Hashes per second over the interval
    pub rate: f64,
}

/// Samples the shared hash counter and reports throughput.
///
/// Purely observational: it only reads and resets the counter, so disabling
/// it never changes the search result.
pub struct RateReporter {
    state: Arc<SharedSearchState>,
    options: ReportOptions,
    log: Option<RateLog>,
    profile: Option<MemoryProfile>,
}

impl RateReporter {
    /// Creates a reporter. A rate log that cannot be created is reported and skipped.
    pub fn new(state: Arc<SharedSearchState>, options: ReportOptions) -> Self {
        let rate_log = options
            .log_file
            .as_deref()
            .and_then(|path| match RateLog::create(path) {
                Ok(rate_log) => Some(rate_log),
                Err(e) => {
                    log::warn!("{}; continuing without rate log", e);
                    None
                }
            });
        let profile = options.profile.then(MemoryProfile::new);

        Self {
            state,
            options,
            log: rate_log,
            profile,
        }
    }

    /// Takes and resets the interval count and converts it to a rate.
    pub fn sample(&self) -> RateSample {
        let hashes = self.state.take_interval_count();
        let secs = self.options.interval.as_secs_f64();
        RateSample {
            hashes,
            rate: hashes as f64 / secs,
        }
    }

    /// Reports every interval until the termination flag is set or
    /// `shutdown` is closed. Returns the peak memory when profiling.
    pub fn run(mut self, shutdown: Receiver<()>) -> Option<f64> {
        loop {
            if self.state.is_terminated() {
                break;
            }

            match shutdown.recv_timeout(self.options.interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }

            let sample = self.sample();
            self.emit(sample);
        }

        if self.options.console {
            println!();
        }

        self.profile.as_ref().and_then(MemoryProfile::peak_mb)
    }

    fn emit(&mut self, sample: RateSample) {
        if self.options.console {
            print!("\r Working...\t({}/s)", format_rate(sample.rate));
            let _ = io::stdout().flush();
        }

        if let Some(ref mut rate_log) = self.log {
            if let Err(e) = rate_log.append(sample.rate) {
                log::warn!("{}; disabling rate log", e);
                self.log = None;
            }
        }

        if let Some(ref mut profile) = self.profile {
            if let Some(mb) = profile.sample() {
                log::info!("resident memory: {:.1} MB", mb);
            }
        }
    }

    /// The configured sampling interval.
    pub fn interval(&self) -> Duration {
        self.options.interval
    }
}

/// Scales a rate to a plain, `K` or `M` figure, e.g. `"  1.50MHsh"`.
pub fn format_rate(rate: f64) -> String {
    let (value, unit) = if rate > 1_000_000.0 {
        (rate / 1_000_000.0, "M")
    } else if rate > 1_000.0 {
        (rate / 1_000.0, "K")
    } else {
        (rate, "")
    };
    format!("{:6.2}{}Hsh", value, unit)
}

/// Plain-text log of raw hash rates, one line per interval.
struct RateLog {
    path: PathBuf,
    file: File,
}

impl RateLog {
    fn create(path: &Path) -> Result<Self, RateLogError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| RateLogError::Create {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    fn append(&mut self, rate: f64) -> Result<(), RateLogError> {
        writeln!(self.file, "{:6.2}", rate).map_err(|source| RateLogError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RateLogError {
    #[error("Cannot create rate log {}: {}", path.display(), source)]
    Create { path: PathBuf, source: io::Error },

    #[error("Cannot write rate log {}: {}", path.display(), source)]
    Write { path: PathBuf, source: io::Error },
}
