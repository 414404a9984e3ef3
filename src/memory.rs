//! Process memory sampling for `--profile`.

/// Get current resident memory in MB.
#[cfg(target_os = "linux")]
pub fn process_memory_mb() -> Option<f64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let rss_kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(rss_kb as f64 / 1024.0)
}

/// Get current resident memory in MB.
#[cfg(target_os = "macos")]
pub fn process_memory_mb() -> Option<f64> {
    use std::process::Command;

    let output = Command::new("ps")
        .args(["-o", "rss=", "-p", &std::process::id().to_string()])
        .output()
        .ok()?;
    let rss_kb: u64 = String::from_utf8(output.stdout).ok()?.trim().parse().ok()?;
    Some(rss_kb as f64 / 1024.0)
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub fn process_memory_mb() -> Option<f64> {
    None
}

/// Tracks the peak of successive memory samples.
#[derive(Debug, Default)]
pub struct MemoryProfile {
    peak_mb: Option<f64>,
    samples: u64,
}

impl MemoryProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes one sample, returning it if the platform supports it.
    pub fn sample(&mut self) -> Option<f64> {
        let mb = process_memory_mb()?;
        self.record(mb);
        Some(mb)
    }

    fn record(&mut self, mb: f64) {
        self.samples += 1;
        self.peak_mb = Some(self.peak_mb.map_or(mb, |peak| peak.max(mb)));
    }

    pub fn peak_mb(&self) -> Option<f64> {
        self.peak_mb
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }
}
