use std::time::{Duration, Instant};

/// Fetch statistics for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct RunCounters {
    total_fetches: u64,
    successful_fetches: u64,
    started: Instant,
}

impl RunCounters {
    /// Starts counting from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_fetches: 0,
            successful_fetches: 0,
            started: Instant::now(),
        }
    }

    /// Counts a fetch attempt, whatever its outcome.
    pub fn record_attempt(&mut self) {
        self.total_fetches += 1;
    }

    /// Counts a fetch that produced a snapshot.
    pub fn record_success(&mut self) {
        self.successful_fetches += 1;
    }

    pub fn total_fetches(&self) -> u64 {
        self.total_fetches
    }

    pub fn successful_fetches(&self) -> u64 {
        self.successful_fetches
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// `successful / total`, or `None` before the first attempt.
    pub fn success_ratio(&self) -> Option<f64> {
        if self.total_fetches == 0 {
            None
        } else {
            Some(self.successful_fetches as f64 / self.total_fetches as f64)
        }
    }
}

impl Default for RunCounters {
    fn default() -> Self {
        Self::new()
    }
}
