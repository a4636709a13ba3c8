use super::SearchMonitor;
use crate::search::stats::SearchStatistics;
use std::time::{Duration, Instant};

/// Emits progress through `tracing` at most once per `log_interval`, plus a
/// line for every improvement.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    best: Option<i64>,
}

impl LogMonitor {
    /// Log at most once per `log_interval`.
    pub fn new(log_interval: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            best: None,
        }
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl SearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, initial_value: i64) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best = Some(initial_value);
        tracing::info!(value = initial_value, "search started");
    }

    fn on_iteration(&mut self, iteration: u64, value: i64, best: i64) {
        if self.last_log_time.elapsed() >= self.log_interval {
            tracing::info!(
                iteration,
                value,
                best,
                elapsed_s = self.start_time.elapsed().as_secs_f64(),
                "progress"
            );
            self.last_log_time = Instant::now();
        }
    }

    fn on_improvement(&mut self, best: i64) {
        let previous = self.best.replace(best);
        tracing::info!(best, previous, "new best partition");
    }

    fn on_exit_search(&mut self, stats: &SearchStatistics) {
        tracing::info!(best = self.best, iterations = stats.iterations, "search finished");
    }
}
