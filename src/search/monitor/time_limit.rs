use super::{SearchCommand, SearchMonitor};
use std::time::{Duration, Instant};

/// Wall-clock budget for a run.
///
/// The clock starts when the search is entered, so construction and the first
/// local search are not charged against the budget.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor {
    time_limit: Duration,
    start_time: Instant,
}

impl TimeLimitMonitor {
    /// Terminate once `time_limit` has elapsed since the search started.
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            start_time: Instant::now(),
        }
    }

    /// Configured budget.
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl SearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _initial_value: i64) {
        self.start_time = Instant::now();
    }

    fn search_command(&self) -> SearchCommand {
        if self.start_time.elapsed() >= self.time_limit {
            SearchCommand::Terminate("time limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}
