//! Search monitors.
//!
//! Observers and controllers for the iterated greedy lifecycle. Monitors can log
//! progress, record what the search did, and request termination.
//!
//! The driver polls [`SearchMonitor::search_command`] only at iteration
//! boundaries, never inside a local-search sweep, so a stop request always
//! leaves the best recorded partition at a local optimum.
//!
//! - [`NoOpMonitor`]: does nothing.
//! - [`InterruptMonitor`]: stops when an `AtomicBool` is raised.
//! - [`TimeLimitMonitor`]: wall-clock budget.
//! - [`LogMonitor`]: periodic progress through `tracing`.
//! - [`CompositeMonitor`]: fan-out to several monitors.

mod composite;
mod interrupt;
mod log;
mod time_limit;

pub use composite::CompositeMonitor;
pub use interrupt::InterruptMonitor;
pub use log::LogMonitor;
pub use time_limit::TimeLimitMonitor;

use crate::graph::NodeId;
use crate::search::stats::SearchStatistics;

/// Instruction returned by a monitor.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    /// Keep going.
    #[default]
    Continue,
    /// Stop after the current iteration, with a reason.
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Hooks called by [`crate::IteratedGreedy`] during a run.
pub trait SearchMonitor {
    /// Short name for diagnostics.
    fn name(&self) -> &str;

    /// Called once the initial solution has been optimized.
    fn on_enter_search(&mut self, _initial_value: i64) {}

    /// Called with the vertices sampled for destruction, in sampling order.
    fn on_destruction(&mut self, _sampled: &[NodeId]) {}

    /// Called after every destroy/reconstruct/optimize iteration.
    fn on_iteration(&mut self, _iteration: u64, _value: i64, _best: i64) {}

    /// Called when a strictly better partition is recorded.
    fn on_improvement(&mut self, _best: i64) {}

    /// Called once when the run ends.
    fn on_exit_search(&mut self, _stats: &SearchStatistics) {}

    /// Polled at iteration boundaries.
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl std::fmt::Debug for dyn SearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

/// A monitor that observes nothing and never stops the search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl NoOpMonitor {
    /// Create a new no-op monitor.
    pub fn new() -> Self {
        Self
    }
}

impl SearchMonitor for NoOpMonitor {
    fn name(&self) -> &str {
        "NoOpMonitor"
    }
}
