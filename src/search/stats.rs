//! Counters collected over one iterated greedy run.
//!
//! Updates use saturating arithmetic so the counters can be bumped from inner
//! loops without overflow checks.

use crate::search::local_search::{MergeReport, RelocationReport};
use std::time::Duration;

/// Aggregate metrics of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchStatistics {
    /// Destroy/reconstruct/optimize iterations completed.
    pub iterations: u64,

    /// Iterations that produced a strictly better partition.
    pub improvements: u64,

    /// Relocation sweeps across all local searches.
    pub sweeps: u64,

    /// Node moves applied across all local searches.
    pub moves: u64,

    /// Community merges applied across all merge passes.
    pub merges: u64,

    /// Wall-clock time of the run.
    pub time_total: Duration,
}

impl SearchStatistics {
    /// Called after every iteration.
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    /// Called when the best partition improves.
    #[inline]
    pub fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add(1);
    }

    /// Fold in the reports of one optimize call.
    #[inline]
    pub fn on_local_search(&mut self, relocation: &RelocationReport, merge: &MergeReport) {
        self.sweeps = self.sweeps.saturating_add(relocation.sweeps as u64);
        self.moves = self.moves.saturating_add(relocation.moves as u64);
        self.merges = self.merges.saturating_add(merge.merges as u64);
    }

    /// Record the total elapsed time.
    #[inline]
    pub fn set_total_time(&mut self, time_total: Duration) {
        self.time_total = time_total;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Iterations:   {}", self.iterations)?;
        writeln!(f, "  Improvements: {}", self.improvements)?;
        writeln!(f, "  Sweeps:       {}", self.sweeps)?;
        writeln!(f, "  Node moves:   {}", self.moves)?;
        writeln!(f, "  Merges:       {}", self.merges)?;
        write!(f, "  Total time:   {:.3}s", self.time_total.as_secs_f64())
    }
}
