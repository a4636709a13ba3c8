//! Outcome of a search run.

use crate::partition::{CommunityId, Partition};
use crate::search::stats::SearchStatistics;

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The configured number of iterations was completed.
    IterationBudget,

    /// A monitor asked to stop. Carries the monitor's reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::IterationBudget => write!(f, "Iteration budget exhausted"),
            TerminationReason::Aborted(msg) => write!(f, "Aborted: {}", msg),
        }
    }
}

/// Best partition found by a run, with its statistics. Returned by both
/// iterated greedy and variable neighborhood search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IteratedGreedyOutcome {
    solution: Vec<CommunityId>,
    partition: Partition,
    value: i64,
    statistics: SearchStatistics,
    termination_reason: TerminationReason,
}

impl IteratedGreedyOutcome {
    pub(crate) fn new(
        solution: Vec<CommunityId>,
        partition: Partition,
        value: i64,
        statistics: SearchStatistics,
        termination_reason: TerminationReason,
    ) -> Self {
        Self {
            solution,
            partition,
            value,
            statistics,
            termination_reason,
        }
    }

    /// Community of every vertex in the best partition.
    pub fn solution(&self) -> &[CommunityId] {
        &self.solution
    }

    /// Member sets of the best partition.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Frustration index of the best partition.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Run statistics.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Why the run stopped.
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Consume into the best solution.
    pub fn into_solution(self) -> Vec<CommunityId> {
        self.solution
    }
}

impl std::fmt::Display for IteratedGreedyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Outcome:")?;
        writeln!(f, "  Termination: {}", self.termination_reason)?;
        writeln!(f, "  Frustration: {}", self.value)?;
        writeln!(f, "  Communities: {}", self.partition.len())?;
        write!(f, "{}", self.statistics)
    }
}
