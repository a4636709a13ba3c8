//! # imbalance
//!
//! Frustration-index minimization for signed graphs: partition the vertices so
//! that as few edges as possible violate structural balance (positive edges
//! inside communities, negative edges between them).
//!
//! The pipeline:
//!
//! 1. load a [`SignedGraph`] ([`GraphReader`])
//! 2. build the read-only [`NeighborhoodIndex`]
//! 3. pick a [`Construction`] for the initial solution
//! 4. run [`IteratedGreedy`], which alternates [`LocalSearch`] with random
//!    destruction and reconstruction
//!
//! The partition state ([`Frustration`]) keeps the objective value up to date
//! through O(degree) move deltas and O(community volume) merge deltas.
//!
//! **Default build** includes the `petgraph` bridge. Enable `parallel` to run
//! independent seeded trials on rayon's pool.

pub mod construction;
/// Error types used across `imbalance`.
pub mod error;
pub mod graph;
pub mod loading;
pub mod neighborhood;
pub mod objective;
pub mod partition;
pub mod search;
pub mod validate;

pub use construction::{
    Construction, GreedyMove, RelocationHeuristic, SeedExpansion, SignedLabelPropagation,
    Singletons,
};
pub use error::{Error, Result};
pub use graph::{NodeId, Sign, SignedGraph};
pub use loading::{write_graph, GraphFormat, GraphReader};
pub use neighborhood::{NeighborSet, NeighborhoodIndex};
pub use objective::{Frustration, ObjectiveFunction};
pub use partition::{relabel_solution, CommunityId, Partition};
pub use search::monitor::{
    CompositeMonitor, InterruptMonitor, LogMonitor, NoOpMonitor, SearchCommand, SearchMonitor,
    TimeLimitMonitor,
};
pub use search::{
    IteratedGreedy, IteratedGreedyOutcome, LocalSearch, MergeReport, NodeOrder,
    ReconstructionPolicy, RelocationReport, SearchStatistics, TerminationReason,
    VariableNeighborhoodSearch,
};
pub use validate::{validate_state, Severity, ValidationIssue, ValidationReport};
