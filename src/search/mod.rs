//! Search over partitions.
//!
//! Two layers:
//!
//! - [`LocalSearch`]: node relocation and community merging driven to a local
//!   optimum of an [`ObjectiveFunction`](crate::ObjectiveFunction).
//! - [`IteratedGreedy`]: destroy/reconstruct perturbation around the local
//!   search, keeping the best partition seen.
//! - [`VariableNeighborhoodSearch`]: random shaking plus relocation over a
//!   fixed number of clusters.
//!
//! ```rust
//! use imbalance::{IteratedGreedy, NeighborhoodIndex, Sign, SignedGraph, Singletons};
//!
//! let graph = SignedGraph::from_edges(
//!     4,
//!     [(0, 1, Sign::Negative), (2, 3, Sign::Negative)],
//! )
//! .unwrap();
//! let nbr = NeighborhoodIndex::build(&graph);
//!
//! let outcome = IteratedGreedy::new()
//!     .with_seed(7)
//!     .with_max_iter(20)
//!     .solve(&nbr, &Singletons)
//!     .unwrap();
//! assert_eq!(outcome.value(), 0);
//! ```

mod iterated_greedy;
mod local_search;
pub mod monitor;
mod result;
mod stats;
mod vns;

pub use iterated_greedy::{IteratedGreedy, ReconstructionPolicy};
pub use local_search::{LocalSearch, MergeReport, NodeOrder, RelocationReport};
pub(crate) use local_search::relocate_within_clusters;
pub use result::{IteratedGreedyOutcome, TerminationReason};
pub use stats::SearchStatistics;
pub use vns::VariableNeighborhoodSearch;
