//! Objective functions over community partitions.
//!
//! An objective owns the partition state of one search: the solution
//! (vertex → community), the partition (community → members) and the current
//! objective value. It is the only thing allowed to mutate that state, and it
//! does so through two primitives, node moves and community merges.
//!
//! Every mutation is split into a pure *delta* query and an *apply* step that
//! trusts the caller's delta:
//!
//! ```text
//! let d = obj.delta_move(v, c);   // O(degree(v)), no side effects
//! if d < 0 { obj.move_node(v, c, d); }
//! ```
//!
//! Passing a stale delta silently corrupts the stored value. That is a caller
//! bug; it is caught by comparing [`ObjectiveFunction::value`] against
//! [`ObjectiveFunction::evaluate`] (see [`crate::validate`]), never checked on the
//! hot path.

mod frustration;

pub use frustration::Frustration;

use crate::error::Result;
use crate::graph::NodeId;
use crate::partition::{CommunityId, Partition};
use std::collections::BTreeSet;

/// Incrementally maintained objective to be minimized.
pub trait ObjectiveFunction {
    /// Number of vertices.
    fn node_count(&self) -> usize;

    /// Current objective value, maintained incrementally.
    fn value(&self) -> i64;

    /// Community id of every vertex.
    fn solution(&self) -> &[CommunityId];

    /// Member sets of the current communities.
    fn partition(&self) -> &Partition;

    /// Community of `node`.
    fn community_of(&self, node: NodeId) -> CommunityId {
        self.solution()[node]
    }

    /// Objective value recomputed from scratch.
    fn evaluate(&self) -> i64;

    /// Change in objective if `node` moved to `destination`. Zero when
    /// `destination` is already its community.
    fn delta_move(&self, node: NodeId, destination: CommunityId) -> i64;

    /// Move `node` to `destination` and add `delta` to the value.
    fn move_node(&mut self, node: NodeId, destination: CommunityId, delta: i64);

    /// Change in objective if `c2` were merged into `c1`. Zero when `c1 == c2`.
    fn delta_merge(&self, c1: CommunityId, c2: CommunityId) -> i64;

    /// Merge `c2` into `c1` (`c2` disappears) and add `delta` to the value.
    fn merge(&mut self, c1: CommunityId, c2: CommunityId, delta: i64);

    /// Communities other than its own that `node` has an edge into.
    fn adjacent_communities(&self, node: NodeId) -> BTreeSet<CommunityId>;

    /// Communities other than `community` that any member has an edge into.
    fn adjacent_communities_of(&self, community: CommunityId) -> BTreeSet<CommunityId>;

    /// Replace the whole solution, rebuilding the partition and value from scratch.
    fn reset(&mut self, solution: Vec<CommunityId>) -> Result<()>;
}
