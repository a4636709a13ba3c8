//! Local search over two move classes.
//!
//! ## Node relocation
//!
//! Steepest-improvement coordinate descent: visit every vertex in a fixed order,
//! evaluate moving it into each community it has an edge into, and take the most
//! negative delta if there is one. Sweeps repeat until one applies no move, or
//! the sweep cap is hit.
//!
//! Ties between equally good destinations go to the smallest community id
//! (adjacent communities are visited in ascending order and only a strictly
//! better delta replaces the incumbent).
//!
//! When a run ends because a sweep applied no move, the partition is a 1-move
//! local optimum: no vertex can lower the objective by moving to an adjacent
//! community.
//!
//! ## Community merging
//!
//! One pass over a snapshot of the community ids. Each community that has not
//! been touched yet in this pass is merged with the adjacent, untouched
//! community giving the most negative merge delta, if any. Both ids are then
//! marked used, so each original community takes part in at most one merge per
//! pass. Callers alternate passes with relocation.

use crate::graph::NodeId;
use crate::neighborhood::NeighborhoodIndex;
use crate::objective::ObjectiveFunction;
use crate::partition::CommunityId;
use std::collections::HashSet;

/// Order in which relocation visits vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeOrder {
    /// `0, 1, …, n-1`.
    #[default]
    Identity,
    /// Descending total degree; ties by ascending vertex id.
    DegreeDescending,
}

/// Summary of one [`LocalSearch::local_move`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelocationReport {
    /// Sweeps performed.
    pub sweeps: usize,
    /// Node moves applied.
    pub moves: usize,
    /// Objective change over the run (never positive).
    pub delta: i64,
    /// Whether the last sweep applied no move (as opposed to hitting the cap).
    pub converged: bool,
}

/// Summary of one [`LocalSearch::community_merge`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeReport {
    /// Merges applied.
    pub merges: usize,
    /// Objective change over the pass (never positive).
    pub delta: i64,
}

/// Relocation and merge moves driven to local optimality.
#[derive(Debug, Clone)]
pub struct LocalSearch {
    order: Vec<NodeId>,
    node_order: NodeOrder,
    max_sweeps: usize,
}

impl LocalSearch {
    /// Default sweep cap for relocation.
    pub const DEFAULT_MAX_SWEEPS: usize = 100;

    /// Identity visiting order, default sweep cap.
    pub fn new(neighborhood: &NeighborhoodIndex) -> Self {
        Self {
            order: (0..neighborhood.node_count()).collect(),
            node_order: NodeOrder::Identity,
            max_sweeps: Self::DEFAULT_MAX_SWEEPS,
        }
    }

    /// Set the vertex visiting order.
    pub fn with_node_order(mut self, neighborhood: &NeighborhoodIndex, order: NodeOrder) -> Self {
        let mut nodes: Vec<NodeId> = (0..neighborhood.node_count()).collect();
        if order == NodeOrder::DegreeDescending {
            // stable: equal degrees keep ascending id order
            nodes.sort_by_key(|&v| std::cmp::Reverse(neighborhood.degree(v)));
        }
        self.order = nodes;
        self.node_order = order;
        self
    }

    /// Cap on relocation sweeps. A cap of 0 performs no relocation; the
    /// drivers reject it when a run starts.
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// Configured visiting order.
    pub fn node_order(&self) -> NodeOrder {
        self.node_order
    }

    /// Configured sweep cap.
    pub fn max_sweeps(&self) -> usize {
        self.max_sweeps
    }

    /// Vertices in visiting order.
    pub fn visiting_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Relocate vertices to adjacent communities until no move improves.
    ///
    /// # Panics
    ///
    /// Panics if `obj` covers more vertices than the index this search was
    /// built from.
    pub fn local_move<O: ObjectiveFunction + ?Sized>(&self, obj: &mut O) -> RelocationReport {
        assert_eq!(
            self.order.len(),
            obj.node_count(),
            "local search built for a different vertex count"
        );
        let start = obj.value();
        let mut report = RelocationReport::default();

        while report.sweeps < self.max_sweeps {
            report.sweeps += 1;
            let mut moved = 0usize;

            for &node in &self.order {
                if let Some((destination, delta)) = best_move(obj, node) {
                    obj.move_node(node, destination, delta);
                    moved += 1;
                }
            }

            tracing::trace!(sweep = report.sweeps, moves = moved, value = obj.value(), "relocation sweep");
            report.moves += moved;
            if moved == 0 {
                report.converged = true;
                break;
            }
        }

        if !report.converged {
            tracing::warn!(sweeps = report.sweeps, "relocation stopped at sweep cap");
        }
        report.delta = obj.value() - start;
        report
    }

    /// One merge pass over the communities present at the start of the call.
    pub fn community_merge<O: ObjectiveFunction + ?Sized>(&self, obj: &mut O) -> MergeReport {
        let start = obj.value();
        let snapshot: Vec<CommunityId> = obj.partition().ids().collect();
        let mut used: HashSet<CommunityId> = HashSet::new();
        let mut report = MergeReport::default();

        for c1 in snapshot {
            if used.contains(&c1) {
                continue;
            }

            let mut best: Option<(CommunityId, i64)> = None;
            for c2 in obj.adjacent_communities_of(c1) {
                if used.contains(&c2) {
                    continue;
                }
                let delta = obj.delta_merge(c1, c2);
                if delta < best.map_or(0, |(_, d)| d) {
                    best = Some((c2, delta));
                }
            }

            if let Some((c2, delta)) = best {
                obj.merge(c1, c2, delta);
                let _ = used.insert(c1);
                let _ = used.insert(c2);
                report.merges += 1;
            }
        }

        tracing::trace!(merges = report.merges, value = obj.value(), "merge pass");
        report.delta = obj.value() - start;
        report
    }

    /// Relocation to convergence followed by one merge pass.
    pub fn optimize<O: ObjectiveFunction + ?Sized>(&self, obj: &mut O) -> (RelocationReport, MergeReport) {
        let relocation = self.local_move(obj);
        let merge = self.community_merge(obj);
        (relocation, merge)
    }
}

/// Most improving adjacent destination for `node`, if any move improves.
fn best_move<O: ObjectiveFunction + ?Sized>(obj: &O, node: NodeId) -> Option<(CommunityId, i64)> {
    let mut best: Option<(CommunityId, i64)> = None;
    for c in obj.adjacent_communities(node) {
        let delta = obj.delta_move(node, c);
        if delta < best.map_or(0, |(_, d)| d) {
            best = Some((c, delta));
        }
    }
    best
}

/// First-improvement relocation over the fixed cluster ids `0..k`.
///
/// A vertex only leaves a cluster with more than one member, so no cluster
/// empties. Runs until a full pass finds no improving move.
pub(crate) fn relocate_within_clusters<O: ObjectiveFunction + ?Sized>(
    obj: &mut O,
    k: usize,
) -> RelocationReport {
    let start = obj.value();
    let mut report = RelocationReport::default();
    let mut improved = true;
    while improved {
        improved = false;
        report.sweeps += 1;
        for v in 0..obj.node_count() {
            let h = obj.community_of(v);
            if obj.partition().members(h).map_or(0, |m| m.len()) <= 1 {
                continue;
            }
            for c in (0..k).filter(|&c| c != h) {
                let delta = obj.delta_move(v, c);
                if delta < 0 {
                    obj.move_node(v, c, delta);
                    report.moves += 1;
                    improved = true;
                    break;
                }
            }
        }
    }
    report.converged = true;
    report.delta = obj.value() - start;
    report
}
