//! Per-vertex positive / negative neighbor sets.
//!
//! Built once from a [`SignedGraph`] and read-only afterwards, so one index can be
//! shared by any number of independent searches on the same graph.
//!
//! Each side is stored as a sorted vector. Membership is a binary search and
//! intersections are linear merges, which is what the similarity measures used by
//! construction heuristics need.

use crate::graph::{NodeId, Sign, SignedGraph};
use crate::partition::CommunityId;
use std::collections::BTreeSet;
use std::ops::Index;

/// Positive and negative neighbors of one vertex.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NeighborSet {
    pos: Vec<NodeId>,
    neg: Vec<NodeId>,
}

impl NeighborSet {
    /// Positive neighbors, ascending.
    pub fn positive(&self) -> &[NodeId] {
        &self.pos
    }

    /// Negative neighbors, ascending.
    pub fn negative(&self) -> &[NodeId] {
        &self.neg
    }

    /// Total number of neighbors.
    pub fn degree(&self) -> usize {
        self.pos.len() + self.neg.len()
    }

    /// All neighbors: positive ones first, then negative ones.
    pub fn all(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.pos.iter().chain(self.neg.iter()).copied()
    }

    /// Whether `v` is a positive neighbor.
    pub fn contains_positive(&self, v: NodeId) -> bool {
        self.pos.binary_search(&v).is_ok()
    }

    /// Whether `v` is a negative neighbor.
    pub fn contains_negative(&self, v: NodeId) -> bool {
        self.neg.binary_search(&v).is_ok()
    }
}

/// Neighbor sets for every vertex of a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborhoodIndex {
    sets: Vec<NeighborSet>,
}

impl NeighborhoodIndex {
    /// Split every adjacency list into positive and negative neighbors.
    pub fn build(graph: &SignedGraph) -> Self {
        let sets = (0..graph.node_count())
            .map(|v| Self::split(graph, v))
            .collect();
        Self { sets }
    }

    /// Collects the minority sign explicitly and derives the majority side as
    /// adjacency minus minority.
    fn split(graph: &SignedGraph, v: NodeId) -> NeighborSet {
        let degree = graph.degree(v);
        let neg_count = graph.neighbors(v).filter(|(_, s)| !s.is_positive()).count();
        let pos_count = degree - neg_count;

        let (minority_sign, minority_count) = if pos_count > neg_count {
            (Sign::Negative, neg_count)
        } else {
            (Sign::Positive, pos_count)
        };

        let mut minority = Vec::with_capacity(minority_count);
        for (u, sign) in graph.neighbors(v) {
            if minority.len() == minority_count {
                break;
            }
            if sign == minority_sign {
                minority.push(u);
            }
        }

        let all: Vec<NodeId> = graph.neighbors(v).map(|(u, _)| u).collect();
        let majority = sorted_difference(&all, &minority);

        match minority_sign {
            Sign::Negative => NeighborSet {
                pos: majority,
                neg: minority,
            },
            Sign::Positive => NeighborSet {
                pos: minority,
                neg: majority,
            },
        }
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.sets.len()
    }

    /// Neighbor set of `v`.
    pub fn get(&self, v: NodeId) -> &NeighborSet {
        &self.sets[v]
    }

    /// Iterate over `(vertex, neighbor set)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NeighborSet)> + '_ {
        self.sets.iter().enumerate()
    }

    /// Positive neighbors of `v`.
    pub fn positive(&self, v: NodeId) -> &[NodeId] {
        self.sets[v].positive()
    }

    /// Negative neighbors of `v`.
    pub fn negative(&self, v: NodeId) -> &[NodeId] {
        self.sets[v].negative()
    }

    /// Total degree of `v`.
    pub fn degree(&self, v: NodeId) -> usize {
        self.sets[v].degree()
    }

    /// Positive degree of `v`.
    pub fn pos_degree(&self, v: NodeId) -> usize {
        self.sets[v].pos.len()
    }

    /// Negative degree of `v`.
    pub fn neg_degree(&self, v: NodeId) -> usize {
        self.sets[v].neg.len()
    }

    /// Distinct labels carried by `v`'s neighbors under `labels`, excluding `labels[v]`.
    pub fn adjacent_labels(&self, v: NodeId, labels: &[CommunityId]) -> BTreeSet<CommunityId> {
        let own = labels[v];
        self.sets[v]
            .all()
            .map(|u| labels[u])
            .filter(|&c| c != own)
            .collect()
    }

    /// Positive neighbors shared by `u` and `v`.
    pub fn common_positive(&self, u: NodeId, v: NodeId) -> Vec<NodeId> {
        sorted_intersection(&self.sets[u].pos, &self.sets[v].pos)
    }

    /// Shared positive neighbors plus shared negative neighbors.
    pub fn similarity(&self, u: NodeId, v: NodeId) -> usize {
        sorted_intersection_count(&self.sets[u].pos, &self.sets[v].pos)
            + sorted_intersection_count(&self.sets[u].neg, &self.sets[v].neg)
    }

    /// Vertices without positive neighbors.
    ///
    /// Returns `(alone, negative_only)`: vertices with no neighbors at all, and
    /// vertices whose every neighbor is negative.
    pub fn isolated_vertices(&self) -> (BTreeSet<NodeId>, BTreeSet<NodeId>) {
        let mut alone = BTreeSet::new();
        let mut negative_only = BTreeSet::new();
        for (v, set) in self.iter() {
            if !set.pos.is_empty() {
                continue;
            }
            if set.neg.is_empty() {
                let _ = alone.insert(v);
            } else {
                let _ = negative_only.insert(v);
            }
        }
        (alone, negative_only)
    }
}

impl Index<NodeId> for NeighborhoodIndex {
    type Output = NeighborSet;

    fn index(&self, v: NodeId) -> &NeighborSet {
        &self.sets[v]
    }
}

fn sorted_difference(a: &[NodeId], b: &[NodeId]) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(a.len().saturating_sub(b.len()));
    let mut j = 0;
    for &x in a {
        while j < b.len() && b[j] < x {
            j += 1;
        }
        if j < b.len() && b[j] == x {
            continue;
        }
        out.push(x);
    }
    out
}

fn sorted_intersection(a: &[NodeId], b: &[NodeId]) -> Vec<NodeId> {
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::new();
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

fn sorted_intersection_count(a: &[NodeId], b: &[NodeId]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> SignedGraph {
        // 0 has three positive neighbors and one negative one; 4 is mostly negative.
        SignedGraph::from_edges(
            6,
            [
                (0, 1, Sign::Positive),
                (0, 2, Sign::Positive),
                (0, 3, Sign::Positive),
                (0, 4, Sign::Negative),
                (4, 1, Sign::Negative),
                (4, 2, Sign::Negative),
                (4, 3, Sign::Positive),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_split_matches_naive_scan() {
        let graph = sample_graph();
        let index = NeighborhoodIndex::build(&graph);

        for v in 0..graph.node_count() {
            let naive_pos: Vec<_> = graph
                .neighbors(v)
                .filter(|(_, s)| s.is_positive())
                .map(|(u, _)| u)
                .collect();
            let naive_neg: Vec<_> = graph
                .neighbors(v)
                .filter(|(_, s)| !s.is_positive())
                .map(|(u, _)| u)
                .collect();
            assert_eq!(index.positive(v), naive_pos.as_slice(), "vertex {v}");
            assert_eq!(index.negative(v), naive_neg.as_slice(), "vertex {v}");
        }
    }

    #[test]
    fn test_degrees() {
        let index = NeighborhoodIndex::build(&sample_graph());
        assert_eq!(index.degree(0), 4);
        assert_eq!(index.pos_degree(0), 3);
        assert_eq!(index.neg_degree(4), 3);
        assert_eq!(index.degree(5), 0);
        assert!(index[0].contains_negative(4));
        assert!(!index[0].contains_positive(4));
    }

    #[test]
    fn test_adjacent_labels_excludes_own() {
        let index = NeighborhoodIndex::build(&sample_graph());
        let labels = vec![7, 7, 2, 3, 9, 5];

        let adjacent = index.adjacent_labels(0, &labels);
        assert_eq!(adjacent, BTreeSet::from([2, 3, 9]));
        assert!(index.adjacent_labels(5, &labels).is_empty());
    }

    #[test]
    fn test_similarity_and_common_positive() {
        let index = NeighborhoodIndex::build(&sample_graph());
        // 0 and 4 share positive neighbor 3; no shared negative neighbors.
        assert_eq!(index.common_positive(0, 4), vec![3]);
        assert_eq!(index.similarity(0, 4), 1);
        // 1 and 2: common positive neighbor 0, common negative neighbor 4.
        assert_eq!(index.similarity(1, 2), 2);
    }

    #[test]
    fn test_isolated_vertices() {
        let graph = SignedGraph::from_edges(4, [(0, 1, Sign::Negative), (2, 1, Sign::Positive)])
            .unwrap();
        let index = NeighborhoodIndex::build(&graph);

        let (alone, negative_only) = index.isolated_vertices();
        assert_eq!(alone, BTreeSet::from([3]));
        assert_eq!(negative_only, BTreeSet::from([0]));
    }

    #[test]
    fn test_sorted_set_helpers() {
        assert_eq!(sorted_difference(&[1, 2, 3, 5], &[2, 5]), vec![1, 3]);
        assert_eq!(sorted_intersection(&[1, 3, 4, 8], &[0, 3, 8, 9]), vec![3, 8]);
        assert_eq!(sorted_intersection_count(&[1, 2], &[3, 4]), 0);
    }
}
