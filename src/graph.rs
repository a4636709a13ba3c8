//! Signed graphs.
//!
//! An undirected simple graph whose edges carry a sign, `+1` (friendly) or `-1`
//! (hostile). Vertices are the integers `0..n`.
//!
//! Each vertex keeps its adjacency in an ordered map, so neighbor iteration is in
//! ascending vertex order and every downstream computation is deterministic.
//! Redefining an existing edge replaces its sign (last write wins).

use crate::error::{Error, Result};
use core::fmt;
use core::str::FromStr;
use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "petgraph")]
use petgraph::graph::UnGraph;
#[cfg(feature = "petgraph")]
use petgraph::visit::EdgeRef;

/// Vertex identifier.
pub type NodeId = usize;

/// Edge label of a signed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// `+1`: both endpoints should share a community.
    Positive,
    /// `-1`: both endpoints should be separated.
    Negative,
}

impl Sign {
    /// Numeric value, `1` or `-1`.
    pub fn value(self) -> i64 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }

    /// Whether this is [`Sign::Positive`].
    pub fn is_positive(self) -> bool {
        matches!(self, Sign::Positive)
    }
}

impl TryFrom<i64> for Sign {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Sign::Positive),
            -1 => Ok(Sign::Negative),
            _ => Err(Error::InvalidParameter {
                name: "sign",
                message: "must be 1 or -1",
            }),
        }
    }
}

impl FromStr for Sign {
    type Err = Error;

    /// Accepts exactly the tokens `"1"` and `"-1"`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" => Ok(Sign::Positive),
            "-1" => Ok(Sign::Negative),
            other => Err(Error::Other(format!("invalid sign token '{other}'"))),
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Undirected signed graph on vertices `0..n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedGraph {
    adjacency: Vec<BTreeMap<NodeId, Sign>>,
    n_edges: usize,
}

impl SignedGraph {
    /// Create an edgeless graph with `n` vertices.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        Ok(Self {
            adjacency: vec![BTreeMap::new(); n],
            n_edges: 0,
        })
    }

    /// Build a graph from `(u, v, sign)` triples.
    pub fn from_edges<I>(n: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, Sign)>,
    {
        let mut graph = Self::new(n)?;
        for (u, v, sign) in edges {
            let _ = graph.add_edge(u, v, sign)?;
        }
        Ok(graph)
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.n_edges
    }

    /// Insert or overwrite the undirected edge `{u, v}`.
    ///
    /// Returns the sign the edge had before, if it already existed.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, sign: Sign) -> Result<Option<Sign>> {
        let n = self.node_count();
        for vertex in [u, v] {
            if vertex >= n {
                return Err(Error::VertexOutOfRange { vertex, n });
            }
        }
        if u == v {
            return Err(Error::SelfLoop { vertex: u });
        }

        let previous = self.adjacency[u].insert(v, sign);
        let _ = self.adjacency[v].insert(u, sign);
        if previous.is_none() {
            self.n_edges += 1;
        }
        Ok(previous)
    }

    /// Sign of the edge `{u, v}`, if present.
    pub fn sign(&self, u: NodeId, v: NodeId) -> Option<Sign> {
        self.adjacency.get(u).and_then(|adj| adj.get(&v)).copied()
    }

    /// Neighbors of `v` with edge signs, ascending by neighbor id.
    pub fn neighbors(&self, v: NodeId) -> impl Iterator<Item = (NodeId, Sign)> + '_ {
        self.adjacency[v].iter().map(|(&u, &s)| (u, s))
    }

    /// Number of neighbors of `v`.
    pub fn degree(&self, v: NodeId) -> usize {
        self.adjacency[v].len()
    }

    /// Every undirected edge once, as `(u, v, sign)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, Sign)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, adj)| {
            adj.range(u + 1..).map(move |(&v, &sign)| (u, v, sign))
        })
    }

    /// Copy of this graph with every edge incident to `vertices` removed.
    ///
    /// Vertex ids are preserved; the removed vertices become isolated.
    pub fn without_edges_of(&self, vertices: &BTreeSet<NodeId>) -> SignedGraph {
        let mut pruned = SignedGraph {
            adjacency: vec![BTreeMap::new(); self.node_count()],
            n_edges: 0,
        };
        for (u, v, sign) in self.edges() {
            if vertices.contains(&u) || vertices.contains(&v) {
                continue;
            }
            let _ = pruned.adjacency[u].insert(v, sign);
            let _ = pruned.adjacency[v].insert(u, sign);
            pruned.n_edges += 1;
        }
        pruned
    }

    /// Convert a petgraph graph whose edge weights are signs.
    ///
    /// Parallel edges collapse to the last one visited.
    #[cfg(feature = "petgraph")]
    pub fn from_petgraph<N>(graph: &UnGraph<N, Sign>) -> Result<Self> {
        let mut signed = Self::new(graph.node_count())?;
        for edge in graph.edge_references() {
            let _ = signed.add_edge(edge.source().index(), edge.target().index(), *edge.weight())?;
        }
        Ok(signed)
    }

    /// Convert into a petgraph graph; node `i` keeps index `i`.
    #[cfg(feature = "petgraph")]
    pub fn to_petgraph(&self) -> UnGraph<(), Sign> {
        let mut graph = UnGraph::with_capacity(self.node_count(), self.edge_count());
        let nodes: Vec<_> = (0..self.node_count()).map(|_| graph.add_node(())).collect();
        for (u, v, sign) in self.edges() {
            let _ = graph.add_edge(nodes[u], nodes[v], sign);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_parsing() {
        assert_eq!("1".parse::<Sign>().unwrap(), Sign::Positive);
        assert_eq!("-1".parse::<Sign>().unwrap(), Sign::Negative);
        assert!("+1".parse::<Sign>().is_err());
        assert!("0".parse::<Sign>().is_err());
        assert_eq!(Sign::try_from(-1).unwrap(), Sign::Negative);
        assert!(Sign::try_from(2).is_err());
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut graph = SignedGraph::new(3).unwrap();
        assert_eq!(graph.add_edge(0, 2, Sign::Negative).unwrap(), None);

        assert_eq!(graph.sign(0, 2), Some(Sign::Negative));
        assert_eq!(graph.sign(2, 0), Some(Sign::Negative));
        assert_eq!(graph.sign(0, 1), None);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_edge_last_write_wins() {
        let mut graph = SignedGraph::new(2).unwrap();
        let _ = graph.add_edge(0, 1, Sign::Positive).unwrap();
        let previous = graph.add_edge(1, 0, Sign::Negative).unwrap();

        assert_eq!(previous, Some(Sign::Positive));
        assert_eq!(graph.sign(0, 1), Some(Sign::Negative));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_rejects_bad_edges() {
        let mut graph = SignedGraph::new(2).unwrap();
        assert_eq!(
            graph.add_edge(0, 5, Sign::Positive),
            Err(Error::VertexOutOfRange { vertex: 5, n: 2 })
        );
        assert_eq!(
            graph.add_edge(1, 1, Sign::Positive),
            Err(Error::SelfLoop { vertex: 1 })
        );
        assert_eq!(SignedGraph::new(0), Err(Error::EmptyInput));
    }

    #[test]
    fn test_edges_listed_once() {
        let graph = SignedGraph::from_edges(
            4,
            [
                (2, 3, Sign::Negative),
                (0, 1, Sign::Positive),
                (1, 2, Sign::Positive),
            ],
        )
        .unwrap();

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(
            edges,
            vec![
                (0, 1, Sign::Positive),
                (1, 2, Sign::Positive),
                (2, 3, Sign::Negative)
            ]
        );
        assert_eq!(graph.degree(1), 2);
    }

    #[test]
    fn test_without_edges_of() {
        let graph = SignedGraph::from_edges(
            4,
            [
                (0, 1, Sign::Positive),
                (1, 2, Sign::Negative),
                (2, 3, Sign::Positive),
            ],
        )
        .unwrap();

        let pruned = graph.without_edges_of(&BTreeSet::from([2]));
        assert_eq!(pruned.node_count(), 4);
        assert_eq!(pruned.edge_count(), 1);
        assert_eq!(pruned.sign(0, 1), Some(Sign::Positive));
        assert_eq!(pruned.degree(2), 0);
    }

    #[cfg(feature = "petgraph")]
    #[test]
    fn test_petgraph_round_trip_preserves_signs() {
        let mut graph = UnGraph::<(), Sign>::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        let _ = graph.add_edge(a, b, Sign::Positive);
        let _ = graph.add_edge(b, c, Sign::Negative);

        let signed = SignedGraph::from_petgraph(&graph).unwrap();
        assert_eq!(signed.sign(0, 1), Some(Sign::Positive));
        assert_eq!(signed.sign(2, 1), Some(Sign::Negative));

        let back = signed.to_petgraph();
        assert_eq!(back.node_count(), 3);
        assert_eq!(back.edge_count(), 2);
    }
}
