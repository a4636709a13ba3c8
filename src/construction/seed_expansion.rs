//! Seed expansion.
//!
//! A vertex is a *local degree center* when its total degree is strictly
//! greater than that of every positive neighbor (it needs at least one). Each
//! center is bound to its highest-degree positive neighbor and, if the two
//! share positive neighbors, to the highest-degree one of those. The members
//! of a seed share a community.
//!
//! Every remaining vertex, in ascending order, then joins the seed community
//! with the smallest move delta, even if that delta is positive.

use super::traits::Construction;
use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::neighborhood::NeighborhoodIndex;
use crate::objective::{Frustration, ObjectiveFunction};
use crate::partition::CommunityId;
use rand::Rng;
use std::collections::BTreeSet;

/// Seed detection by local degree centrality plus greedy attachment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedExpansion;

impl SeedExpansion {
    /// Create a new seed expansion construction.
    pub fn new() -> Self {
        Self
    }

    /// Seeds of two or three vertices, in ascending order of their center.
    pub fn seeds(&self, neighborhood: &NeighborhoodIndex) -> Vec<Vec<NodeId>> {
        let mut seeds = Vec::new();
        for v in 0..neighborhood.node_count() {
            let Some(partner) = highest_degree(neighborhood, neighborhood.positive(v).iter().copied())
            else {
                continue;
            };
            if neighborhood.degree(v) <= neighborhood.degree(partner) {
                continue;
            }
            let common = neighborhood.common_positive(v, partner);
            match highest_degree(neighborhood, common.into_iter()) {
                Some(third) => seeds.push(vec![v, partner, third]),
                None => seeds.push(vec![v, partner]),
            }
        }
        seeds
    }
}

/// First vertex of maximum total degree.
fn highest_degree<I>(neighborhood: &NeighborhoodIndex, vertices: I) -> Option<NodeId>
where
    I: Iterator<Item = NodeId>,
{
    let mut best: Option<(NodeId, usize)> = None;
    for u in vertices {
        let d = neighborhood.degree(u);
        if best.map_or(true, |(_, bd)| d > bd) {
            best = Some((u, d));
        }
    }
    best.map(|(u, _)| u)
}

impl Construction for SeedExpansion {
    fn name(&self) -> &str {
        "seed-expansion"
    }

    fn produce<R: Rng + ?Sized>(
        &self,
        neighborhood: &NeighborhoodIndex,
        _rng: &mut R,
    ) -> Result<Vec<CommunityId>> {
        let n = neighborhood.node_count();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let seeds = self.seeds(neighborhood);
        if seeds.is_empty() {
            tracing::warn!("no seeds found, falling back to singletons");
            return Ok((0..n).collect());
        }
        tracing::debug!(seeds = seeds.len(), "seed expansion");

        // Overlapping seeds chain: a later seed pulls shared members along.
        let mut solution: Vec<CommunityId> = (0..n).collect();
        for seed in &seeds {
            let c = solution[seed[0]];
            for &other in &seed[1..] {
                solution[other] = c;
            }
        }

        let seeded: BTreeSet<NodeId> = seeds.iter().flatten().copied().collect();
        let candidates: BTreeSet<CommunityId> = seeded.iter().map(|&v| solution[v]).collect();

        let mut obj = Frustration::new(neighborhood, solution)?;
        for node in (0..n).filter(|v| !seeded.contains(v)) {
            let mut best: Option<(CommunityId, i64)> = None;
            for &c in &candidates {
                let delta = obj.delta_move(node, c);
                if best.map_or(true, |(_, d)| delta < d) {
                    best = Some((c, delta));
                }
            }
            if let Some((c, delta)) = best {
                obj.move_node(node, c, delta);
            }
        }

        let (solution, _, _) = obj.into_parts();
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::graph::{Sign, SignedGraph};

    /// Positive star around 0 with leaves 1..=3, 1-2 positive, 4 hanging off 3
    /// by a negative edge.
    fn star() -> NeighborhoodIndex {
        let graph = SignedGraph::from_edges(
            5,
            [
                (0, 1, Sign::Positive),
                (0, 2, Sign::Positive),
                (0, 3, Sign::Positive),
                (1, 2, Sign::Positive),
                (3, 4, Sign::Negative),
            ],
        )
        .unwrap();
        NeighborhoodIndex::build(&graph)
    }

    #[test]
    fn test_seeds() {
        let nbr = star();
        // deg: 0→3, 1→2, 2→2, 3→2, 4→1. Partner of 0 is 1 (first max),
        // common positive neighbor of 0 and 1 is 2.
        assert_eq!(SeedExpansion::new().seeds(&nbr), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_expansion_places_every_vertex_in_a_seed_community() {
        let nbr = star();
        let mut rng = StdRng::seed_from_u64(0);
        let solution = SeedExpansion::new().produce(&nbr, &mut rng).unwrap();

        assert_eq!(solution, vec![0, 0, 0, 0, 0]);
        // the negative edge 3-4 is now internal
        assert_eq!(Frustration::new(&nbr, solution).unwrap().value(), 1);
    }

    #[test]
    fn test_no_seeds_falls_back_to_singletons() {
        let graph = SignedGraph::from_edges(3, [(0, 1, Sign::Negative)]).unwrap();
        let nbr = NeighborhoodIndex::build(&graph);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(SeedExpansion::new().seeds(&nbr).is_empty());
        assert_eq!(SeedExpansion::new().produce(&nbr, &mut rng).unwrap(), vec![0, 1, 2]);
    }
}
