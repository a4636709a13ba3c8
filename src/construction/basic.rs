use super::traits::Construction;
use crate::error::{Error, Result};
use crate::neighborhood::NeighborhoodIndex;
use crate::objective::Frustration;
use crate::partition::{relabel_solution, CommunityId};
use crate::search::{LocalSearch, NodeOrder};
use rand::Rng;

/// Every vertex in its own community.
#[derive(Debug, Clone, Copy, Default)]
pub struct Singletons;

impl Construction for Singletons {
    fn name(&self) -> &str {
        "singletons"
    }

    fn produce<R: Rng + ?Sized>(
        &self,
        neighborhood: &NeighborhoodIndex,
        _rng: &mut R,
    ) -> Result<Vec<CommunityId>> {
        if neighborhood.node_count() == 0 {
            return Err(Error::EmptyInput);
        }
        Ok((0..neighborhood.node_count()).collect())
    }
}

/// Singletons followed by one relocation run.
#[derive(Debug, Clone)]
pub struct GreedyMove {
    node_order: NodeOrder,
    max_sweeps: usize,
}

impl GreedyMove {
    /// Identity order, default sweep cap.
    pub fn new() -> Self {
        Self {
            node_order: NodeOrder::Identity,
            max_sweeps: LocalSearch::DEFAULT_MAX_SWEEPS,
        }
    }

    /// Set the vertex visiting order.
    pub fn with_node_order(mut self, node_order: NodeOrder) -> Self {
        self.node_order = node_order;
        self
    }

    /// Set the sweep cap.
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }
}

impl Default for GreedyMove {
    fn default() -> Self {
        Self::new()
    }
}

impl Construction for GreedyMove {
    fn name(&self) -> &str {
        "greedy-move"
    }

    fn produce<R: Rng + ?Sized>(
        &self,
        neighborhood: &NeighborhoodIndex,
        _rng: &mut R,
    ) -> Result<Vec<CommunityId>> {
        if neighborhood.node_count() == 0 {
            return Err(Error::EmptyInput);
        }
        if self.max_sweeps == 0 {
            return Err(Error::InvalidParameter {
                name: "max_sweeps",
                message: "must be at least 1",
            });
        }
        let ls = LocalSearch::new(neighborhood)
            .with_node_order(neighborhood, self.node_order)
            .with_max_sweeps(self.max_sweeps);
        let mut obj = Frustration::singletons(neighborhood);
        let _ = ls.local_move(&mut obj);

        let (mut solution, _, _) = obj.into_parts();
        let _ = relabel_solution(&mut solution);
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Sign, SignedGraph};
    use crate::objective::ObjectiveFunction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_singletons() {
        let graph = SignedGraph::new(3).unwrap();
        let nbr = NeighborhoodIndex::build(&graph);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(Singletons.produce(&nbr, &mut rng).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_greedy_move_joins_positive_pair() {
        let graph = SignedGraph::from_edges(
            4,
            [(0, 1, Sign::Positive), (2, 3, Sign::Negative)],
        )
        .unwrap();
        let nbr = NeighborhoodIndex::build(&graph);
        let mut rng = StdRng::seed_from_u64(0);

        let solution = GreedyMove::new().produce(&nbr, &mut rng).unwrap();
        assert_eq!(solution[0], solution[1]);
        assert_ne!(solution[2], solution[3]);
        assert_eq!(Frustration::new(&nbr, solution).unwrap().value(), 0);
    }

    #[test]
    fn test_greedy_move_rejects_zero_sweep_cap() {
        let graph = SignedGraph::new(2).unwrap();
        let nbr = NeighborhoodIndex::build(&graph);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            GreedyMove::new().with_max_sweeps(0).produce(&nbr, &mut rng),
            Err(Error::InvalidParameter { name: "max_sweeps", .. })
        ));
    }
}
