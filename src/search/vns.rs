//! Variable neighborhood search over a fixed number of clusters.
//!
//! Starts from a construction (typically [`RelocationHeuristic`]), renumbers it
//! to clusters `0..k`, and repeats:
//!
//! 1. *shake*: every vertex whose cluster has more than one member moves, with
//!    probability `y`, to a uniformly drawn other cluster
//! 2. first-improvement relocation among the `k` clusters
//! 3. on a strictly better value record it and reset `y` to `y_min`,
//!    otherwise raise `y` by `y_step`, wrapping back to `y_min` past `y_max`
//!
//! Clusters never empty, so `k` stays fixed for the whole run.
//!
//! [`RelocationHeuristic`]: crate::RelocationHeuristic

use crate::construction::Construction;
use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::neighborhood::NeighborhoodIndex;
use crate::objective::{Frustration, ObjectiveFunction};
use crate::partition::{relabel_solution, CommunityId};
use crate::search::local_search::{relocate_within_clusters, MergeReport};
use crate::search::monitor::{NoOpMonitor, SearchCommand, SearchMonitor};
use crate::search::result::{IteratedGreedyOutcome, TerminationReason};
use crate::search::stats::SearchStatistics;
use rand::prelude::*;
use std::time::Instant;

/// Variable neighborhood search configuration.
#[derive(Debug, Clone)]
pub struct VariableNeighborhoodSearch {
    max_iter: u64,
    seed: Option<u64>,
    y_min: f64,
    y_max: f64,
    y_step: f64,
}

impl VariableNeighborhoodSearch {
    /// 200 iterations, unseeded, shaking probability 0.005 up to 0.2 in steps
    /// of 0.005.
    pub fn new() -> Self {
        Self {
            max_iter: 200,
            seed: None,
            y_min: 0.005,
            y_max: 0.2,
            y_step: 0.005,
        }
    }

    /// Number of shake/relocate iterations.
    pub fn with_max_iter(mut self, max_iter: u64) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seed the random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Shaking probability range and step.
    pub fn with_shaking(mut self, y_min: f64, y_max: f64, y_step: f64) -> Self {
        self.y_min = y_min;
        self.y_max = y_max;
        self.y_step = y_step;
        self
    }

    fn validate(&self) -> Result<()> {
        let in_unit = |y: f64| (0.0..=1.0).contains(&y);
        if !(in_unit(self.y_min) && in_unit(self.y_max) && self.y_min <= self.y_max) {
            return Err(Error::InvalidParameter {
                name: "shaking",
                message: "need 0 <= y_min <= y_max <= 1",
            });
        }
        if !(self.y_step > 0.0 && self.y_step.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "y_step",
                message: "must be positive",
            });
        }
        Ok(())
    }

    /// Run without a monitor.
    pub fn solve<C: Construction>(
        &self,
        neighborhood: &NeighborhoodIndex,
        construction: &C,
    ) -> Result<IteratedGreedyOutcome> {
        self.run(neighborhood, construction, &mut NoOpMonitor)
    }

    /// Run the search, reporting to `monitor`. Shaken vertices are reported
    /// through [`SearchMonitor::on_destruction`].
    pub fn run<C, M>(
        &self,
        neighborhood: &NeighborhoodIndex,
        construction: &C,
        monitor: &mut M,
    ) -> Result<IteratedGreedyOutcome>
    where
        C: Construction,
        M: SearchMonitor + ?Sized,
    {
        let n = neighborhood.node_count();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        self.validate()?;

        let start = Instant::now();
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut initial = construction.produce(neighborhood, &mut rng)?;
        let k = relabel_solution(&mut initial);
        let mut obj = Frustration::new(neighborhood, initial)?;
        let mut stats = SearchStatistics::default();
        tracing::debug!(construction = construction.name(), k, value = obj.value(), "vns start");

        let mut best_solution = obj.solution().to_vec();
        let mut best_value = obj.value();
        monitor.on_enter_search(best_value);

        let mut y = self.y_min;
        let mut termination = TerminationReason::IterationBudget;

        for iteration in 1..=self.max_iter {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                tracing::info!(%reason, iteration, "search aborted by monitor");
                termination = TerminationReason::Aborted(reason);
                break;
            }

            let shaken = shake(&mut obj, k, y, &mut rng);
            monitor.on_destruction(&shaken);

            let relocation = relocate_within_clusters(&mut obj, k);
            stats.on_local_search(&relocation, &MergeReport::default());
            stats.on_iteration();
            debug_assert!(crate::validate::validate_state(&obj).is_healthy());

            if obj.value() < best_value {
                best_value = obj.value();
                best_solution = obj.solution().to_vec();
                y = self.y_min;
                stats.on_improvement();
                monitor.on_improvement(best_value);
                tracing::info!(iteration, best = best_value, "new best partition");
            } else {
                y += self.y_step;
                if y > self.y_max {
                    y = self.y_min;
                }
            }
            tracing::debug!(iteration, value = obj.value(), best = best_value, y, "iteration");
            monitor.on_iteration(iteration, obj.value(), best_value);
        }

        stats.set_total_time(start.elapsed());
        monitor.on_exit_search(&stats);

        let best = Frustration::new(neighborhood, best_solution)?;
        tracing::info!(best = best_value, clusters = k, iterations = stats.iterations, "vns finished");
        let (solution, partition, value) = best.into_parts();
        Ok(IteratedGreedyOutcome::new(
            solution,
            partition,
            value,
            stats,
            termination,
        ))
    }
}

impl Default for VariableNeighborhoodSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Random moves among clusters `0..k`; returns the vertices moved.
fn shake<O, R>(obj: &mut O, k: usize, y: f64, rng: &mut R) -> Vec<NodeId>
where
    O: ObjectiveFunction + ?Sized,
    R: Rng + ?Sized,
{
    let mut moved = Vec::new();
    if k < 2 {
        return moved;
    }
    for v in 0..obj.node_count() {
        let h = obj.community_of(v);
        if obj.partition().members(h).map_or(0, |m| m.len()) <= 1 {
            continue;
        }
        if rng.random::<f64>() < y {
            // uniform over 0..k without h
            let mut c = rng.random_range(0..k - 1);
            if c >= h {
                c += 1;
            }
            let delta = obj.delta_move(v, c);
            obj.move_node(v, c, delta);
            moved.push(v);
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{RelocationHeuristic, Singletons};
    use crate::graph::{Sign, SignedGraph};
    use crate::search::monitor::TimeLimitMonitor;
    use std::time::Duration;

    /// Three positive triangles, negative between consecutive ones.
    fn triads() -> NeighborhoodIndex {
        let mut graph = SignedGraph::new(9).unwrap();
        for t in 0..3 {
            let b = 3 * t;
            for (u, v) in [(b, b + 1), (b + 1, b + 2), (b, b + 2)] {
                let _ = graph.add_edge(u, v, Sign::Positive).unwrap();
            }
        }
        for (u, v) in [(2, 3), (5, 6), (8, 0)] {
            let _ = graph.add_edge(u, v, Sign::Negative).unwrap();
        }
        NeighborhoodIndex::build(&graph)
    }

    #[test]
    fn test_finds_balanced_triads() {
        let nbr = triads();
        let outcome = VariableNeighborhoodSearch::new()
            .with_seed(8)
            .with_max_iter(50)
            .with_shaking(0.1, 0.5, 0.1)
            .solve(&nbr, &RelocationHeuristic::new(3).with_restarts(5))
            .unwrap();

        assert_eq!(outcome.value(), 0);
        assert_eq!(outcome.partition().len(), 3);
        assert_eq!(outcome.statistics().iterations, 50);
    }

    #[test]
    fn test_cluster_count_is_fixed() {
        let nbr = triads();
        let outcome = VariableNeighborhoodSearch::new()
            .with_seed(1)
            .with_max_iter(20)
            .with_shaking(0.5, 1.0, 0.25)
            .solve(&nbr, &RelocationHeuristic::new(4))
            .unwrap();

        assert_eq!(outcome.partition().len(), 4);
        assert!(outcome.solution().iter().all(|&c| c < 4));
        assert_eq!(
            Frustration::new(&nbr, outcome.solution().to_vec()).unwrap().value(),
            outcome.value()
        );
    }

    #[test]
    fn test_shake_never_empties_a_cluster() {
        let nbr = triads();
        let mut obj = Frustration::new(&nbr, vec![0, 0, 0, 1, 1, 1, 2, 2, 2]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let moved = shake(&mut obj, 3, 1.0, &mut rng);
        assert!(!moved.is_empty());
        assert_eq!(obj.partition().len(), 3);
        assert_eq!(obj.value(), obj.evaluate());
        for &v in &moved {
            assert!(obj.community_of(v) < 3);
        }
    }

    #[test]
    fn test_single_cluster_shake_is_noop() {
        let nbr = triads();
        let mut obj = Frustration::new(&nbr, vec![0; 9]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(shake(&mut obj, 1, 1.0, &mut rng).is_empty());
    }

    #[test]
    fn test_rejects_bad_shaking() {
        let nbr = triads();
        let bad = [(0.3, 0.2, 0.1), (-0.1, 0.2, 0.1), (0.1, 1.5, 0.1), (0.1, 0.2, 0.0)];
        for (y_min, y_max, y_step) in bad {
            let result = VariableNeighborhoodSearch::new()
                .with_shaking(y_min, y_max, y_step)
                .solve(&nbr, &Singletons);
            assert!(
                matches!(result, Err(Error::InvalidParameter { .. })),
                "({y_min}, {y_max}, {y_step})"
            );
        }
    }

    #[test]
    fn test_time_limit_returns_initial() {
        let nbr = triads();
        let outcome = VariableNeighborhoodSearch::new()
            .with_seed(0)
            .run(
                &nbr,
                &Singletons,
                &mut TimeLimitMonitor::new(Duration::ZERO),
            )
            .unwrap();

        assert!(matches!(outcome.termination_reason(), TerminationReason::Aborted(_)));
        // singletons on the triads: all 9 positive edges cross, 3 negatives fine
        assert_eq!(outcome.value(), 9);
    }
}
