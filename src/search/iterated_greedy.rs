//! Iterated greedy driver.
//!
//! Escapes the local optima of [`LocalSearch`] by repeatedly destroying part of
//! the current partition and rebuilding it:
//!
//! 1. construct an initial solution and optimize it
//! 2. record it as the best so far
//! 3. sample `⌊β·n⌋` vertices without replacement
//! 4. move each sampled vertex to a random other community
//! 5. rebuild the partition state from scratch and optimize
//! 6. record if strictly better, and repeat from 3 until the iteration budget
//!    is spent or a monitor asks to stop
//!
//! There is no acceptance criterion: the search always continues from the
//! last optimized partition. Only the recorded best is protected.
//!
//! Monitors are polled only between iterations, so the returned partition is
//! always the output of a complete local search.

use crate::construction::Construction;
use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::neighborhood::NeighborhoodIndex;
use crate::objective::{Frustration, ObjectiveFunction};
use crate::partition::{CommunityId, Partition};
use crate::search::local_search::{LocalSearch, NodeOrder};
use crate::search::monitor::{NoOpMonitor, SearchCommand, SearchMonitor};
use crate::search::result::{IteratedGreedyOutcome, TerminationReason};
use crate::search::stats::SearchStatistics;
use rand::prelude::*;
use rand::seq::index;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Where a destroyed vertex is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconstructionPolicy {
    /// Any community that existed before reconstruction, other than its own.
    #[default]
    All,
    /// A community it currently has an edge into.
    Neighbor,
}

impl std::str::FromStr for ReconstructionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(ReconstructionPolicy::All),
            "neighbor" => Ok(ReconstructionPolicy::Neighbor),
            _ => Err(Error::InvalidParameter {
                name: "policy",
                message: "expected \"all\" or \"neighbor\"",
            }),
        }
    }
}

/// Iterated greedy configuration.
#[derive(Debug, Clone)]
pub struct IteratedGreedy {
    beta: f64,
    max_iter: u64,
    seed: Option<u64>,
    policy: ReconstructionPolicy,
    node_order: NodeOrder,
    max_sweeps: usize,
}

/// Best partition recorded so far.
struct Incumbent {
    solution: Vec<CommunityId>,
    partition: Partition,
    value: i64,
}

impl Incumbent {
    fn capture<O: ObjectiveFunction + ?Sized>(obj: &O) -> Self {
        Self {
            solution: obj.solution().to_vec(),
            partition: obj.partition().clone(),
            value: obj.value(),
        }
    }
}

impl IteratedGreedy {
    /// Default destruction fraction.
    pub const DEFAULT_BETA: f64 = 0.3;
    /// Default iteration budget.
    pub const DEFAULT_MAX_ITER: u64 = 200;

    /// β = 0.3, 200 iterations, unseeded, policy [`ReconstructionPolicy::All`].
    pub fn new() -> Self {
        Self {
            beta: Self::DEFAULT_BETA,
            max_iter: Self::DEFAULT_MAX_ITER,
            seed: None,
            policy: ReconstructionPolicy::All,
            node_order: NodeOrder::Identity,
            max_sweeps: LocalSearch::DEFAULT_MAX_SWEEPS,
        }
    }

    /// Fraction of vertices destroyed per iteration, in `(0, 1]`.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Number of destroy/rebuild iterations.
    pub fn with_max_iter(mut self, max_iter: u64) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seed the random source; the same seed reproduces the same run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the reconstruction policy.
    pub fn with_policy(mut self, policy: ReconstructionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Vertex order used by relocation.
    pub fn with_node_order(mut self, node_order: NodeOrder) -> Self {
        self.node_order = node_order;
        self
    }

    /// Sweep cap used by relocation.
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// Destruction fraction.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Iteration budget.
    pub fn max_iter(&self) -> u64 {
        self.max_iter
    }

    /// Configured seed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Reconstruction policy.
    pub fn policy(&self) -> ReconstructionPolicy {
        self.policy
    }

    fn validate(&self) -> Result<()> {
        if !(self.beta > 0.0 && self.beta <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "beta",
                message: "must be in (0, 1]",
            });
        }
        if self.max_sweeps == 0 {
            return Err(Error::InvalidParameter {
                name: "max_sweeps",
                message: "must be at least 1",
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

    /// Run the search, reporting to `monitor`.
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

        let ls = LocalSearch::new(neighborhood)
            .with_node_order(neighborhood, self.node_order)
            .with_max_sweeps(self.max_sweeps);
        let mut stats = SearchStatistics::default();

        let initial = construction.produce(neighborhood, &mut rng)?;
        let mut obj = Frustration::new(neighborhood, initial)?;
        tracing::debug!(
            construction = construction.name(),
            value = obj.value(),
            communities = obj.partition().len(),
            "initial solution"
        );

        let (relocation, merge) = ls.optimize(&mut obj);
        stats.on_local_search(&relocation, &merge);
        debug_assert!(crate::validate::validate_state(&obj).is_healthy());

        let mut best = Incumbent::capture(&obj);
        monitor.on_enter_search(best.value);

        let amount = ((self.beta * n as f64).floor() as usize).min(n);
        let mut termination = TerminationReason::IterationBudget;

        for iteration in 1..=self.max_iter {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                tracing::info!(%reason, iteration, "search aborted by monitor");
                termination = TerminationReason::Aborted(reason);
                break;
            }

            let sampled = index::sample(&mut rng, n, amount).into_vec();
            monitor.on_destruction(&sampled);

            let solution = self.reconstruct(neighborhood, &obj, &sampled, &mut rng);
            obj.reset(solution)?;

            let (relocation, merge) = ls.optimize(&mut obj);
            stats.on_local_search(&relocation, &merge);
            stats.on_iteration();
            debug_assert!(crate::validate::validate_state(&obj).is_healthy());

            if obj.value() < best.value {
                best = Incumbent::capture(&obj);
                stats.on_improvement();
                monitor.on_improvement(best.value);
                tracing::info!(iteration, best = best.value, "new best partition");
            }
            tracing::debug!(iteration, value = obj.value(), best = best.value, "iteration");
            monitor.on_iteration(iteration, obj.value(), best.value);
        }

        stats.set_total_time(start.elapsed());
        monitor.on_exit_search(&stats);
        tracing::info!(
            best = best.value,
            communities = best.partition.len(),
            iterations = stats.iterations,
            "iterated greedy finished"
        );

        Ok(IteratedGreedyOutcome::new(
            best.solution,
            best.partition,
            best.value,
            stats,
            termination,
        ))
    }

    /// Reassign the sampled vertices on a copy of the current solution.
    fn reconstruct<O, R>(
        &self,
        neighborhood: &NeighborhoodIndex,
        obj: &O,
        sampled: &[NodeId],
        rng: &mut R,
    ) -> Vec<CommunityId>
    where
        O: ObjectiveFunction + ?Sized,
        R: Rng + ?Sized,
    {
        let mut solution = obj.solution().to_vec();
        match self.policy {
            ReconstructionPolicy::All => {
                let ids: Vec<CommunityId> = obj.partition().ids().collect();
                for &v in sampled {
                    let own = solution[v];
                    let candidates: Vec<CommunityId> =
                        ids.iter().copied().filter(|&c| c != own).collect();
                    if let Some(&c) = candidates.choose(rng) {
                        solution[v] = c;
                    }
                }
            }
            ReconstructionPolicy::Neighbor => {
                for &v in sampled {
                    let candidates: Vec<CommunityId> =
                        neighborhood.adjacent_labels(v, &solution).into_iter().collect();
                    if let Some(&c) = candidates.choose(rng) {
                        solution[v] = c;
                    }
                }
            }
        }
        solution
    }

    /// Independent runs, one per seed, sharing the neighborhood index.
    ///
    /// Runs in parallel with the `parallel` feature. The lowest value wins;
    /// ties go to the earliest seed.
    pub fn run_trials<C>(
        &self,
        neighborhood: &NeighborhoodIndex,
        construction: &C,
        seeds: &[u64],
    ) -> Result<IteratedGreedyOutcome>
    where
        C: Construction + Sync,
    {
        if seeds.is_empty() {
            return Err(Error::InvalidParameter {
                name: "seeds",
                message: "at least one seed is required",
            });
        }

        let trial = |&seed: &u64| {
            self.clone()
                .with_seed(seed)
                .run(neighborhood, construction, &mut NoOpMonitor)
        };

        #[cfg(feature = "parallel")]
        let outcomes = seeds.par_iter().map(trial).collect::<Result<Vec<_>>>()?;

        #[cfg(not(feature = "parallel"))]
        let outcomes = seeds.iter().map(trial).collect::<Result<Vec<_>>>()?;

        let mut best: Option<(usize, IteratedGreedyOutcome)> = None;
        for (i, outcome) in outcomes.into_iter().enumerate() {
            tracing::debug!(seed = seeds[i], value = outcome.value(), "trial finished");
            if best.as_ref().map_or(true, |(_, b)| outcome.value() < b.value()) {
                best = Some((i, outcome));
            }
        }

        let (i, outcome) = best.ok_or(Error::EmptyInput)?;
        tracing::info!(seed = seeds[i], value = outcome.value(), trials = seeds.len(), "best trial");
        Ok(outcome)
    }
}

impl Default for IteratedGreedy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{SignedLabelPropagation, Singletons};
    use crate::graph::{Sign, SignedGraph};
    use crate::search::monitor::InterruptMonitor;
    use std::sync::atomic::AtomicBool;

    fn triangle() -> NeighborhoodIndex {
        let graph = SignedGraph::from_edges(
            3,
            [
                (0, 1, Sign::Positive),
                (1, 2, Sign::Positive),
                (0, 2, Sign::Negative),
            ],
        )
        .unwrap();
        NeighborhoodIndex::build(&graph)
    }

    /// Two positive 4-cliques with all cross edges negative.
    fn two_factions() -> NeighborhoodIndex {
        let mut graph = SignedGraph::new(8).unwrap();
        for u in 0..8 {
            for v in (u + 1)..8 {
                let sign = if (u < 4) == (v < 4) {
                    Sign::Positive
                } else {
                    Sign::Negative
                };
                let _ = graph.add_edge(u, v, sign).unwrap();
            }
        }
        NeighborhoodIndex::build(&graph)
    }

    #[test]
    fn test_triangle() {
        let nbr = triangle();
        let outcome = IteratedGreedy::new()
            .with_seed(1)
            .with_max_iter(10)
            .solve(&nbr, &Singletons)
            .unwrap();

        assert_eq!(outcome.value(), 1);
        assert_eq!(outcome.termination_reason(), &TerminationReason::IterationBudget);
        assert_eq!(outcome.statistics().iterations, 10);
    }

    #[test]
    fn test_factions_balanced() {
        let nbr = two_factions();
        for policy in [ReconstructionPolicy::All, ReconstructionPolicy::Neighbor] {
            let outcome = IteratedGreedy::new()
                .with_seed(5)
                .with_max_iter(30)
                .with_policy(policy)
                .solve(&nbr, &SignedLabelPropagation::new())
                .unwrap();

            assert_eq!(outcome.value(), 0, "{policy:?}");
            assert_eq!(outcome.partition().len(), 2);
        }
    }

    #[test]
    fn test_rejects_bad_beta() {
        let nbr = triangle();
        for beta in [0.0, -0.1, 1.5, f64::NAN] {
            let result = IteratedGreedy::new().with_beta(beta).solve(&nbr, &Singletons);
            assert!(
                matches!(result, Err(Error::InvalidParameter { name: "beta", .. })),
                "beta = {beta}"
            );
        }
        assert!(IteratedGreedy::new().with_beta(1.0).with_max_iter(2).solve(&nbr, &Singletons).is_ok());
    }

    #[test]
    fn test_rejects_zero_sweep_cap() {
        let nbr = triangle();
        let result = IteratedGreedy::new()
            .with_seed(1)
            .with_max_iter(2)
            .with_max_sweeps(0)
            .solve(&nbr, &Singletons);
        assert!(matches!(
            result,
            Err(Error::InvalidParameter { name: "max_sweeps", .. })
        ));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("all".parse::<ReconstructionPolicy>(), Ok(ReconstructionPolicy::All));
        assert_eq!(
            "neighbor".parse::<ReconstructionPolicy>(),
            Ok(ReconstructionPolicy::Neighbor)
        );
        assert!(matches!(
            "bogus".parse::<ReconstructionPolicy>(),
            Err(Error::InvalidParameter { name: "policy", .. })
        ));
    }

    #[test]
    fn test_degree_order_driver() {
        let nbr = two_factions();
        let outcome = IteratedGreedy::new()
            .with_seed(4)
            .with_max_iter(10)
            .with_node_order(NodeOrder::DegreeDescending)
            .solve(&nbr, &Singletons)
            .unwrap();
        assert_eq!(outcome.value(), 0);
        assert_eq!(outcome.partition().len(), 2);
    }

    #[test]
    fn test_interrupt_before_first_iteration() {
        let nbr = triangle();
        let flag = AtomicBool::new(true);
        let outcome = IteratedGreedy::new()
            .with_seed(0)
            .run(&nbr, &Singletons, &mut InterruptMonitor::new(&flag))
            .unwrap();

        assert!(matches!(outcome.termination_reason(), TerminationReason::Aborted(_)));
        assert_eq!(outcome.statistics().iterations, 0);
        // the recorded best is still a local optimum of the initial solution
        assert_eq!(outcome.value(), 1);
    }

    #[test]
    fn test_single_community_reconstruction_is_noop() {
        let nbr = triangle();
        let ig = IteratedGreedy::new().with_beta(1.0);
        let obj = Frustration::new(&nbr, vec![0, 0, 0]).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        assert_eq!(ig.reconstruct(&nbr, &obj, &[0, 1, 2], &mut rng), vec![0, 0, 0]);
    }

    #[test]
    fn test_reconstruction_moves_to_other_community() {
        let nbr = triangle();
        let ig = IteratedGreedy::new();
        let obj = Frustration::new(&nbr, vec![0, 0, 2]).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        assert_eq!(ig.reconstruct(&nbr, &obj, &[2], &mut rng), vec![0, 0, 0]);
        assert_eq!(ig.reconstruct(&nbr, &obj, &[0], &mut rng), vec![2, 0, 2]);
    }

    #[test]
    fn test_run_trials() {
        let nbr = two_factions();
        let ig = IteratedGreedy::new().with_max_iter(5);
        let outcome = ig.run_trials(&nbr, &Singletons, &[1, 2, 3]).unwrap();
        assert_eq!(outcome.value(), 0);

        assert!(ig.run_trials(&nbr, &Singletons, &[]).is_err());
    }

    #[test]
    fn test_trial_ties_go_to_earliest_seed() {
        // Every run on the factions graph reaches 0, so all trials tie.
        let nbr = two_factions();
        let ig = IteratedGreedy::new().with_max_iter(3).with_beta(0.5);
        let seeds = [17, 3, 99];

        let best = ig.run_trials(&nbr, &SignedLabelPropagation::new(), &seeds).unwrap();
        let first = ig
            .clone()
            .with_seed(17)
            .solve(&nbr, &SignedLabelPropagation::new())
            .unwrap();

        assert_eq!(best.value(), 0);
        assert_eq!(first.value(), 0);
        assert_eq!(best.solution(), first.solution());
    }
}
