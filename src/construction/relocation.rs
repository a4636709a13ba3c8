//! Multi-start relocation heuristic.
//!
//! Each start samples `k` distinct exemplars, one per cluster, and assigns every
//! other vertex to the exemplar it is most similar to (shared positive plus
//! shared negative neighbors). First-improvement relocation among the `k`
//! clusters then runs until no vertex can improve by moving. A vertex never
//! leaves a cluster it is alone in, so all `k` clusters survive.

use super::traits::Construction;
use crate::error::{Error, Result};
use crate::neighborhood::NeighborhoodIndex;
use crate::objective::{Frustration, ObjectiveFunction};
use crate::partition::CommunityId;
use crate::search::relocate_within_clusters;
use rand::seq::index;
use rand::Rng;

/// Exemplar-seeded relocation with `k` clusters, best of several starts.
#[derive(Debug, Clone)]
pub struct RelocationHeuristic {
    k: usize,
    restarts: usize,
}

impl RelocationHeuristic {
    /// `k` clusters, one start.
    pub fn new(k: usize) -> Self {
        Self { k, restarts: 1 }
    }

    /// Number of independent starts; the best one is returned.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Cluster count.
    pub fn k(&self) -> usize {
        self.k
    }

    fn start<R: Rng + ?Sized>(
        &self,
        neighborhood: &NeighborhoodIndex,
        rng: &mut R,
    ) -> Result<(Vec<CommunityId>, i64)> {
        let n = neighborhood.node_count();
        let mut exemplars = index::sample(rng, n, self.k).into_vec();
        exemplars.sort_unstable();

        let mut solution: Vec<CommunityId> = vec![0; n];
        for v in 0..n {
            // an exemplar anchors its own cluster
            if let Ok(idx) = exemplars.binary_search(&v) {
                solution[v] = idx;
                continue;
            }
            let mut best: Option<(CommunityId, usize)> = None;
            for (idx, &e) in exemplars.iter().enumerate() {
                let s = neighborhood.similarity(v, e);
                if best.map_or(true, |(_, bs)| s > bs) {
                    best = Some((idx, s));
                }
            }
            solution[v] = best.map_or(0, |(idx, _)| idx);
        }

        let mut obj = Frustration::new(neighborhood, solution)?;
        let _ = relocate_within_clusters(&mut obj, self.k);

        let value = obj.value();
        let (solution, _, _) = obj.into_parts();
        Ok((solution, value))
    }
}

impl Construction for RelocationHeuristic {
    fn name(&self) -> &str {
        "relocation"
    }

    fn produce<R: Rng + ?Sized>(
        &self,
        neighborhood: &NeighborhoodIndex,
        rng: &mut R,
    ) -> Result<Vec<CommunityId>> {
        let n = neighborhood.node_count();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be between 1 and the vertex count",
            });
        }
        if self.restarts == 0 {
            return Err(Error::InvalidParameter {
                name: "restarts",
                message: "must be at least 1",
            });
        }

        let mut best: Option<(Vec<CommunityId>, i64)> = None;
        for restart in 0..self.restarts {
            let (solution, value) = self.start(neighborhood, rng)?;
            tracing::trace!(restart, value, "relocation start");
            if best.as_ref().map_or(true, |(_, bv)| value < *bv) {
                best = Some((solution, value));
            }
        }

        best.map(|(solution, _)| solution)
            .ok_or(Error::Other("relocation produced no start".to_string()))
    }
}
