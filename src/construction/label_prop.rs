//! Signed label propagation.
//!
//! Each vertex starts with its own label. Visiting vertices in one random
//! order, a vertex scores every label among its neighbors (+1 per positive
//! neighbor carrying it, −1 per negative one) and adopts the best-scoring
//! label, even when that score is negative. Stops after a pass with no label
//! change or after `max_iter` passes.

use super::traits::Construction;
use crate::error::{Error, Result};
use crate::neighborhood::NeighborhoodIndex;
use crate::partition::CommunityId;
use rand::prelude::*;
use std::collections::BTreeMap;

/// Label propagation with signed votes.
#[derive(Debug, Clone)]
pub struct SignedLabelPropagation {
    /// Maximum passes.
    max_iter: usize,
}

impl SignedLabelPropagation {
    /// Create a new label propagation construction (5 passes at most).
    pub fn new() -> Self {
        Self { max_iter: 5 }
    }

    /// Set maximum passes.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

impl Default for SignedLabelPropagation {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-scoring neighbor label; ties go to the smallest label.
fn dominant_label(
    neighborhood: &NeighborhoodIndex,
    node: usize,
    labels: &[CommunityId],
) -> Option<CommunityId> {
    let mut scores: BTreeMap<CommunityId, i64> = BTreeMap::new();
    for &u in neighborhood.positive(node) {
        *scores.entry(labels[u]).or_insert(0) += 1;
    }
    for &u in neighborhood.negative(node) {
        *scores.entry(labels[u]).or_insert(0) -= 1;
    }

    let mut best: Option<(CommunityId, i64)> = None;
    for (label, score) in scores {
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((label, score));
        }
    }
    best.map(|(label, _)| label)
}

impl Construction for SignedLabelPropagation {
    fn name(&self) -> &str {
        "label-propagation"
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

        let mut labels: Vec<CommunityId> = (0..n).collect();
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);

        for pass in 0..self.max_iter {
            let mut changed = false;
            for &node in &order {
                if let Some(label) = dominant_label(neighborhood, node, &labels) {
                    if labels[node] != label {
                        labels[node] = label;
                        changed = true;
                    }
                }
            }
            if !changed {
                tracing::debug!(passes = pass + 1, "label propagation converged");
                break;
            }
        }

        // Renumber to consecutive integers
        let mut unique = labels.clone();
        unique.sort_unstable();
        unique.dedup();
        Ok(labels
            .iter()
            .map(|l| unique.binary_search(l).unwrap_or(0))
            .collect())
    }
}
