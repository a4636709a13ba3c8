//! Solutions and partitions.
//!
//! A *solution* maps each vertex to a community id (`solution[v] = c`); a
//! [`Partition`] maps each community id to its member set. The two views are
//! mutually derivable and the search keeps both in sync.
//!
//! Community ids are opaque: merges delete ids and nothing renumbers the
//! survivors implicitly. Use [`Partition::renumbered`] or [`relabel_solution`]
//! to get contiguous ids for reporting.

use crate::error::{Error, Result};
use crate::graph::NodeId;
use std::collections::{btree_map, BTreeMap, BTreeSet, HashMap};

/// Community identifier.
pub type CommunityId = usize;

/// Community id → member vertices. No member set is ever empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    communities: BTreeMap<CommunityId, BTreeSet<NodeId>>,
}

impl Partition {
    /// Group vertices by their community id.
    pub fn from_solution(solution: &[CommunityId]) -> Self {
        let mut communities: BTreeMap<CommunityId, BTreeSet<NodeId>> = BTreeMap::new();
        for (v, &c) in solution.iter().enumerate() {
            let _ = communities.entry(c).or_default().insert(v);
        }
        Self { communities }
    }

    /// Every vertex in its own community, with id equal to the vertex id.
    pub fn singletons(n: usize) -> Self {
        Self {
            communities: (0..n).map(|v| (v, BTreeSet::from([v]))).collect(),
        }
    }

    /// Build a partition from explicit member sets keyed by id.
    ///
    /// Empty sets are dropped.
    pub fn from_communities<I>(communities: I) -> Self
    where
        I: IntoIterator<Item = (CommunityId, BTreeSet<NodeId>)>,
    {
        Self {
            communities: communities
                .into_iter()
                .filter(|(_, members)| !members.is_empty())
                .collect(),
        }
    }

    /// Convert back to a solution over `n` vertices.
    ///
    /// Fails if some vertex is missing, appears twice, or is out of range.
    pub fn to_solution(&self, n: usize) -> Result<Vec<CommunityId>> {
        let mut solution: Vec<Option<CommunityId>> = vec![None; n];
        for (&c, members) in &self.communities {
            for &v in members {
                let slot = solution
                    .get_mut(v)
                    .ok_or(Error::VertexOutOfRange { vertex: v, n })?;
                if slot.replace(c).is_some() {
                    return Err(Error::Other(format!(
                        "vertex {v} belongs to more than one community"
                    )));
                }
            }
        }
        solution
            .into_iter()
            .enumerate()
            .map(|(v, c)| c.ok_or_else(|| Error::Other(format!("vertex {v} has no community"))))
            .collect()
    }

    /// Number of communities.
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    /// Whether there are no communities.
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Total number of vertices across all communities.
    pub fn vertex_count(&self) -> usize {
        self.communities.values().map(BTreeSet::len).sum()
    }

    /// Members of community `c`.
    pub fn members(&self, c: CommunityId) -> Option<&BTreeSet<NodeId>> {
        self.communities.get(&c)
    }

    /// Whether community `c` exists.
    pub fn contains(&self, c: CommunityId) -> bool {
        self.communities.contains_key(&c)
    }

    /// Community ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = CommunityId> + '_ {
        self.communities.keys().copied()
    }

    /// `(id, members)` pairs, ascending by id.
    pub fn iter(&self) -> btree_map::Iter<'_, CommunityId, BTreeSet<NodeId>> {
        self.communities.iter()
    }

    /// Same member sets with ids `0..k`, assigned in ascending order of the old ids.
    pub fn renumbered(&self) -> Partition {
        Self {
            communities: self
                .communities
                .values()
                .cloned()
                .enumerate()
                .collect(),
        }
    }

    /// Move `v` from `from` to `to`, deleting `from` if it empties.
    pub(crate) fn relocate(&mut self, v: NodeId, from: CommunityId, to: CommunityId) {
        if let Some(members) = self.communities.get_mut(&from) {
            let _ = members.remove(&v);
            if members.is_empty() {
                let _ = self.communities.remove(&from);
            }
        }
        let _ = self.communities.entry(to).or_default().insert(v);
    }

    /// Fold `absorbed` into `target` and delete `absorbed`.
    ///
    /// Returns the vertices that changed community.
    pub(crate) fn absorb(&mut self, target: CommunityId, absorbed: CommunityId) -> Vec<NodeId> {
        let Some(mut moved) = self.communities.remove(&absorbed) else {
            return Vec::new();
        };
        let vertices: Vec<NodeId> = moved.iter().copied().collect();
        self.communities.entry(target).or_default().append(&mut moved);
        vertices
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = (&'a CommunityId, &'a BTreeSet<NodeId>);
    type IntoIter = btree_map::Iter<'a, CommunityId, BTreeSet<NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.communities.iter()
    }
}

/// Renumber a solution's labels to `0..k` in first-seen order.
///
/// Returns the number of distinct labels.
pub fn relabel_solution(solution: &mut [CommunityId]) -> usize {
    let mut map: HashMap<CommunityId, CommunityId> = HashMap::new();
    let mut next = 0usize;
    for label in solution.iter_mut() {
        let id = *map.entry(*label).or_insert_with(|| {
            let cur = next;
            next += 1;
            cur
        });
        *label = id;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_with_sparse_ids() {
        let solution = vec![40, 7, 40, 3];
        let partition = Partition::from_solution(&solution);

        assert_eq!(partition.len(), 3);
        assert_eq!(partition.members(40), Some(&BTreeSet::from([0, 2])));
        assert_eq!(partition.ids().collect::<Vec<_>>(), vec![3, 7, 40]);
        assert_eq!(partition.to_solution(4).unwrap(), solution);
    }

    #[test]
    fn test_to_solution_rejects_gaps_and_overlaps() {
        let missing = Partition::from_communities([(0, BTreeSet::from([0, 1]))]);
        assert!(missing.to_solution(3).is_err());

        let overlap = Partition::from_communities([
            (0, BTreeSet::from([0, 1])),
            (1, BTreeSet::from([1])),
        ]);
        assert!(overlap.to_solution(2).is_err());

        let out_of_range = Partition::from_communities([(0, BTreeSet::from([5]))]);
        assert_eq!(
            out_of_range.to_solution(2),
            Err(Error::VertexOutOfRange { vertex: 5, n: 2 })
        );
    }

    #[test]
    fn test_relocate_deletes_emptied_community() {
        let mut partition = Partition::singletons(3);
        partition.relocate(1, 1, 0);

        assert!(!partition.contains(1));
        assert_eq!(partition.members(0), Some(&BTreeSet::from([0, 1])));
        assert_eq!(partition.vertex_count(), 3);
    }

    #[test]
    fn test_absorb() {
        let mut partition = Partition::from_solution(&[0, 0, 5, 5, 9]);
        let moved = partition.absorb(9, 5);

        assert_eq!(moved, vec![2, 3]);
        assert_eq!(partition.len(), 2);
        assert_eq!(partition.members(9), Some(&BTreeSet::from([2, 3, 4])));
    }

    #[test]
    fn test_renumbered_and_relabel() {
        let partition = Partition::from_solution(&[12, 4, 12]);
        let renumbered = partition.renumbered();
        assert_eq!(renumbered.ids().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(renumbered.members(1), Some(&BTreeSet::from([0, 2])));

        let mut solution = vec![12, 4, 12, 30];
        assert_eq!(relabel_solution(&mut solution), 3);
        assert_eq!(solution, vec![0, 1, 0, 2]);
    }
}
