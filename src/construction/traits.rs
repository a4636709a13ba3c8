//! Construction trait.

use crate::error::Result;
use crate::neighborhood::NeighborhoodIndex;
use crate::partition::CommunityId;
use rand::Rng;

/// Produces an initial solution.
pub trait Construction {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Build a solution over `neighborhood.node_count()` vertices.
    ///
    /// Community ids need not be contiguous. Any randomness must come from
    /// `rng` so that a seeded run is reproducible.
    fn produce<R: Rng + ?Sized>(
        &self,
        neighborhood: &NeighborhoodIndex,
        rng: &mut R,
    ) -> Result<Vec<CommunityId>>;
}
