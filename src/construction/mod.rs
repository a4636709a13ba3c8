//! Initial solutions for the iterated greedy driver.
//!
//! A construction turns a neighborhood index and a random source into a
//! solution (community id per vertex). The driver calls it once per run.
//!
//! | Construction | Idea |
//! |--------------|------|
//! | [`Singletons`] | every vertex alone |
//! | [`GreedyMove`] | singletons, then one relocation run |
//! | [`SignedLabelPropagation`] | signed majority vote over neighbor labels |
//! | [`SeedExpansion`] | local degree centers as seeds, greedy attachment |
//! | [`RelocationHeuristic`] | multi-start exemplar assignment + relocation |

mod basic;
mod label_prop;
mod relocation;
mod seed_expansion;
mod traits;

pub use basic::{GreedyMove, Singletons};
pub use label_prop::SignedLabelPropagation;
pub use relocation::RelocationHeuristic;
pub use seed_expansion::SeedExpansion;
pub use traits::Construction;
