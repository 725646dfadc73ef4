//! # Walls
//!
//! The bracing inventory: individual wall records, the braced-wall-line
//! clusterer, and the wall system that owns both.
//!
//! - [`Wall`] - immutable geometric description of one bracing segment
//! - [`WallLines`] - clusters collinear (within tolerance) centerlines into
//!   braced wall lines
//! - [`WallSystem`] - owns the full wall collection, partitions it by
//!   orientation, and produces the [`SystemGeometry`] snapshot the solvers
//!   consume

pub mod system;
pub mod wall;
pub mod wall_line;

use serde::{Deserialize, Serialize};

pub use system::{SystemGeometry, WallOffset, WallSystem};
pub use wall::Wall;
pub use wall_line::{LineMember, WallLines};

/// Stable integer identifier for a wall within a [`WallSystem`].
///
/// Ids come from a monotonic counter and are never reused after a wall is
/// deleted, so references held by an editor or a results table stay valid
/// for the life of the system.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WallId(pub u32);

impl std::fmt::Display for WallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
