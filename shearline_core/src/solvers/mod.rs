//! # Diaphragm Solvers
//!
//! Two idealizations of how a diaphragm delivers story shear to its walls:
//!
//! - [`rigid`] - infinite diaphragm stiffness; all walls translate and
//!   rotate together, so each wall's share is set by rigidity and by
//!   torsion about the center of resistance
//! - [`flexible`] - zero diaphragm stiffness; the diaphragm acts as a
//!   simple beam over the braced wall lines and load follows tributary
//!   width, with no torsion
//!
//! Both follow the same pattern: a pure `solve` function that consumes a
//! [`WallSystem`](crate::walls::WallSystem), the applied loads, and the
//! diaphragm description, and returns a JSON-serializable solution struct.
//! Solutions are recomputed in full on every call; nothing is patched
//! incrementally.

pub mod flexible;
pub mod rigid;

use serde::{Deserialize, Serialize};

use crate::geometry::{Extents, Point};

pub use flexible::{FlexibleSolution, FlexibleWallShear, LineLoad, SkippedLine};
pub use rigid::{RigidSolution, RigidWallShear};

/// Story shear applied to the diaphragm, by global axis (lb).
///
/// Positive values act in the +x / +y directions of the plan frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AppliedShear {
    /// Shear applied along the X axis (lb)
    pub vx_lb: f64,
    /// Shear applied along the Y axis (lb)
    pub vy_lb: f64,
}

impl AppliedShear {
    /// Create an applied shear from per-axis magnitudes.
    pub const fn new(vx_lb: f64, vy_lb: f64) -> Self {
        AppliedShear { vx_lb, vy_lb }
    }
}

/// Diaphragm description supplied by the editor layer.
///
/// The solvers read it and never mutate it: the center of mass locates the
/// applied load for the rigid case, the extents bound the simple-beam span
/// for the flexible case.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Diaphragm {
    /// Where the story shear is applied (ft)
    pub center_of_mass: Point,
    /// Plan bounding box of the diaphragm (ft)
    pub extents: Extents,
}

impl Diaphragm {
    /// Create a diaphragm description.
    pub const fn new(center_of_mass: Point, extents: Extents) -> Self {
        Diaphragm {
            center_of_mass,
            extents,
        }
    }
}
