//! # Wall System
//!
//! Owns the full collection of wall records, partitions them by
//! orientation, drives one braced-wall-line clusterer per orientation, and
//! computes the rigidity-weighted center of resistance and the moments of
//! inertia for the whole system.
//!
//! ## Snapshot, not cache
//!
//! Derived scalars (center of resistance, inertia, per-wall offsets) are
//! pure functions of the current wall set. [`WallSystem::geometry`] computes
//! them fresh on every call and returns an immutable [`SystemGeometry`]
//! snapshot; callers hold the snapshot, so a failed computation can never
//! publish a mix of old and new derived fields.
//!
//! ## Example
//!
//! ```rust
//! use shearline_core::geometry::{Orientation, Point};
//! use shearline_core::walls::{Wall, WallSystem};
//!
//! let mut system = WallSystem::new(4.0);
//! system.add_wall(Wall::new("W-1", Point::new(0.0, 0.0), Point::new(20.0, 0.0),
//!     9.0, Orientation::EastWest).unwrap());
//! system.add_wall(Wall::new("W-2", Point::new(0.0, 75.0), Point::new(20.0, 75.0),
//!     9.0, Orientation::EastWest).unwrap());
//! system.add_wall(Wall::new("W-3", Point::new(0.0, 0.0), Point::new(0.0, 75.0),
//!     9.0, Orientation::NorthSouth).unwrap());
//!
//! let geometry = system.geometry().unwrap();
//! assert!((geometry.center_of_resistance.y - 37.5).abs() < 1e-9);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Wall, WallId, WallLines};
use crate::errors::{ShearError, ShearResult};
use crate::geometry::{Orientation, Point};

/// Per-wall offset from the center of resistance (ft).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallOffset {
    /// Center x minus center-of-resistance x
    pub x_ft: f64,
    /// Center y minus center-of-resistance y
    pub y_ft: f64,
}

/// Immutable geometry snapshot for one wall set.
///
/// Everything a solver needs in one value: the center of resistance,
/// per-axis rigidity totals, directional and polar moments of inertia, and
/// each wall's offset from the center of resistance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemGeometry {
    /// Rigidity-weighted centroid of all bracing elements (ft)
    pub center_of_resistance: Point,
    /// Total rigidity of east-west walls (resists X-direction shear)
    pub rigidity_ew: f64,
    /// Total rigidity of north-south walls (resists Y-direction shear)
    pub rigidity_ns: f64,
    /// Σ R·dy² over east-west walls
    pub ixx: f64,
    /// Σ R·dx² over north-south walls
    pub iyy: f64,
    /// Polar moment of inertia, Ixx + Iyy
    pub polar: f64,
    /// Offset of each wall's center from the center of resistance
    pub offsets: BTreeMap<WallId, WallOffset>,
}

/// The full bracing inventory for one diaphragm.
///
/// Single-owner, single-threaded: every mutation immediately re-derives the
/// braced-wall-line grouping for the affected orientation, and geometry is
/// recomputed in full on demand. Ids are assigned from a monotonic counter
/// and never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSystem {
    walls: BTreeMap<WallId, Wall>,
    next_id: u32,
    cluster_tolerance_ft: f64,
    #[serde(skip)]
    lines_ew: WallLines,
    #[serde(skip)]
    lines_ns: WallLines,
}

impl WallSystem {
    /// Create an empty system with the given braced-wall-line clustering
    /// tolerance (ft).
    pub fn new(cluster_tolerance_ft: f64) -> Self {
        WallSystem {
            walls: BTreeMap::new(),
            next_id: 0,
            cluster_tolerance_ft,
            lines_ew: WallLines::new(cluster_tolerance_ft),
            lines_ns: WallLines::new(cluster_tolerance_ft),
        }
    }

    /// The clustering tolerance (ft).
    pub fn cluster_tolerance_ft(&self) -> f64 {
        self.cluster_tolerance_ft
    }

    /// Change the clustering tolerance and regroup both orientations.
    pub fn set_cluster_tolerance(&mut self, tolerance_ft: f64) {
        self.cluster_tolerance_ft = tolerance_ft;
        self.refresh();
    }

    /// Add a validated wall, returning its assigned id.
    pub fn add_wall(&mut self, wall: Wall) -> WallId {
        let id = WallId(self.next_id);
        self.next_id += 1;

        let coordinate = wall.line_coordinate();
        self.lines_mut(wall.orientation).add(coordinate, id);
        self.walls.insert(id, wall);
        id
    }

    /// Remove a wall by id, returning it if it existed.
    pub fn remove_wall(&mut self, id: WallId) -> Option<Wall> {
        let wall = self.walls.remove(&id)?;
        self.lines_mut(wall.orientation).remove(id);
        Some(wall)
    }

    /// Get a wall by id.
    pub fn get(&self, id: WallId) -> Option<&Wall> {
        self.walls.get(&id)
    }

    /// All walls in id (insertion) order.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &Wall)> {
        self.walls.iter().map(|(id, wall)| (*id, wall))
    }

    /// Walls of one orientation, in id order.
    pub fn walls_of(&self, orientation: Orientation) -> impl Iterator<Item = (WallId, &Wall)> {
        self.walls()
            .filter(move |(_, wall)| wall.orientation == orientation)
    }

    /// Number of walls in the system.
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// True when the system holds no walls.
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// The braced-wall-line grouping for one orientation.
    pub fn lines(&self, orientation: Orientation) -> &WallLines {
        match orientation {
            Orientation::EastWest => &self.lines_ew,
            Orientation::NorthSouth => &self.lines_ns,
        }
    }

    fn lines_mut(&mut self, orientation: Orientation) -> &mut WallLines {
        match orientation {
            Orientation::EastWest => &mut self.lines_ew,
            Orientation::NorthSouth => &mut self.lines_ns,
        }
    }

    /// Rebuild both clusterers from the current wall set.
    ///
    /// Required after deserializing a system (the clusterers are derived
    /// state and are not persisted); harmless at any other time.
    pub fn refresh(&mut self) {
        self.lines_ew = WallLines::new(self.cluster_tolerance_ft);
        self.lines_ns = WallLines::new(self.cluster_tolerance_ft);
        // Collect first: the clusterers cannot be borrowed while iterating walls.
        let coords: Vec<(WallId, Orientation, f64)> = self
            .walls
            .iter()
            .map(|(id, wall)| (*id, wall.orientation, wall.line_coordinate()))
            .collect();
        for (id, orientation, coordinate) in coords {
            self.lines_mut(orientation).add(coordinate, id);
        }
    }

    /// Compute the geometry snapshot for the current wall set.
    ///
    /// # Errors
    ///
    /// `DegenerateSystem` when either axis has no resisting walls; a
    /// missing axis would otherwise surface as NaN in every downstream
    /// shear value.
    pub fn geometry(&self) -> ShearResult<SystemGeometry> {
        let mut rigidity_ew = 0.0;
        let mut rigidity_ns = 0.0;
        let mut moment_ew = 0.0; // Σ R·center.y over east-west walls
        let mut moment_ns = 0.0; // Σ R·center.x over north-south walls

        for (_, wall) in self.walls() {
            match wall.orientation {
                Orientation::EastWest => {
                    rigidity_ew += wall.rigidity();
                    moment_ew += wall.rigidity_moment_y();
                }
                Orientation::NorthSouth => {
                    rigidity_ns += wall.rigidity();
                    moment_ns += wall.rigidity_moment_x();
                }
            }
        }

        if rigidity_ew <= 0.0 {
            return Err(ShearError::degenerate_system(
                "x",
                "no east-west walls resist X-direction shear",
            ));
        }
        if rigidity_ns <= 0.0 {
            return Err(ShearError::degenerate_system(
                "y",
                "no north-south walls resist Y-direction shear",
            ));
        }

        let center_of_resistance = Point::new(moment_ns / rigidity_ns, moment_ew / rigidity_ew);

        let mut ixx = 0.0;
        let mut iyy = 0.0;
        let mut offsets = BTreeMap::new();
        for (id, wall) in self.walls() {
            let center = wall.center();
            let offset = WallOffset {
                x_ft: center.x - center_of_resistance.x,
                y_ft: center.y - center_of_resistance.y,
            };
            match wall.orientation {
                Orientation::EastWest => ixx += wall.rigidity() * offset.y_ft.powi(2),
                Orientation::NorthSouth => iyy += wall.rigidity() * offset.x_ft.powi(2),
            }
            offsets.insert(id, offset);
        }

        Ok(SystemGeometry {
            center_of_resistance,
            rigidity_ew,
            rigidity_ns,
            ixx,
            iyy,
            polar: ixx + iyy,
            offsets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ew(label: &str, y: f64, length: f64) -> Wall {
        Wall::new(
            label,
            Point::new(0.0, y),
            Point::new(length, y),
            9.0,
            Orientation::EastWest,
        )
        .unwrap()
    }

    fn ns(label: &str, x: f64, length: f64) -> Wall {
        Wall::new(
            label,
            Point::new(x, 0.0),
            Point::new(x, length),
            9.0,
            Orientation::NorthSouth,
        )
        .unwrap()
    }

    fn sample_system() -> WallSystem {
        let mut system = WallSystem::new(4.0);
        system.add_wall(ew("W-1", 0.0, 20.0));
        system.add_wall(ew("W-2", 75.0, 20.0));
        system.add_wall(ns("W-3", 0.0, 30.0));
        system.add_wall(ns("W-4", 40.0, 30.0));
        system
    }

    #[test]
    fn test_monotonic_ids_never_reused() {
        let mut system = sample_system();
        assert_eq!(system.len(), 4);

        system.remove_wall(WallId(1));
        let id = system.add_wall(ew("W-5", 50.0, 20.0));
        // The freed id 1 is not recycled.
        assert_eq!(id, WallId(4));
    }

    #[test]
    fn test_orientation_partitions() {
        let system = sample_system();
        assert_eq!(system.walls_of(Orientation::EastWest).count(), 2);
        assert_eq!(system.walls_of(Orientation::NorthSouth).count(), 2);
    }

    #[test]
    fn test_center_of_resistance_equal_walls() {
        // Two identical east-west walls at y=0 and y=75: equal rigidities,
        // so the center of resistance sits at the midpoint y=37.5. The two
        // identical north-south walls at x=0 and x=40 put x at 20.
        let system = sample_system();
        let geometry = system.geometry().unwrap();
        assert!((geometry.center_of_resistance.y - 37.5).abs() < 1e-9);
        assert!((geometry.center_of_resistance.x - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_center_of_resistance_weighted() {
        // A longer (stiffer) wall pulls the center of resistance toward it.
        let mut system = WallSystem::new(4.0);
        system.add_wall(ew("W-1", 0.0, 40.0));
        system.add_wall(ew("W-2", 75.0, 10.0));
        system.add_wall(ns("W-3", 0.0, 30.0));
        system.add_wall(ns("W-4", 40.0, 30.0));

        let geometry = system.geometry().unwrap();
        assert!(geometry.center_of_resistance.y < 37.5);
        assert!(geometry.center_of_resistance.y > 0.0);
    }

    #[test]
    fn test_inertia_matches_hand_calc() {
        let system = sample_system();
        let geometry = system.geometry().unwrap();

        let r_ew = ew("W", 0.0, 20.0).rigidity();
        let r_ns = ns("W", 0.0, 30.0).rigidity();
        // Each east-west wall sits 37.5 ft off the center of resistance,
        // each north-south wall 20 ft.
        let expected_ixx = 2.0 * r_ew * 37.5_f64.powi(2);
        let expected_iyy = 2.0 * r_ns * 20.0_f64.powi(2);
        assert!((geometry.ixx - expected_ixx).abs() < 1e-9);
        assert!((geometry.iyy - expected_iyy).abs() < 1e-9);
        assert!((geometry.polar - (expected_ixx + expected_iyy)).abs() < 1e-9);
    }

    #[test]
    fn test_offsets() {
        let system = sample_system();
        let geometry = system.geometry().unwrap();
        let offset = geometry.offsets[&WallId(0)];
        assert!((offset.y_ft - (-37.5)).abs() < 1e-9);
        let offset = geometry.offsets[&WallId(1)];
        assert!((offset.y_ft - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_axis_rejected() {
        let mut system = WallSystem::new(4.0);
        system.add_wall(ew("W-1", 0.0, 20.0));
        system.add_wall(ew("W-2", 75.0, 20.0));

        match system.geometry() {
            Err(ShearError::DegenerateSystem { axis, .. }) => assert_eq!(axis, "y"),
            other => panic!("expected DegenerateSystem, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_system_degenerate() {
        let system = WallSystem::new(4.0);
        assert!(matches!(
            system.geometry(),
            Err(ShearError::DegenerateSystem { .. })
        ));
    }

    #[test]
    fn test_lines_follow_mutations() {
        let mut system = WallSystem::new(4.0);
        system.add_wall(ew("W-1", 0.0, 20.0));
        system.add_wall(ew("W-2", 2.0, 20.0));
        system.add_wall(ew("W-3", 75.0, 20.0));
        assert_eq!(system.lines(Orientation::EastWest).line_count(), 2);

        system.remove_wall(WallId(1));
        assert_eq!(system.lines(Orientation::EastWest).line_count(), 2);
        system.remove_wall(WallId(2));
        assert_eq!(system.lines(Orientation::EastWest).line_count(), 1);
    }

    #[test]
    fn test_serde_roundtrip_then_refresh() {
        let system = sample_system();
        let json = serde_json::to_string(&system).unwrap();
        let mut restored: WallSystem = serde_json::from_str(&json).unwrap();

        // Clusterers are derived state and come back empty until refreshed.
        assert_eq!(restored.lines(Orientation::EastWest).line_count(), 0);
        restored.refresh();
        assert_eq!(restored.lines(Orientation::EastWest).line_count(), 2);
        assert_eq!(restored.lines(Orientation::NorthSouth).line_count(), 2);
        assert_eq!(restored.len(), 4);

        // Geometry is unaffected by the round trip.
        let before = system.geometry().unwrap();
        let after = restored.geometry().unwrap();
        assert_eq!(before, after);
    }
}
