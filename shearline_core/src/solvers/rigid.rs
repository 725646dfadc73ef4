//! # Rigid Diaphragm Solver
//!
//! Distributes story shear assuming infinite diaphragm stiffness: every
//! wall translates with the diaphragm and rotates with it about the center
//! of resistance. Each wall carries a direct share proportional to its
//! rigidity plus an eccentric (torsional) share driven by the offset
//! between center of mass and center of resistance.
//!
//! ## Sign Convention
//!
//! +x right, +y up, counter-clockwise moments positive (right-hand rule).
//! Reported shears are the *resisting* forces on the diaphragm, opposite
//! the applied load, so direct shear carries a leading negative.
//!
//! The eccentric-shear sign is a single closed form,
//! `sign(Mt) · sign(offset)`, with zero for a wall sitting exactly on the
//! center-of-resistance line.
//!
//! ## Solve Order
//!
//! Eccentricity, then torsional moment, then direct shear, then eccentric
//! shear, then totals. Later steps read earlier outputs; the order is not
//! negotiable.

use serde::{Deserialize, Serialize};

use crate::errors::{ShearError, ShearResult};
use crate::geometry::{Orientation, Point};
use crate::solvers::AppliedShear;
use crate::walls::{WallId, WallSystem};

/// Per-wall results for the rigid idealization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidWallShear {
    /// Wall identifier
    pub id: WallId,
    /// Wall label for display
    pub label: String,
    /// Wall rigidity
    pub rigidity: f64,
    /// Wall center x minus center-of-resistance x (ft)
    pub x_offset_ft: f64,
    /// Wall center y minus center-of-resistance y (ft)
    pub y_offset_ft: f64,
    /// Direct resisting shear along X (lb); zero for north-south walls
    pub direct_x_lb: f64,
    /// Direct resisting shear along Y (lb); zero for east-west walls
    pub direct_y_lb: f64,
    /// Signed eccentric (torsional) shear (lb)
    pub eccentric_lb: f64,
    /// Direct plus eccentric shear (lb)
    pub total_lb: f64,
}

/// Complete rigid-diaphragm solution for one load case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidSolution {
    /// Center of resistance of the wall set (ft)
    pub center_of_resistance: Point,
    /// Center-of-resistance x minus center-of-mass x (ft)
    pub eccentricity_x_ft: f64,
    /// Center-of-resistance y minus center-of-mass y (ft)
    pub eccentricity_y_ft: f64,
    /// Torsional moment `Vx·ecc_y − Vy·ecc_x` (ft-lb, counter-clockwise positive)
    pub torsional_moment_ftlb: f64,
    /// Polar moment of inertia of the wall set
    pub polar_inertia: f64,
    /// Per-wall shear breakdown, in wall id order
    pub walls: Vec<RigidWallShear>,
}

/// Solve the rigid-diaphragm shear distribution.
///
/// # Errors
///
/// * `DegenerateSystem` if either axis has no resisting walls, or if the
///   polar moment of inertia is zero while the torsional moment is not
///   (every wall centered on the center of resistance cannot resist
///   torsion)
pub fn solve(
    system: &WallSystem,
    loads: &AppliedShear,
    center_of_mass: Point,
) -> ShearResult<RigidSolution> {
    let geometry = system.geometry()?;
    let cr = geometry.center_of_resistance;

    let eccentricity_x_ft = cr.x - center_of_mass.x;
    let eccentricity_y_ft = cr.y - center_of_mass.y;

    let torsional_moment_ftlb = loads.vx_lb * eccentricity_y_ft - loads.vy_lb * eccentricity_x_ft;

    if geometry.polar == 0.0 && torsional_moment_ftlb != 0.0 {
        return Err(ShearError::degenerate_system(
            "torsional",
            "polar moment of inertia is zero but the torsional moment is not",
        ));
    }

    let mut walls = Vec::with_capacity(system.len());
    for (id, wall) in system.walls() {
        let rigidity = wall.rigidity();
        let offset = geometry.offsets[&id];

        let (direct_x_lb, direct_y_lb, torsion_arm_ft) = match wall.orientation {
            Orientation::EastWest => (
                -loads.vx_lb * rigidity / geometry.rigidity_ew,
                0.0,
                offset.y_ft,
            ),
            Orientation::NorthSouth => (
                0.0,
                -loads.vy_lb * rigidity / geometry.rigidity_ns,
                offset.x_ft,
            ),
        };

        let eccentric_lb = if geometry.polar == 0.0 {
            0.0
        } else {
            let magnitude =
                (torsional_moment_ftlb * torsion_arm_ft).abs() * rigidity / geometry.polar;
            eccentric_sign(torsional_moment_ftlb, torsion_arm_ft) * magnitude
        };

        walls.push(RigidWallShear {
            id,
            label: wall.label.clone(),
            rigidity,
            x_offset_ft: offset.x_ft,
            y_offset_ft: offset.y_ft,
            direct_x_lb,
            direct_y_lb,
            eccentric_lb,
            total_lb: direct_x_lb + direct_y_lb + eccentric_lb,
        });
    }

    Ok(RigidSolution {
        center_of_resistance: cr,
        eccentricity_x_ft,
        eccentricity_y_ft,
        torsional_moment_ftlb,
        polar_inertia: geometry.polar,
        walls,
    })
}

/// Sign of the eccentric shear: the torsional share reinforces the side of
/// the center of resistance that rotation pushes toward.
///
/// Equivalent to the quadrant rule "Mt negative and wall below the center
/// of resistance gives +1, above gives −1", mirrored for positive Mt and
/// mirrored left/right for north-south walls, but written as one formula so
/// the four branches cannot drift apart.
fn eccentric_sign(torsional_moment: f64, offset_ft: f64) -> f64 {
    if torsional_moment == 0.0 || offset_ft == 0.0 {
        0.0
    } else {
        torsional_moment.signum() * offset_ft.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Orientation;
    use crate::walls::Wall;

    const EPSILON: f64 = 1e-9;

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
    fn test_direct_shear_conservation() {
        // Center of mass at the center of resistance: Mt = 0, direct only.
        let system = sample_system();
        let loads = AppliedShear::new(40.0, 25.0);
        let solution = solve(&system, &loads, Point::new(20.0, 37.5)).unwrap();

        assert!(solution.torsional_moment_ftlb.abs() < EPSILON);

        let sum_x: f64 = solution.walls.iter().map(|w| w.direct_x_lb).sum();
        let sum_y: f64 = solution.walls.iter().map(|w| w.direct_y_lb).sum();
        assert!((sum_x - (-40.0)).abs() < EPSILON);
        assert!((sum_y - (-25.0)).abs() < EPSILON);

        for wall in &solution.walls {
            assert!(wall.eccentric_lb.abs() < EPSILON);
        }
    }

    #[test]
    fn test_two_equal_walls_split_evenly() {
        // Scenario: two identical east-west walls (20 ft long, 9 ft tall)
        // at y=0 and y=75, center of mass at (7.58, 37.5), Vx = 40.
        // Equal rigidities put the center of resistance at y = 37.5, so the
        // y eccentricity vanishes and with Vy = 0 there is no torsion.
        let system = sample_system();
        let loads = AppliedShear::new(40.0, 0.0);
        let solution = solve(&system, &loads, Point::new(7.58, 37.5)).unwrap();

        assert!((solution.center_of_resistance.y - 37.5).abs() < EPSILON);
        assert!(solution.eccentricity_y_ft.abs() < EPSILON);
        assert!(solution.torsional_moment_ftlb.abs() < EPSILON);

        for wall in solution.walls.iter().take(2) {
            assert!((wall.direct_x_lb - (-20.0)).abs() < EPSILON);
            assert!(wall.eccentric_lb.abs() < EPSILON);
            assert!((wall.total_lb - (-20.0)).abs() < EPSILON);
        }
    }

    #[test]
    fn test_eccentric_shear_signs() {
        // Center of mass above the center of resistance: ecc_y < 0, so
        // Vx = 40 gives Mt < 0 (clockwise). The wall below the center of
        // resistance is reinforced (+), the wall above is relieved (−).
        let system = sample_system();
        let loads = AppliedShear::new(40.0, 0.0);
        let solution = solve(&system, &loads, Point::new(20.0, 45.0)).unwrap();

        assert!(solution.torsional_moment_ftlb < 0.0);

        let below = &solution.walls[0]; // y = 0, offset −37.5
        let above = &solution.walls[1]; // y = 75, offset +37.5
        assert!(below.eccentric_lb > 0.0);
        assert!(above.eccentric_lb < 0.0);
        assert!((below.eccentric_lb + above.eccentric_lb).abs() < EPSILON);
    }

    #[test]
    fn test_eccentric_shear_sums_to_zero_per_axis() {
        // Σ R·offset over an axis is zero by definition of the center of
        // resistance, so the signed eccentric shears cancel within each axis.
        let mut system = WallSystem::new(4.0);
        system.add_wall(ew("W-1", 0.0, 40.0));
        system.add_wall(ew("W-2", 50.0, 12.0));
        system.add_wall(ew("W-3", 75.0, 20.0));
        system.add_wall(ns("W-4", 0.0, 30.0));
        system.add_wall(ns("W-5", 40.0, 18.0));

        let loads = AppliedShear::new(40.0, 25.0);
        let solution = solve(&system, &loads, Point::new(5.0, 60.0)).unwrap();
        assert!(solution.torsional_moment_ftlb.abs() > 1.0);

        let sum: f64 = solution.walls.iter().map(|w| w.eccentric_lb).sum();
        assert!(sum.abs() < 1e-9);
    }

    #[test]
    fn test_closed_form_matches_quadrant_rule() {
        let quadrant_rule = |mt: f64, offset: f64| -> f64 {
            if offset == 0.0 || mt == 0.0 {
                0.0
            } else if mt < 0.0 {
                if offset < 0.0 {
                    1.0
                } else {
                    -1.0
                }
            } else if offset > 0.0 {
                1.0
            } else {
                -1.0
            }
        };

        for mt in [-300.0, 0.0, 450.0] {
            for offset in [-37.5, 0.0, 12.0] {
                assert_eq!(eccentric_sign(mt, offset), quadrant_rule(mt, offset));
            }
        }
    }

    #[test]
    fn test_total_is_direct_plus_eccentric() {
        let system = sample_system();
        let loads = AppliedShear::new(40.0, 25.0);
        let solution = solve(&system, &loads, Point::new(5.0, 60.0)).unwrap();

        for wall in &solution.walls {
            let expected = wall.direct_x_lb + wall.direct_y_lb + wall.eccentric_lb;
            assert!((wall.total_lb - expected).abs() < EPSILON);
        }
    }

    #[test]
    fn test_degenerate_system_rejected() {
        let mut system = WallSystem::new(4.0);
        system.add_wall(ew("W-1", 0.0, 20.0));

        let result = solve(&system, &AppliedShear::new(40.0, 0.0), Point::new(0.0, 0.0));
        assert!(matches!(result, Err(ShearError::DegenerateSystem { .. })));
    }
}
