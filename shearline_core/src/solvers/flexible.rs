//! # Flexible Diaphragm Solver
//!
//! Distributes story shear assuming zero diaphragm stiffness: the
//! diaphragm is idealized as a simple beam resting on the braced wall
//! lines, carrying the story shear as a uniform line load. Each line takes
//! the load within its tributary width; the outermost lines also absorb
//! any overhang between themselves and the diaphragm edge. No torsion.
//!
//! Each line's load is then split among its member walls in proportion to
//! wall rigidity within the line.
//!
//! ## Example
//!
//! ```rust
//! use shearline_core::solvers::flexible::distribute_load;
//!
//! // Two supports at the ends of a 100 ft span under 1.0 plf.
//! let loads = distribute_load(&[0.0, 100.0], 1.0, 0.0, 100.0, "x").unwrap();
//! assert_eq!(loads.len(), 2);
//! assert!((loads[0].load_lb - 50.0).abs() < 1e-12);
//! assert!((loads[1].load_lb - 50.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ShearError, ShearResult};
use crate::geometry::Orientation;
use crate::solvers::{AppliedShear, Diaphragm};
use crate::walls::{LineMember, WallId, WallSystem};

/// Load delivered to one support (braced wall line) by the beam idealization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportLoad {
    /// Support location along the span (ft)
    pub position_ft: f64,
    /// Tributary interval width (ft)
    pub tributary_width_ft: f64,
    /// Load carried, uniform load × tributary width (lb)
    pub load_lb: f64,
}

/// One braced wall line's share of the story shear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineLoad {
    /// Representative coordinate of the line (ft)
    pub position_ft: f64,
    /// Tributary interval width (ft)
    pub tributary_width_ft: f64,
    /// Load delivered to the line (lb)
    pub load_lb: f64,
    /// Member walls, in id order
    pub walls: Vec<WallId>,
}

/// A braced wall line whose member walls received no load share.
///
/// Only possible for a line with zero total rigidity; its tributary load is
/// reported here instead of vanishing silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// Which axis's distribution the line belongs to ("x" or "y")
    pub axis: String,
    /// Representative coordinate of the line (ft)
    pub position_ft: f64,
    /// The tributary load that could not be assigned (lb)
    pub load_lb: f64,
    /// Member walls, in id order
    pub walls: Vec<WallId>,
}

/// Per-wall results for the flexible idealization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleWallShear {
    /// Wall identifier
    pub id: WallId,
    /// Wall label for display
    pub label: String,
    /// Tributary load delivered along X (lb); zero for north-south walls
    pub total_x_lb: f64,
    /// Tributary load delivered along Y (lb); zero for east-west walls
    pub total_y_lb: f64,
}

/// Complete flexible-diaphragm solution for one load case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleSolution {
    /// East-west braced wall lines carrying the X-direction shear
    pub lines_x: Vec<LineLoad>,
    /// North-south braced wall lines carrying the Y-direction shear
    pub lines_y: Vec<LineLoad>,
    /// Per-wall loads, in wall id order
    pub walls: Vec<FlexibleWallShear>,
    /// Lines whose load could not be assigned to any wall
    pub skipped_lines: Vec<SkippedLine>,
}

/// Apportion a uniform line load among supports by tributary width.
///
/// Supports are sorted by location. Each takes from the midpoint to its
/// neighbor on each side; the first and last extend to the span ends, which
/// is how cantilevered span ends are absorbed into the outer supports.
///
/// # Errors
///
/// * `InsufficientSupports` with fewer than two supports
/// * `InvalidSpan` when `span_end_ft` is not strictly after `span_start_ft`
/// * `NegativeTributaryWidth` when support placement produces a negative
///   interval (a configuration error, never silently clamped)
pub fn distribute_load(
    support_positions_ft: &[f64],
    uniform_load_plf: f64,
    span_start_ft: f64,
    span_end_ft: f64,
    axis: &str,
) -> ShearResult<Vec<SupportLoad>> {
    if support_positions_ft.len() < 2 {
        return Err(ShearError::insufficient_supports(
            axis,
            support_positions_ft.len(),
        ));
    }
    if span_end_ft <= span_start_ft {
        return Err(ShearError::invalid_span(span_start_ft, span_end_ft));
    }

    let mut positions = support_positions_ft.to_vec();
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let last = positions.len() - 1;
    let mut loads = Vec::with_capacity(positions.len());
    for (i, &position_ft) in positions.iter().enumerate() {
        let left = if i == 0 {
            span_start_ft
        } else {
            (positions[i - 1] + position_ft) / 2.0
        };
        let right = if i == last {
            span_end_ft
        } else {
            (position_ft + positions[i + 1]) / 2.0
        };

        let tributary_width_ft = right - left;
        if tributary_width_ft < 0.0 {
            return Err(ShearError::negative_tributary_width(
                position_ft,
                tributary_width_ft,
            ));
        }

        loads.push(SupportLoad {
            position_ft,
            tributary_width_ft,
            load_lb: uniform_load_plf * tributary_width_ft,
        });
    }

    Ok(loads)
}

/// Solve the flexible-diaphragm (tributary) shear distribution.
///
/// # Errors
///
/// Propagates the [`distribute_load`] preconditions for each axis: the
/// X-direction distribution needs at least two east-west braced wall lines
/// and a positive Y extent, and mirrored for Y.
pub fn solve(
    system: &WallSystem,
    loads: &AppliedShear,
    diaphragm: &Diaphragm,
) -> ShearResult<FlexibleSolution> {
    let mut solution = FlexibleSolution {
        lines_x: Vec::new(),
        lines_y: Vec::new(),
        walls: system
            .walls()
            .map(|(id, wall)| FlexibleWallShear {
                id,
                label: wall.label.clone(),
                total_x_lb: 0.0,
                total_y_lb: 0.0,
            })
            .collect(),
        skipped_lines: Vec::new(),
    };

    // East-west lines span the Y extent and carry Vx; north-south lines
    // span the X extent and carry Vy.
    let extents = diaphragm.extents;
    let line_loads_x = distribute_axis(
        system,
        Orientation::EastWest,
        loads.vx_lb,
        extents.min_y,
        extents.max_y,
    )?;
    let line_loads_y = distribute_axis(
        system,
        Orientation::NorthSouth,
        loads.vy_lb,
        extents.min_x,
        extents.max_x,
    )?;

    apportion_to_walls(system, Orientation::EastWest, line_loads_x, &mut solution);
    apportion_to_walls(system, Orientation::NorthSouth, line_loads_y, &mut solution);

    Ok(solution)
}

/// Distribute one axis's shear to its braced wall lines.
fn distribute_axis(
    system: &WallSystem,
    orientation: Orientation,
    shear_lb: f64,
    span_start_ft: f64,
    span_end_ft: f64,
) -> ShearResult<Vec<(SupportLoad, Vec<LineMember>)>> {
    let groups = system.lines(orientation).groups();
    let axis = orientation.axis_name();

    if groups.len() < 2 {
        return Err(ShearError::insufficient_supports(axis, groups.len()));
    }
    if span_end_ft <= span_start_ft {
        return Err(ShearError::invalid_span(span_start_ft, span_end_ft));
    }

    let uniform_load_plf = shear_lb / (span_end_ft - span_start_ft);
    let positions: Vec<f64> = groups
        .iter()
        .map(|group| representative_coordinate(system, group))
        .collect();

    let support_loads =
        distribute_load(&positions, uniform_load_plf, span_start_ft, span_end_ft, axis)?;

    // Groups come out of the clusterer in ascending coordinate order and
    // representative coordinates preserve that order, so support loads line
    // up with groups index-for-index after the sort inside distribute_load.
    Ok(support_loads
        .into_iter()
        .zip(groups.iter().cloned())
        .collect())
}

/// Split each line's load among its member walls by rigidity share.
fn apportion_to_walls(
    system: &WallSystem,
    orientation: Orientation,
    line_loads: Vec<(SupportLoad, Vec<LineMember>)>,
    solution: &mut FlexibleSolution,
) {
    for (support, members) in line_loads {
        let wall_ids: Vec<WallId> = members.iter().map(|m| m.wall).collect();
        let total_rigidity: f64 = wall_ids
            .iter()
            .filter_map(|id| system.get(*id))
            .map(|wall| wall.rigidity())
            .sum();

        let line = LineLoad {
            position_ft: support.position_ft,
            tributary_width_ft: support.tributary_width_ft,
            load_lb: support.load_lb,
            walls: wall_ids.clone(),
        };

        if total_rigidity <= 0.0 {
            solution.skipped_lines.push(SkippedLine {
                axis: orientation.axis_name().to_string(),
                position_ft: support.position_ft,
                load_lb: support.load_lb,
                walls: wall_ids,
            });
        } else {
            for id in &wall_ids {
                let Some(wall) = system.get(*id) else { continue };
                let share = support.load_lb * wall.rigidity() / total_rigidity;
                if let Some(entry) = solution.walls.iter_mut().find(|w| w.id == *id) {
                    match orientation {
                        Orientation::EastWest => entry.total_x_lb += share,
                        Orientation::NorthSouth => entry.total_y_lb += share,
                    }
                }
            }
        }

        match orientation {
            Orientation::EastWest => solution.lines_x.push(line),
            Orientation::NorthSouth => solution.lines_y.push(line),
        }
    }
}

/// Representative support coordinate for a braced wall line: the
/// rigidity-weighted mean of its member coordinates, falling back to the
/// arithmetic mean when the line has no rigidity.
fn representative_coordinate(system: &WallSystem, members: &[LineMember]) -> f64 {
    let mut weighted = 0.0;
    let mut total_rigidity = 0.0;
    for member in members {
        if let Some(wall) = system.get(member.wall) {
            weighted += wall.rigidity() * member.coordinate;
            total_rigidity += wall.rigidity();
        }
    }
    if total_rigidity > 0.0 {
        weighted / total_rigidity
    } else {
        members.iter().map(|m| m.coordinate).sum::<f64>() / members.len() as f64
    }
}
