//! # Result Tables
//!
//! Plain-text tabular views of solver output, for the CLI and any other
//! consumer that wants a per-wall breakdown without re-deriving it from
//! JSON. Columns follow the engineer-facing convention: identifiers first,
//! geometry next, forces last.

use std::fmt::Write;

use crate::solvers::{FlexibleSolution, RigidSolution};

/// Render the rigid-diaphragm per-wall table.
///
/// Columns: id, label, rigidity, x/y offsets from the center of resistance,
/// direct shear per axis, eccentric shear, total.
pub fn render_rigid_table(solution: &RigidSolution) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Center of resistance: ({:.2}, {:.2}) ft",
        solution.center_of_resistance.x, solution.center_of_resistance.y
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Eccentricity: ex = {:.2} ft, ey = {:.2} ft",
        solution.eccentricity_x_ft, solution.eccentricity_y_ft
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Torsional moment: {:.1} ft-lb (CCW positive)",
        solution.torsional_moment_ftlb
    )
    .expect("writing to string cannot fail");
    writeln!(&mut output).expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "{:>4} {:<8} {:>9} {:>9} {:>9} {:>10} {:>10} {:>10} {:>10}",
        "ID", "Wall", "R", "dx (ft)", "dy (ft)", "Vdx (lb)", "Vdy (lb)", "Vt (lb)", "Total (lb)"
    )
    .expect("writing to string cannot fail");
    writeln!(&mut output, "{}", "-".repeat(88)).expect("writing to string cannot fail");

    for wall in &solution.walls {
        writeln!(
            &mut output,
            "{:>4} {:<8} {:>9.3} {:>9.2} {:>9.2} {:>10.1} {:>10.1} {:>10.1} {:>10.1}",
            wall.id.to_string(),
            wall.label,
            wall.rigidity,
            wall.x_offset_ft,
            wall.y_offset_ft,
            wall.direct_x_lb,
            wall.direct_y_lb,
            wall.eccentric_lb,
            wall.total_lb,
        )
        .expect("writing to string cannot fail");
    }

    output
}

/// Render the flexible-diaphragm per-wall table.
///
/// Columns: id, label, tributary load per axis. Skipped (zero-rigidity)
/// lines are listed below the table so their unassigned load is visible.
pub fn render_flexible_table(solution: &FlexibleSolution) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "{:>4} {:<8} {:>10} {:>10}",
        "ID", "Wall", "Vx (lb)", "Vy (lb)"
    )
    .expect("writing to string cannot fail");
    writeln!(&mut output, "{}", "-".repeat(35)).expect("writing to string cannot fail");

    for wall in &solution.walls {
        writeln!(
            &mut output,
            "{:>4} {:<8} {:>10.1} {:>10.1}",
            wall.id.to_string(),
            wall.label,
            wall.total_x_lb,
            wall.total_y_lb,
        )
        .expect("writing to string cannot fail");
    }

    for skipped in &solution.skipped_lines {
        writeln!(
            &mut output,
            "warning: zero-rigidity line on {} axis at {:.2} ft left {:.1} lb unassigned",
            skipped.axis, skipped.position_ft, skipped.load_lb,
        )
        .expect("writing to string cannot fail");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Extents, Orientation, Point};
    use crate::solvers::{flexible, rigid, AppliedShear, Diaphragm};
    use crate::walls::{Wall, WallSystem};

    fn sample_system() -> WallSystem {
        let mut system = WallSystem::new(4.0);
        system.add_wall(
            Wall::new(
                "W-1",
                Point::new(0.0, 0.0),
                Point::new(20.0, 0.0),
                9.0,
                Orientation::EastWest,
            )
            .unwrap(),
        );
        system.add_wall(
            Wall::new(
                "W-2",
                Point::new(0.0, 75.0),
                Point::new(20.0, 75.0),
                9.0,
                Orientation::EastWest,
            )
            .unwrap(),
        );
        system.add_wall(
            Wall::new(
                "W-3",
                Point::new(0.0, 0.0),
                Point::new(0.0, 30.0),
                9.0,
                Orientation::NorthSouth,
            )
            .unwrap(),
        );
        system.add_wall(
            Wall::new(
                "W-4",
                Point::new(40.0, 0.0),
                Point::new(40.0, 30.0),
                9.0,
                Orientation::NorthSouth,
            )
            .unwrap(),
        );
        system
    }

    #[test]
    fn test_rigid_table_contains_walls_and_summary() {
        let system = sample_system();
        let solution = rigid::solve(
            &system,
            &AppliedShear::new(40.0, 0.0),
            Point::new(7.58, 37.5),
        )
        .unwrap();
        let table = render_rigid_table(&solution);

        assert!(table.contains("Center of resistance"));
        assert!(table.contains("Torsional moment"));
        assert!(table.contains("W-1"));
        assert!(table.contains("W-4"));
        assert!(table.contains("Total (lb)"));
    }

    #[test]
    fn test_flexible_table_contains_walls() {
        let system = sample_system();
        let diaphragm = Diaphragm::new(
            Point::new(20.0, 37.5),
            Extents::new(0.0, 0.0, 40.0, 75.0),
        );
        let solution =
            flexible::solve(&system, &AppliedShear::new(40.0, 10.0), &diaphragm).unwrap();
        let table = render_flexible_table(&solution);

        assert!(table.contains("Vx (lb)"));
        assert!(table.contains("W-1"));
        assert!(table.contains("W-4"));
        assert!(!table.contains("warning"));
    }
}
