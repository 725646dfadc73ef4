//! # Shearline CLI Application
//!
//! Terminal front end for the shear distribution engine. Prompts for the
//! story shear, runs both diaphragm idealizations on a demo wall layout,
//! and prints the per-wall result tables plus JSON for LLM/API use.

use std::io::{self, BufRead, Write};

use shearline_core::geometry::{Extents, Orientation, Point};
use shearline_core::report::{render_flexible_table, render_rigid_table};
use shearline_core::solvers::{flexible, rigid, AppliedShear, Diaphragm};
use shearline_core::units::{Kips, Pounds};
use shearline_core::walls::Wall;
use shearline_core::Project;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

/// A 40 x 75 ft single-story box with two braced wall lines per direction.
fn demo_project() -> Project {
    let mut project = Project::new("CLI Demo", "26-000", "Shearline");

    let walls = [
        ("W-1", Point::new(0.0, 0.0), Point::new(20.0, 0.0), Orientation::EastWest),
        ("W-2", Point::new(24.0, 2.0), Point::new(40.0, 2.0), Orientation::EastWest),
        ("W-3", Point::new(0.0, 75.0), Point::new(20.0, 75.0), Orientation::EastWest),
        ("W-4", Point::new(0.0, 0.0), Point::new(0.0, 30.0), Orientation::NorthSouth),
        ("W-5", Point::new(40.0, 20.0), Point::new(40.0, 55.0), Orientation::NorthSouth),
    ];
    for (label, start, end, orientation) in walls {
        let wall = Wall::new(label, start, end, 9.0, orientation)
            .expect("demo walls are valid");
        project.add_wall(wall);
    }

    project.diaphragm = Diaphragm::new(
        Point::new(20.0, 37.5),
        Extents::new(0.0, 0.0, 40.0, 75.0),
    );
    project
}

fn main() {
    println!("Shearline CLI - Lateral Shear Distribution");
    println!("==========================================");
    println!();

    let vx_lb = prompt_f64("Enter X-direction story shear (lb) [40000.0]: ", 40_000.0);
    let vy_lb = prompt_f64("Enter Y-direction story shear (lb) [25000.0]: ", 25_000.0);
    let com_x = prompt_f64("Enter center of mass x (ft) [20.0]: ", 20.0);
    let com_y = prompt_f64("Enter center of mass y (ft) [37.5]: ", 37.5);

    let mut project = demo_project();
    project.loads = AppliedShear::new(vx_lb, vy_lb);
    project.diaphragm.center_of_mass = Point::new(com_x, com_y);

    let vx_kips: Kips = Pounds(vx_lb).into();
    let vy_kips: Kips = Pounds(vy_lb).into();
    println!();
    println!(
        "Analyzing demo diaphragm (40 x 75 ft) under Vx = {:.1} k, Vy = {:.1} k...",
        vx_kips.0, vy_kips.0
    );
    println!();

    println!("═══════════════════════════════════════");
    println!("  RIGID DIAPHRAGM");
    println!("═══════════════════════════════════════");
    match rigid::solve(&project.system, &project.loads, project.diaphragm.center_of_mass) {
        Ok(solution) => {
            println!("{}", render_rigid_table(&solution));

            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&solution) {
                println!("{}", json);
            }
        }
        Err(e) => print_error(&e),
    }

    println!();
    println!("═══════════════════════════════════════");
    println!("  FLEXIBLE DIAPHRAGM");
    println!("═══════════════════════════════════════");
    match flexible::solve(&project.system, &project.loads, &project.diaphragm) {
        Ok(solution) => {
            println!("{}", render_flexible_table(&solution));

            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&solution) {
                println!("{}", json);
            }
        }
        Err(e) => print_error(&e),
    }
}

fn print_error(e: &shearline_core::ShearError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(&e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}
