//! # shearline_core - Lateral Shear Distribution Engine
//!
//! `shearline_core` computes how lateral (wind/seismic) story shear applied
//! to a building diaphragm is distributed among discrete vertical bracing
//! elements ("walls") arranged in two orthogonal directions. It is the
//! computational heart of Shearline, with a clean, LLM-friendly API: all
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless solvers**: Pure functions that take a wall system and
//!   loads and return results; nothing is patched incrementally
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Explicit failure**: Degenerate configurations fail the solve
//!   instead of propagating NaN
//!
//! ## Quick Start
//!
//! ```rust
//! use shearline_core::geometry::{Orientation, Point};
//! use shearline_core::solvers::{rigid, AppliedShear};
//! use shearline_core::walls::{Wall, WallSystem};
//!
//! let mut system = WallSystem::new(4.0);
//! system.add_wall(Wall::new("W-1", Point::new(0.0, 0.0), Point::new(20.0, 0.0),
//!     9.0, Orientation::EastWest).unwrap());
//! system.add_wall(Wall::new("W-2", Point::new(0.0, 75.0), Point::new(20.0, 75.0),
//!     9.0, Orientation::EastWest).unwrap());
//! system.add_wall(Wall::new("W-3", Point::new(0.0, 0.0), Point::new(0.0, 30.0),
//!     9.0, Orientation::NorthSouth).unwrap());
//! system.add_wall(Wall::new("W-4", Point::new(40.0, 0.0), Point::new(40.0, 30.0),
//!     9.0, Orientation::NorthSouth).unwrap());
//!
//! let loads = AppliedShear::new(40.0, 0.0);
//! let solution = rigid::solve(&system, &loads, Point::new(7.58, 37.5)).unwrap();
//! assert_eq!(solution.walls.len(), 4);
//! ```
//!
//! ## Modules
//!
//! - [`walls`] - Wall records, braced-wall-line clustering, and the wall system
//! - [`solvers`] - Rigid and flexible diaphragm solvers
//! - [`project`] - Project container, metadata, and settings
//! - [`report`] - Per-wall result tables for display
//! - [`geometry`] - Plan points, orientations, and extents
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod project;
pub mod report;
pub mod solvers;
pub mod units;
pub mod walls;

// Re-export commonly used types at crate root for convenience
pub use errors::{ShearError, ShearResult};
pub use file_io::{load_project, save_project, FileLock};
pub use geometry::{Extents, Orientation, Point};
pub use project::{GlobalSettings, Project, ProjectMetadata};
pub use solvers::{AppliedShear, Diaphragm};
pub use walls::{Wall, WallId, WallSystem};
