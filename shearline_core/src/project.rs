//! # Project Data Structures
//!
//! The `Project` struct is the root container for one lateral analysis.
//! Projects serialize to `.swl` (Shearline) files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (clustering tolerance)
//! ├── system: WallSystem (the bracing inventory)
//! ├── diaphragm: Diaphragm (center of mass, plan extents)
//! └── loads: AppliedShear (story shear per axis)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use shearline_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "26-042", "ACME Corp");
//!
//! // Serialize to JSON (see file_io for atomic saves)
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::solvers::{AppliedShear, Diaphragm};
use crate::walls::{Wall, WallId, WallSystem};

/// Current schema version for .swl files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Braced-wall-line clustering tolerance applied when a project does not
/// override it (ft). Four feet matches common braced-wall-line practice.
pub const DEFAULT_CLUSTER_TOLERANCE_FT: f64 = 4.0;

/// Root project container.
///
/// This is the top-level struct that gets serialized to `.swl` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Global settings (clustering tolerance)
    pub settings: GlobalSettings,

    /// The bracing inventory
    pub system: WallSystem,

    /// Diaphragm description: center of mass and plan extents
    pub diaphragm: Diaphragm,

    /// Story shear applied at the center of mass
    pub loads: AppliedShear,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "26-001")
    /// * `client` - Client name
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let settings = GlobalSettings::default();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            system: WallSystem::new(settings.cluster_tolerance_ft),
            settings,
            diaphragm: Diaphragm::default(),
            loads: AppliedShear::default(),
        }
    }

    /// Add a wall to the project's system, returning its assigned id.
    pub fn add_wall(&mut self, wall: Wall) -> WallId {
        let id = self.system.add_wall(wall);
        self.touch();
        id
    }

    /// Remove a wall by id, returning it if it existed.
    pub fn remove_wall(&mut self, id: WallId) -> Option<Wall> {
        let wall = self.system.remove_wall(id);
        if wall.is_some() {
            self.touch();
        }
        wall
    }

    /// Update the modified timestamp to now.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

/// Project metadata stored at the top of every .swl file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version of the file format
    pub version: String,
    /// Responsible engineer
    pub engineer: String,
    /// Job/project number
    pub job_id: String,
    /// Client name
    pub client: String,
    /// When the project was created
    pub created: DateTime<Utc>,
    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global settings that apply across the whole project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Braced-wall-line clustering tolerance (ft)
    pub cluster_tolerance_ft: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            cluster_tolerance_ft: DEFAULT_CLUSTER_TOLERANCE_FT,
        }
    }
}
