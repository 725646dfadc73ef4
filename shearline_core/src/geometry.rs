//! # Plan Geometry Primitives
//!
//! Minimal 2-D types for describing a building plan: points, the two
//! orthogonal wall orientations, and axis-aligned extents. All coordinates
//! are in feet in a +x-right, +y-up frame.
//!
//! ## Example
//!
//! ```rust
//! use shearline_core::geometry::{Point, Orientation};
//!
//! let a = Point::new(0.0, 0.0);
//! let b = Point::new(20.0, 0.0);
//! assert_eq!(a.distance_to(b), 20.0);
//! assert_eq!(a.midpoint(b), Point::new(10.0, 0.0));
//! assert_eq!(Orientation::EastWest.code(), "EW");
//! ```

use serde::{Deserialize, Serialize};

/// Position in the building plan, measured in feet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the global X axis (east positive)
    pub x: f64,
    /// Distance along the global Y axis (north positive)
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Midpoint between this point and another.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// One of the two orthogonal bracing directions.
///
/// An east-west wall runs along the X axis and resists shear applied in X;
/// its braced-wall-line coordinate is its (constant) Y position. A
/// north-south wall is the mirror case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Runs along X, resists X-direction shear, clusters on Y
    EastWest,
    /// Runs along Y, resists Y-direction shear, clusters on X
    NorthSouth,
}

impl Orientation {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Orientation::EastWest => "East-West",
            Orientation::NorthSouth => "North-South",
        }
    }

    /// Short abbreviation used in tables and the wall export format
    pub fn code(&self) -> &'static str {
        match self {
            Orientation::EastWest => "EW",
            Orientation::NorthSouth => "NS",
        }
    }

    /// Parse the abbreviation used by [`code`](Orientation::code).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EW" => Some(Orientation::EastWest),
            "NS" => Some(Orientation::NorthSouth),
            _ => None,
        }
    }

    /// The name of the global axis this orientation resists load along
    pub fn axis_name(&self) -> &'static str {
        match self {
            Orientation::EastWest => "x",
            Orientation::NorthSouth => "y",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Axis-aligned bounding box of the diaphragm, in feet.
///
/// The flexible solver reads the extent perpendicular to each set of braced
/// wall lines as the simple-beam span.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extents {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extents {
    /// Create extents from corner coordinates.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Extents {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Width of the diaphragm along X (ft)
    pub fn x_span(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Depth of the diaphragm along Y (ft)
    pub fn y_span(&self) -> f64 {
        self.max_y - self.min_y
    }
}
