//! # Wall Record
//!
//! Immutable geometric/material description of one bracing segment. All
//! derived quantities (length, center, rigidity, first moments) are computed
//! on read rather than stored, so a record can never hold stale geometry.
//!
//! ## Rigidity
//!
//! Rigidity uses the standard shear-wall flexibility formula
//!
//! ```text
//! R = 1 / (0.4·(h/L)³ + 0.3·(h/L))
//! ```
//!
//! where `h` is wall height and `L` is wall length, both in feet. Short,
//! tall walls are flexible; long, squat walls are stiff.
//!
//! ## Example
//!
//! ```rust
//! use shearline_core::geometry::{Orientation, Point};
//! use shearline_core::walls::Wall;
//!
//! let wall = Wall::new(
//!     "W-1",
//!     Point::new(0.0, 0.0),
//!     Point::new(20.0, 0.0),
//!     9.0,
//!     Orientation::EastWest,
//! ).unwrap();
//!
//! assert_eq!(wall.length_ft(), 20.0);
//! assert!((wall.rigidity() - 5.8326).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ShearError, ShearResult};
use crate::geometry::{Orientation, Point};

/// One bracing segment in the plan.
///
/// Construction normalizes endpoint order so that displays are
/// deterministic: an east-west wall stores the smaller-x endpoint as
/// `start`, a north-south wall the smaller-y endpoint. The ordering has no
/// effect on any derived quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// User-provided label for display (e.g., "W-1")
    pub label: String,
    /// First endpoint (ft)
    pub start: Point,
    /// Second endpoint (ft)
    pub end: Point,
    /// Wall height (ft)
    pub height_ft: f64,
    /// Which of the two orthogonal bracing directions this wall belongs to
    pub orientation: Orientation,
}

impl Wall {
    /// Create a validated wall record.
    ///
    /// # Errors
    ///
    /// * `InvalidGeometry` if the endpoints coincide (a zero-length wall
    ///   would otherwise poison every downstream rigidity sum)
    /// * `InvalidGeometry` if the height is not positive
    pub fn new(
        label: impl Into<String>,
        start: Point,
        end: Point,
        height_ft: f64,
        orientation: Orientation,
    ) -> ShearResult<Self> {
        let label = label.into();

        if start == end {
            return Err(ShearError::invalid_geometry(
                label.as_str(),
                format!("start and end points coincide at ({}, {})", start.x, start.y),
            ));
        }
        if height_ft <= 0.0 {
            return Err(ShearError::invalid_geometry(
                label.as_str(),
                format!("height {} ft must be positive", height_ft),
            ));
        }

        let (start, end) = normalize_endpoints(start, end, orientation);

        Ok(Wall {
            label,
            start,
            end,
            height_ft,
            orientation,
        })
    }

    /// Wall length (ft), the Euclidean distance between endpoints.
    pub fn length_ft(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Unit direction vector from `start` to `end`.
    pub fn unit_direction(&self) -> (f64, f64) {
        let length = self.length_ft();
        (
            (self.end.x - self.start.x) / length,
            (self.end.y - self.start.y) / length,
        )
    }

    /// Center point of the wall (ft).
    pub fn center(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Wall rigidity, `1 / (0.4·(h/L)³ + 0.3·(h/L))`.
    ///
    /// Degenerates to 0 for a zero-length wall; the constructor rejects
    /// those, so a stored record always has positive rigidity.
    pub fn rigidity(&self) -> f64 {
        let length = self.length_ft();
        if length == 0.0 {
            return 0.0;
        }
        let ratio = self.height_ft / length;
        1.0 / (0.4 * ratio.powi(3) + 0.3 * ratio)
    }

    /// First moment of rigidity about the Y axis: rigidity × center x.
    ///
    /// Summed over north-south walls to locate the center of resistance in x.
    pub fn rigidity_moment_x(&self) -> f64 {
        self.rigidity() * self.center().x
    }

    /// First moment of rigidity about the X axis: rigidity × center y.
    ///
    /// Summed over east-west walls to locate the center of resistance in y.
    pub fn rigidity_moment_y(&self) -> f64 {
        self.rigidity() * self.center().y
    }

    /// The one-dimensional coordinate used for braced-wall-line clustering:
    /// center y for an east-west wall, center x for a north-south wall.
    pub fn line_coordinate(&self) -> f64 {
        match self.orientation {
            Orientation::EastWest => self.center().y,
            Orientation::NorthSouth => self.center().x,
        }
    }
}

/// Order endpoints for deterministic display: smaller x first for east-west
/// walls, smaller y first for north-south walls.
fn normalize_endpoints(start: Point, end: Point, orientation: Orientation) -> (Point, Point) {
    let swap = match orientation {
        Orientation::EastWest => end.x < start.x,
        Orientation::NorthSouth => end.y < start.y,
    };
    if swap {
        (end, start)
    } else {
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ew_wall(length_ft: f64, height_ft: f64) -> Wall {
        Wall::new(
            "test",
            Point::new(0.0, 0.0),
            Point::new(length_ft, 0.0),
            height_ft,
            Orientation::EastWest,
        )
        .unwrap()
    }

    #[test]
    fn test_rigidity_reference_value() {
        // 20 ft long, 9 ft tall: h/L = 0.45
        // R = 1 / (0.4*0.45^3 + 0.3*0.45) = 1 / 0.17145 = 5.8326...
        let wall = ew_wall(20.0, 9.0);
        assert!((wall.rigidity() - 1.0 / 0.171_45).abs() < 1e-9);
    }

    #[test]
    fn test_rigidity_increases_with_length() {
        let short = ew_wall(10.0, 9.0);
        let long = ew_wall(20.0, 9.0);
        let longer = ew_wall(40.0, 9.0);
        assert!(long.rigidity() > short.rigidity());
        assert!(longer.rigidity() > long.rigidity());
    }

    #[test]
    fn test_rigidity_decreases_with_height() {
        let squat = ew_wall(20.0, 8.0);
        let tall = ew_wall(20.0, 10.0);
        assert!(squat.rigidity() > tall.rigidity());
    }

    #[test]
    fn test_coincident_endpoints_rejected() {
        let result = Wall::new(
            "W-bad",
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            9.0,
            Orientation::EastWest,
        );
        match result {
            Err(ShearError::InvalidGeometry { label, .. }) => assert_eq!(label, "W-bad"),
            other => panic!("expected InvalidGeometry, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_height_rejected() {
        let result = Wall::new(
            "W-flat",
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            0.0,
            Orientation::EastWest,
        );
        assert!(matches!(result, Err(ShearError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_endpoint_normalization() {
        let ew = Wall::new(
            "W-ew",
            Point::new(12.0, 3.0),
            Point::new(2.0, 3.0),
            9.0,
            Orientation::EastWest,
        )
        .unwrap();
        assert_eq!(ew.start, Point::new(2.0, 3.0));
        assert_eq!(ew.end, Point::new(12.0, 3.0));

        let ns = Wall::new(
            "W-ns",
            Point::new(4.0, 30.0),
            Point::new(4.0, 10.0),
            9.0,
            Orientation::NorthSouth,
        )
        .unwrap();
        assert_eq!(ns.start, Point::new(4.0, 10.0));
        assert_eq!(ns.end, Point::new(4.0, 30.0));
    }

    #[test]
    fn test_center_and_direction() {
        let wall = Wall::new(
            "W-1",
            Point::new(0.0, 4.0),
            Point::new(16.0, 4.0),
            9.0,
            Orientation::EastWest,
        )
        .unwrap();
        assert_eq!(wall.center(), Point::new(8.0, 4.0));
        let (dx, dy) = wall.unit_direction();
        assert!((dx - 1.0).abs() < 1e-12);
        assert!(dy.abs() < 1e-12);
    }

    #[test]
    fn test_line_coordinate_by_orientation() {
        let ew = ew_wall(20.0, 9.0);
        assert_eq!(ew.line_coordinate(), 0.0);

        let ns = Wall::new(
            "N-1",
            Point::new(7.0, 0.0),
            Point::new(7.0, 15.0),
            9.0,
            Orientation::NorthSouth,
        )
        .unwrap();
        assert_eq!(ns.line_coordinate(), 7.0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let wall = ew_wall(20.0, 9.0);
        let json = serde_json::to_string(&wall).unwrap();
        let roundtrip: Wall = serde_json::from_str(&json).unwrap();
        assert_eq!(wall, roundtrip);
    }
}
