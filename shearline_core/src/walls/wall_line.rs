//! # Braced-Wall-Line Clusterer
//!
//! Groups the one-dimensional centerline coordinates of same-orientation
//! walls into braced wall lines: walls whose centerlines fall within a
//! tolerance band are treated as one load-sharing line.
//!
//! ## Algorithm
//!
//! A single left-to-right greedy pass over the sorted coordinates. The
//! first coordinate anchors a group; each subsequent coordinate joins the
//! current group if it lies within `tolerance` of the group's *anchor*
//! (the first member - the anchor never advances), otherwise it starts a
//! new group. O(n log n) for the sort plus O(n) for the scan.
//!
//! The grouping is re-derived in full on every mutation. There is no
//! incremental insertion into an existing group; partial updates are where
//! stale-cluster bugs come from.
//!
//! ## Example
//!
//! ```rust
//! use shearline_core::walls::{WallId, WallLines};
//!
//! let mut lines = WallLines::new(5.0);
//! for (i, coord) in [10.0, 13.0, 15.0, 22.0].iter().enumerate() {
//!     lines.add(*coord, WallId(i as u32));
//! }
//! // 10, 13, 15 are all within 5.0 of the anchor 10; 22 is not.
//! assert_eq!(lines.groups().len(), 2);
//! ```

use super::WallId;

/// One coordinate-bearing record in a braced wall line: the clustering
/// coordinate plus a back-reference to the contributing wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMember {
    /// Centerline coordinate (ft): y for east-west walls, x for north-south
    pub coordinate: f64,
    /// The wall this coordinate came from
    pub wall: WallId,
}

/// Clusters wall centerline coordinates into braced wall lines.
///
/// Owned by the wall system, one instance per orientation. Groups are
/// rebuilt from scratch on every `add`/`remove`/`rebuild` call.
#[derive(Debug, Clone, Default)]
pub struct WallLines {
    tolerance_ft: f64,
    members: Vec<LineMember>,
    groups: Vec<Vec<LineMember>>,
}

impl WallLines {
    /// Create an empty clusterer with the given tolerance band (ft).
    pub fn new(tolerance_ft: f64) -> Self {
        WallLines {
            tolerance_ft,
            members: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// The clustering tolerance (ft).
    pub fn tolerance_ft(&self) -> f64 {
        self.tolerance_ft
    }

    /// Add a coordinate record and regroup.
    pub fn add(&mut self, coordinate: f64, wall: WallId) {
        self.members.push(LineMember { coordinate, wall });
        self.rebuild();
    }

    /// Remove the record contributed by `wall` (if any) and regroup.
    pub fn remove(&mut self, wall: WallId) {
        self.members.retain(|m| m.wall != wall);
        self.rebuild();
    }

    /// Drop all records and groups.
    pub fn clear(&mut self) {
        self.members.clear();
        self.groups.clear();
    }

    /// Re-derive the grouping from the current records.
    ///
    /// Sorts ascending by coordinate (ties broken by wall id so the result
    /// is deterministic), then runs the greedy first-member-anchored scan.
    pub fn rebuild(&mut self) {
        let mut sorted = self.members.clone();
        sorted.sort_by(|a, b| {
            a.coordinate
                .partial_cmp(&b.coordinate)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.wall.0.cmp(&b.wall.0))
        });

        self.groups.clear();
        let mut anchor = f64::NAN;
        for member in sorted {
            let in_band = (member.coordinate - anchor).abs() <= self.tolerance_ft;
            if self.groups.is_empty() || !in_band {
                anchor = member.coordinate;
                self.groups.push(vec![member]);
            } else {
                // anchor stays at the group's first member
                self.groups.last_mut().expect("group just pushed").push(member);
            }
        }
    }

    /// Ordered groups of coordinate records, each group non-empty and
    /// contiguous in sorted order. Zero records produce zero groups.
    pub fn groups(&self) -> &[Vec<LineMember>] {
        &self.groups
    }

    /// Number of braced wall lines.
    pub fn line_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of coordinate records across all lines.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
