//! Serpentine toolpath planning with overscan
//!
//! Each group is cut as one pass. The pass starts with a rapid to a point
//! `overscan` before the group's first cut and ends with a rapid to a point
//! `overscan` past its last cut, so the head is at speed over the whole cut.
//! Successive groups alternate direction.

use crate::grouping::{Group, GroupCollection};
use overscan_core::{Point, Segment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis the head travels along while cutting a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanAxis {
    /// Columns keyed by X, scanned along Y
    Vertical,
    /// Rows keyed by Y, scanned along X
    Horizontal,
}

impl ScanAxis {
    /// Coordinate along the scan direction
    fn along(self, p: Point) -> f64 {
        match self {
            ScanAxis::Vertical => p.y,
            ScanAxis::Horizontal => p.x,
        }
    }

    /// `p` moved by `distance` along the scan direction
    fn offset(self, p: Point, distance: f64) -> Point {
        match self {
            ScanAxis::Vertical => Point::new(p.x, p.y + distance),
            ScanAxis::Horizontal => Point::new(p.x + distance, p.y),
        }
    }
}

impl fmt::Display for ScanAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// One step of the planned toolpath
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ToolpathMove {
    /// Marks the start of a group pass
    GroupStart {
        axis: ScanAxis,
        key: f64,
        /// Upward for vertical groups, rightward for horizontal ones
        forward: bool,
    },
    Rapid(Point),
    Cut(Point),
}

impl ToolpathMove {
    /// Comment text describing a group start
    pub fn describe(&self) -> Option<String> {
        match *self {
            ToolpathMove::GroupStart { axis, key, forward } => Some(match axis {
                ScanAxis::Vertical => format!(
                    "V column X={:.4} direction: {}",
                    key,
                    if forward { "up" } else { "down" }
                ),
                ScanAxis::Horizontal => format!(
                    "H row Y={:.4} direction: {}",
                    key,
                    if forward { "right" } else { "left" }
                ),
            }),
            _ => None,
        }
    }
}

/// Plans serpentine passes over sorted groups
#[derive(Debug, Clone, Copy)]
pub struct ToolpathPlanner {
    overscan: f64,
}

impl ToolpathPlanner {
    pub fn new(overscan: f64) -> Self {
        Self { overscan }
    }

    /// Plan every group of a collection, alternating direction
    ///
    /// The collection must already be in scan order.
    pub fn plan(&self, collection: &GroupCollection, axis: ScanAxis) -> Vec<ToolpathMove> {
        let mut moves = Vec::with_capacity(collection.segment_count() * 2 + collection.len() * 3);
        let mut forward = true;

        for group in collection.iter() {
            if group.is_empty() {
                continue;
            }
            self.plan_group(group, axis, forward, &mut moves);
            forward = !forward;
        }

        moves
    }

    fn plan_group(&self, group: &Group, axis: ScanAxis, forward: bool, moves: &mut Vec<ToolpathMove>) {
        let segments = &group.segments;
        let (Some(first), Some(end)) = (segments.first(), furthest_segment(segments, axis)) else {
            return;
        };
        let lead_in = axis.offset(first.start(), -self.overscan);
        let lead_out = axis.offset(end.end(), self.overscan);

        moves.push(ToolpathMove::GroupStart {
            axis,
            key: group.key,
            forward,
        });

        if forward {
            moves.push(ToolpathMove::Rapid(lead_in));
            for seg in segments {
                moves.push(ToolpathMove::Rapid(seg.start()));
                moves.push(ToolpathMove::Cut(seg.end()));
            }
            moves.push(ToolpathMove::Rapid(lead_out));
        } else {
            moves.push(ToolpathMove::Rapid(lead_out));
            for seg in segments.iter().rev() {
                moves.push(ToolpathMove::Rapid(seg.end()));
                moves.push(ToolpathMove::Cut(seg.start()));
            }
            moves.push(ToolpathMove::Rapid(lead_in));
        }
    }
}

/// Segment whose end lies furthest along the scan axis; the last one on ties
fn furthest_segment(segments: &[Segment], axis: ScanAxis) -> Option<&Segment> {
    segments
        .iter()
        .max_by(|a, b| axis.along(a.end()).total_cmp(&axis.along(b.end())))
}
