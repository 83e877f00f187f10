//! Scan-line grouping
//!
//! Splits cut segments into vertical and horizontal sets and buckets each set
//! by its quantized cross-axis coordinate. Two tolerances are involved:
//!
//! - the grouping tolerance (user setting) decides orientation and the
//!   quantization step for bucket keys;
//! - [`KEY_EQUALITY_TOLERANCE`] decides whether a quantized key matches an
//!   existing group. Stored keys are never re-quantized, and two groups whose
//!   keys drift within tolerance of each other are not merged later.

use crate::ordering;
use overscan_core::Segment;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Absolute tolerance for matching a candidate key to an existing group key
pub const KEY_EQUALITY_TOLERANCE: f64 = 1e-12;

/// Orientation of a segment relative to the machine axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Constant X, varying Y
    Vertical,
    /// Constant Y, varying X
    Horizontal,
    /// Diagonal or too short on both axes
    Discarded,
}

/// Classify a segment with the grouping tolerance
pub fn classify_orientation(segment: &Segment, tolerance: f64) -> Orientation {
    let (dx, dy) = (segment.dx(), segment.dy());
    if dx <= tolerance && dy > tolerance {
        Orientation::Vertical
    } else if dy <= tolerance && dx > tolerance {
        Orientation::Horizontal
    } else {
        Orientation::Discarded
    }
}

/// Round `value` to the nearest multiple of `tolerance`
///
/// A non-positive tolerance disables quantization.
pub fn quantize(value: f64, tolerance: f64) -> f64 {
    if tolerance <= 0.0 {
        return value;
    }
    (value / tolerance).round() * tolerance
}

/// Segments sharing one scan line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub key: f64,
    pub segments: Vec<Segment>,
}

impl Group {
    fn new(key: f64) -> Self {
        Self {
            key,
            segments: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Groups for one orientation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupCollection {
    groups: Vec<Group>,
}

impl GroupCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the group whose key matches within [`KEY_EQUALITY_TOLERANCE`]
    pub fn find(&self, key: f64) -> Option<usize> {
        self.groups
            .iter()
            .position(|g| (g.key - key).abs() < KEY_EQUALITY_TOLERANCE)
    }

    /// Append a segment to the matching group, creating it if needed
    pub fn insert(&mut self, key: f64, segment: Segment) {
        let index = match self.find(key) {
            Some(index) => index,
            None => {
                self.groups.push(Group::new(key));
                self.groups.len() - 1
            }
        };
        self.groups[index].segments.push(segment);
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut Vec<Group> {
        &mut self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of segments across all groups
    pub fn segment_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }
}

/// Vertical and horizontal groups of one program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisGroups {
    /// Keyed by X
    pub vertical: GroupCollection,
    /// Keyed by Y
    pub horizontal: GroupCollection,
    /// Segments dropped as diagonal or degenerate
    pub discarded: usize,
}

/// Bucket segments into vertical and horizontal groups without sorting
pub fn bucket_segments(segments: &[Segment], tolerance: f64) -> AxisGroups {
    let mut axis_groups = AxisGroups::default();

    for segment in segments {
        match classify_orientation(segment, tolerance) {
            Orientation::Vertical => {
                let key = quantize(0.5 * (segment.x1 + segment.x2), tolerance);
                axis_groups.vertical.insert(key, segment.normalized_y());
            }
            Orientation::Horizontal => {
                let key = quantize(0.5 * (segment.y1 + segment.y2), tolerance);
                axis_groups.horizontal.insert(key, segment.normalized_x());
            }
            Orientation::Discarded => {
                debug!(?segment, "dropping non axis-aligned segment");
                axis_groups.discarded += 1;
            }
        }
    }

    axis_groups
}

/// Bucket segments and put groups and their members in scan order
pub fn group_segments(segments: &[Segment], tolerance: f64) -> AxisGroups {
    let mut axis_groups = bucket_segments(segments, tolerance);
    ordering::sort_vertical(&mut axis_groups.vertical);
    ordering::sort_horizontal(&mut axis_groups.horizontal);

    debug!(
        vertical = axis_groups.vertical.len(),
        horizontal = axis_groups.horizontal.len(),
        discarded = axis_groups.discarded,
        "grouped segments"
    );
    axis_groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_orientation() {
        let tol = 0.01;
        assert_eq!(
            classify_orientation(&Segment::new(0.0, 0.0, 0.0, 10.0), tol),
            Orientation::Vertical
        );
        assert_eq!(
            classify_orientation(&Segment::new(0.0, 0.0, 0.005, -10.0), tol),
            Orientation::Vertical
        );
        assert_eq!(
            classify_orientation(&Segment::new(0.0, 3.0, 10.0, 3.0), tol),
            Orientation::Horizontal
        );
        assert_eq!(
            classify_orientation(&Segment::new(0.0, 0.0, 5.0, 5.0), tol),
            Orientation::Discarded
        );
        assert_eq!(
            classify_orientation(&Segment::new(1.0, 1.0, 1.005, 1.005), tol),
            Orientation::Discarded
        );
    }

    #[test]
    fn test_quantize() {
        assert!((quantize(1.23456, 0.01) - 1.23).abs() < 1e-12);
        assert!((quantize(-0.996, 0.01) - -1.0).abs() < 1e-12);
        assert_eq!(quantize(1.23456, 0.0), 1.23456);
        assert_eq!(quantize(1.23456, -1.0), 1.23456);
    }

    #[test]
    fn test_bucket_merges_jitter() {
        let segments = [
            Segment::new(5.0, 0.0, 5.0, 4.0),
            Segment::new(5.0000004, 6.0, 5.0000004, 9.0),
            Segment::new(7.0, 0.0, 7.0, 1.0),
        ];
        let groups = bucket_segments(&segments, 0.0001);
        assert_eq!(groups.vertical.len(), 2);
        assert_eq!(groups.vertical.groups()[0].len(), 2);
        assert_eq!(groups.horizontal.len(), 0);
    }

    #[test]
    fn test_normalization_on_insert() {
        let segments = [
            Segment::new(2.0, 9.0, 2.0, 1.0),
            Segment::new(8.0, 4.0, 1.0, 4.0),
        ];
        let groups = bucket_segments(&segments, 0.01);
        let v = groups.vertical.groups()[0].segments[0];
        assert_eq!((v.y1, v.y2), (1.0, 9.0));
        let h = groups.horizontal.groups()[0].segments[0];
        assert_eq!((h.x1, h.x2), (1.0, 8.0));
    }

    #[test]
    fn test_diagonals_counted() {
        let segments = [
            Segment::new(0.0, 0.0, 3.0, 4.0),
            Segment::new(0.0, 0.0, 0.0, 4.0),
        ];
        let groups = group_segments(&segments, 0.01);
        assert_eq!(groups.discarded, 1);
        assert_eq!(groups.vertical.segment_count(), 1);
        assert!(groups.horizontal.is_empty());
    }

    #[test]
    fn test_find_uses_fine_tolerance() {
        let mut collection = GroupCollection::new();
        collection.insert(1.0, Segment::new(1.0, 0.0, 1.0, 1.0));
        assert_eq!(collection.find(1.0 + 1e-13), Some(0));
        assert_eq!(collection.find(1.0 + 1e-9), None);
    }

    fn segment_strategy() -> impl Strategy<Value = Segment> {
        (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0)
            .prop_map(|(x1, y1, x2, y2)| Segment::new(x1, y1, x2, y2))
    }

    fn axis_segment_strategy() -> impl Strategy<Value = Segment> {
        prop_oneof![
            (-50i32..50, -50i32..50, -50i32..50)
                .prop_map(|(x, y1, y2)| Segment::new(x as f64, y1 as f64, x as f64, y2 as f64)),
            (-50i32..50, -50i32..50, -50i32..50)
                .prop_map(|(y, x1, x2)| Segment::new(x1 as f64, y as f64, x2 as f64, y as f64)),
            segment_strategy(),
        ]
    }

    proptest! {
        #[test]
        fn prop_orientation_partition(seg in segment_strategy(), tol in 0.0f64..1.0) {
            let orientation = classify_orientation(&seg, tol);
            let vertical = seg.dx() <= tol && seg.dy() > tol;
            let horizontal = seg.dy() <= tol && seg.dx() > tol;
            prop_assert!(!(vertical && horizontal));
            match orientation {
                Orientation::Vertical => prop_assert!(vertical),
                Orientation::Horizontal => prop_assert!(horizontal),
                Orientation::Discarded => prop_assert!(!vertical && !horizontal),
            }
            prop_assert_eq!(orientation, classify_orientation(&seg, tol));
        }

        #[test]
        fn prop_quantize_idempotent(v in -1.0e4f64..1.0e4, tol in 1.0e-4f64..10.0) {
            let once = quantize(v, tol);
            let twice = quantize(once, tol);
            prop_assert!((once - twice).abs() <= 1e-9 * once.abs().max(1.0));
        }

        #[test]
        fn prop_every_segment_accounted_for(segs in prop::collection::vec(axis_segment_strategy(), 0..40)) {
            let groups = group_segments(&segs, 0.01);
            prop_assert_eq!(
                groups.vertical.segment_count() + groups.horizontal.segment_count() + groups.discarded,
                segs.len()
            );
        }

        #[test]
        fn prop_endpoints_normalized(segs in prop::collection::vec(axis_segment_strategy(), 0..40)) {
            let groups = group_segments(&segs, 0.01);
            for group in groups.vertical.iter() {
                prop_assert!(!group.is_empty());
                for seg in &group.segments {
                    prop_assert!(seg.y1 <= seg.y2);
                }
            }
            for group in groups.horizontal.iter() {
                prop_assert!(!group.is_empty());
                for seg in &group.segments {
                    prop_assert!(seg.x1 <= seg.x2);
                }
            }
        }

        #[test]
        fn prop_grouping_deterministic(segs in prop::collection::vec(axis_segment_strategy(), 0..40)) {
            prop_assert_eq!(group_segments(&segs, 0.01), group_segments(&segs, 0.01));
        }
    }
}
