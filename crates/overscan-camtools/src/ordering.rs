//! Scan order for grouped segments
//!
//! Members are ordered by their normalized start along the scan axis and
//! groups by key. `sort_by` is stable, so ties keep insertion order.

use crate::grouping::{Group, GroupCollection};
use overscan_core::Segment;

/// Order vertical groups by X key and their members by ascending `y1`
pub fn sort_vertical(collection: &mut GroupCollection) {
    sort_collection(collection, |s| s.y1);
}

/// Order horizontal groups by Y key and their members by ascending `x1`
pub fn sort_horizontal(collection: &mut GroupCollection) {
    sort_collection(collection, |s| s.x1);
}

fn sort_collection(collection: &mut GroupCollection, start: impl Fn(&Segment) -> f64) {
    for group in collection.groups_mut().iter_mut() {
        group
            .segments
            .sort_by(|a, b| start(a).total_cmp(&start(b)));
    }
    sort_groups(collection.groups_mut());
}

/// Order groups by ascending key
pub fn sort_groups(groups: &mut [Group]) {
    groups.sort_by(|a, b| a.key.total_cmp(&b.key));
}
