//! Tolerance-based edge snapping within a column.
//!
//! Near-equal coordinates are clustered into buckets and every edge close
//! enough to its bucket's median is moved onto it.

use itertools::Itertools;

use crate::geometry::{BBox, median};

/// A cluster of near-equal coordinates and its representative value.
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    pub rep: f64,
    pub members: Vec<f64>,
}

impl Bucket {
    fn holds_near(&self, v: f64, tolerance: f64) -> bool {
        self.members.iter().any(|m| (m - v).abs() <= tolerance)
    }
}

/// Snap tolerance for a given unit height: 30% of it, but at least half a unit.
pub fn snap_epsilon(unit_height: f64) -> f64 {
    (0.3 * unit_height).max(0.5)
}

/// Cluster a list of values based on tolerance.
///
/// Values are sorted and each one joins the latest bucket when it lies within
/// `tolerance` of that bucket's most recently added value, so a bucket may
/// drift further than `tolerance` end to end.
pub fn cluster_list(xs: &[f64], tolerance: f64) -> Vec<Vec<f64>> {
    let mut groups: Vec<Vec<f64>> = Vec::new();
    for x in xs.iter().copied().sorted_by(f64::total_cmp) {
        if let Some(current) = groups.last_mut() {
            if current.last().is_some_and(|last| (x - last).abs() <= tolerance) {
                current.push(x);
                continue;
            }
        }
        groups.push(vec![x]);
    }
    groups
}

/// Buckets `values` at `2 * eps` and takes each bucket's median as its
/// representative.
pub fn bucket_snap(values: &[f64], eps: f64) -> Vec<Bucket> {
    cluster_list(values, 2.0 * eps)
        .into_iter()
        .map(|members| Bucket {
            rep: median(&members),
            members,
        })
        .collect()
}

/// Snaps `v` to its bucket's representative.
///
/// The bucket is the first one holding a value within `2 * eps` of `v`; the
/// snap only happens when the representative itself is within `eps`.
pub fn snap_value(buckets: &[Bucket], v: f64, eps: f64) -> f64 {
    match buckets.iter().find(|b| b.holds_near(v, 2.0 * eps)) {
        Some(b) if (b.rep - v).abs() <= eps => b.rep,
        _ => v,
    }
}

/// Snaps the four edges of each box independently against the others in the
/// same column. Returns the adjusted boxes in input order.
pub fn snap_boxes(boxes: &[BBox], eps: f64) -> Vec<BBox> {
    if boxes.is_empty() {
        return Vec::new();
    }
    let edge = |f: fn(&BBox) -> f64| -> Vec<Bucket> {
        let values: Vec<f64> = boxes.iter().map(f).collect();
        bucket_snap(&values, eps)
    };
    let left = edge(|b| b.x0);
    let right = edge(|b| b.x1);
    let top = edge(|b| b.y0);
    let bottom = edge(|b| b.y1);

    boxes
        .iter()
        .map(|b| {
            let mut x0 = snap_value(&left, b.x0, eps);
            let mut x1 = snap_value(&right, b.x1, eps);
            let mut y0 = snap_value(&top, b.y0, eps);
            let mut y1 = snap_value(&bottom, b.y1, eps);
            if x1 < x0 {
                tracing::warn!(x0, x1, "snapping inverted horizontal edges");
                std::mem::swap(&mut x0, &mut x1);
            }
            if y1 < y0 {
                tracing::warn!(y0, y1, "snapping inverted vertical edges");
                std::mem::swap(&mut y0, &mut y1);
            }
            BBox { x0, y0, x1, y1 }
        })
        .collect()
}
