//! Geometry and interval routines.
//!
//! Provides the primitive types shared by the partitioner and the layout
//! builder:
//! - Axis-aligned boxes (`BBox`) and one-dimensional intervals (`Interval`)
//! - Interval union and strict overlap tests
//! - Gutter (empty band) detection inside a region

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Tolerance used by [`interval_overlap`]. Intervals that merely touch, or
/// share less than this much, do not overlap.
pub const OVERLAP_EPSILON: f64 = 1e-6;

/// Small epsilon for floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// Compares two floats for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Clamps `x` to `[0, 1]`.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// One of the two page axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal axis. A cut along X is made inside a vertical gutter.
    X,
    /// Vertical axis. A cut along Y is made inside a horizontal gutter.
    Y,
}

/// A closed interval `[start, end]` with `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

impl From<[f64; 2]> for Interval {
    fn from([start, end]: [f64; 2]) -> Self {
        Self { start, end }
    }
}

impl From<Interval> for [f64; 2] {
    fn from(iv: Interval) -> Self {
        [iv.start, iv.end]
    }
}

/// An axis-aligned box `(x0, y0, x1, y1)`.
///
/// `y` grows downward, as in screen and image coordinates. Serialized as the
/// array `[x0, y0, x1, y1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Projection of the box onto `axis`.
    pub fn interval(&self, axis: Axis) -> Interval {
        match axis {
            Axis::X => Interval::new(self.x0, self.x1),
            Axis::Y => Interval::new(self.y0, self.y1),
        }
    }

    /// Returns a copy whose projection on `axis` is replaced by `iv`.
    pub fn with_interval(&self, axis: Axis, iv: Interval) -> Self {
        match axis {
            Axis::X => Self {
                x0: iv.start,
                x1: iv.end,
                ..*self
            },
            Axis::Y => Self {
                y0: iv.start,
                y1: iv.end,
                ..*self
            },
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }

    /// True when `x0 <= x1` and `y0 <= y1` and every coordinate is finite.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.x0 <= self.x1 && self.y0 <= self.y1
    }

    /// True when `other` lies entirely inside `self` (boundaries included).
    pub fn contains(&self, other: &BBox) -> bool {
        self.x0 <= other.x0 && self.y0 <= other.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Intersection with `other`, if it has positive area.
    pub fn clip(&self, other: &BBox) -> Option<BBox> {
        let clipped = BBox {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (clipped.x1 > clipped.x0 && clipped.y1 > clipped.y0).then_some(clipped)
    }

    /// Scales each axis independently.
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        Self {
            x0: self.x0 * sx,
            y0: self.y0 * sy,
            x1: self.x1 * sx,
            y1: self.y1 * sy,
        }
    }
}

impl From<[f64; 4]> for BBox {
    fn from([x0, y0, x1, y1]: [f64; 4]) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

impl From<BBox> for [f64; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// Trait for objects that have a bounding box.
pub trait HasBBox {
    fn bbox(&self) -> BBox;
}

impl HasBBox for BBox {
    fn bbox(&self) -> BBox {
        *self
    }
}

impl<T: HasBBox + ?Sized> HasBBox for &T {
    fn bbox(&self) -> BBox {
        (**self).bbox()
    }
}

/// True iff `a` and `b` share more than [`OVERLAP_EPSILON`].
///
/// Touching intervals do not overlap, so two regions that share a boundary
/// never both claim a component sitting on it.
#[inline]
pub fn interval_overlap(a: Interval, b: Interval) -> bool {
    a.end.min(b.end) > a.start.max(b.start) + OVERLAP_EPSILON
}

/// Smallest box containing every input box, or `None` for empty input.
pub fn union_of_boxes<I, T>(boxes: I) -> Option<BBox>
where
    I: IntoIterator<Item = T>,
    T: HasBBox,
{
    boxes.into_iter().map(|b| b.bbox()).reduce(|acc, b| BBox {
        x0: acc.x0.min(b.x0),
        y0: acc.y0.min(b.y0),
        x1: acc.x1.max(b.x1),
        y1: acc.y1.max(b.y1),
    })
}

/// Result of [`union_intervals`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntervalUnion {
    /// Sorted, pairwise disjoint intervals.
    pub merged: Vec<Interval>,
    /// Sum of merged lengths.
    pub total: f64,
}

/// Merges overlapping or touching intervals.
///
/// Intervals are sorted by start (then end) and folded greedily: the next
/// interval joins the running one when its start is `<=` the running end.
pub fn union_intervals(intervals: &[Interval]) -> IntervalUnion {
    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for iv in intervals
        .iter()
        .copied()
        .sorted_by(|a, b| a.start.total_cmp(&b.start).then(a.end.total_cmp(&b.end)))
    {
        if let Some(cur) = merged.last_mut() {
            if iv.start <= cur.end {
                cur.end = cur.end.max(iv.end);
                continue;
            }
        }
        merged.push(iv);
    }
    let total = merged.iter().map(|iv| iv.len().max(0.0)).sum();
    IntervalUnion { merged, total }
}

/// Empty bands along `axis` inside `region`.
///
/// Boxes are clipped to the region; only those with a positive-area
/// intersection contribute. The result is the complement, within the
/// region's extent on `axis`, of the union of their projections. Gaps of
/// zero width are dropped, and a region with no contributing box has no
/// gutters.
pub fn gutters<T: HasBBox>(region: BBox, boxes: &[T], axis: Axis) -> Vec<Interval> {
    let projections: Vec<Interval> = boxes
        .iter()
        .filter_map(|b| region.clip(&b.bbox()))
        .map(|clipped| clipped.interval(axis))
        .collect();
    let IntervalUnion { merged, .. } = union_intervals(&projections);
    if merged.is_empty() {
        return Vec::new();
    }

    let span = region.interval(axis);
    let mut gaps = Vec::new();
    let mut cursor = span.start;
    for iv in &merged {
        if iv.start > cursor {
            gaps.push(Interval::new(cursor, iv.start));
        }
        cursor = cursor.max(iv.end);
    }
    if cursor < span.end {
        gaps.push(Interval::new(cursor, span.end));
    }
    gaps.retain(|g| g.len() > 0.0);
    gaps
}

/// Horizontal empty bands (candidates for a cut along Y).
pub fn horizontal_gutters<T: HasBBox>(region: BBox, boxes: &[T]) -> Vec<Interval> {
    gutters(region, boxes, Axis::Y)
}

/// Vertical empty bands (candidates for a cut along X).
pub fn vertical_gutters<T: HasBBox>(region: BBox, boxes: &[T]) -> Vec<Interval> {
    gutters(region, boxes, Axis::X)
}

/// Median of `values`; the mean of the two middle values for even counts.
/// Returns 0 for empty input.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted: Vec<f64> = values.iter().copied().sorted_by(f64::total_cmp).collect();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        0.5 * (sorted[mid - 1] + sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(a: f64, b: f64) -> Interval {
        Interval::new(a, b)
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert!(!interval_overlap(iv(0.0, 5.0), iv(5.0, 10.0)));
        assert!(interval_overlap(iv(0.0, 5.0), iv(4.0, 10.0)));
        assert!(!interval_overlap(iv(0.0, 5.0), iv(5.0 - 1e-7, 10.0)));
    }

    #[test]
    fn union_of_boxes_empty_is_none() {
        let boxes: [BBox; 0] = [];
        assert_eq!(union_of_boxes(boxes.iter()), None);
    }

    #[test]
    fn union_intervals_sorts_unordered_input() {
        let u = union_intervals(&[iv(6.0, 10.0), iv(1.0, 5.0), iv(2.0, 3.0)]);
        assert_eq!(u.merged, vec![iv(1.0, 5.0), iv(6.0, 10.0)]);
        assert_eq!(u.total, 8.0);
    }

    #[test]
    fn gutters_ignore_boxes_outside_region() {
        let region = BBox::new(0.0, 0.0, 10.0, 10.0);
        let boxes = [BBox::new(2.0, 2.0, 4.0, 4.0), BBox::new(20.0, 2.0, 30.0, 4.0)];
        assert_eq!(
            vertical_gutters(region, &boxes),
            vec![iv(0.0, 2.0), iv(4.0, 10.0)]
        );
    }

    #[test]
    fn gutters_skip_zero_area_boxes() {
        let region = BBox::new(0.0, 0.0, 10.0, 10.0);
        let boxes = [BBox::new(5.0, 0.0, 5.0, 10.0)];
        assert!(vertical_gutters(region, &boxes).is_empty());
    }

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }
}
