//! Unit height: the height of one line of body text, in native units.

use itertools::Itertools;

use crate::error::{Result, ensure_positive};
use crate::geometry::median;
use crate::model::Component;

/// Keeps the values between the `low` and `high` quantiles (inclusive),
/// with quantiles linearly interpolated between sorted samples.
pub fn quantile_clip(values: &[f64], low: f64, high: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let sorted: Vec<f64> = values.iter().copied().sorted_by(f64::total_cmp).collect();
    let q = |p: f64| {
        let i = (sorted.len() - 1) as f64 * p;
        let (i0, i1) = (i.floor() as usize, i.ceil() as usize);
        if i0 == i1 {
            sorted[i0]
        } else {
            sorted[i0] + (sorted[i1] - sorted[i0]) * (i - i0 as f64)
        }
    };
    let (lo, hi) = (q(low), q(high));
    sorted.into_iter().filter(|&x| x >= lo && x <= hi).collect()
}

/// Median component height after dropping the lowest and highest 10%.
pub fn estimate_unit_height(components: &[Component]) -> Result<f64> {
    let heights: Vec<f64> = components.iter().map(|c| c.bbox.height().max(0.0)).collect();
    let unit = median(&quantile_clip(&heights, 0.1, 0.9));
    ensure_positive("unit_height", unit)
}

/// Height of the first component labelled `label`.
pub fn unit_height_from_label(components: &[Component], label: &str) -> Option<f64> {
    components
        .iter()
        .find(|c| c.kind == label)
        .map(|c| c.bbox.height())
}
