//! Gutter scoring: picks the single best place to cut a region.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::geometry::{Axis, BBox, EPSILON, Interval};
use crate::params::validate_centrality_weight;

/// The winning gutter of [`best_split`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplitChoice {
    /// `X` for a vertical gutter, `Y` for a horizontal one.
    pub axis: Axis,
    /// Index into the gutter list of that axis.
    pub index: usize,
    pub score: f64,
}

/// Normalized distance of a gutter's midpoint from the region center:
/// 0 when centered, 1 at either edge.
pub fn centrality(gutter: Interval, span: Interval) -> f64 {
    let half = span.len() / 2.0;
    if half <= 0.0 {
        return 0.0;
    }
    ((gutter.midpoint() - span.midpoint()).abs() / half).min(1.0)
}

/// `size_fraction * (1 - centrality_weight * centrality)`.
pub fn gutter_score(gutter: Interval, span: Interval, centrality_weight: f64) -> f64 {
    let extent = span.len();
    if extent <= 0.0 {
        return 0.0;
    }
    let size_fraction = gutter.len() / extent;
    size_fraction * (1.0 - centrality_weight * centrality(gutter, span))
}

/// Chooses the best gutter across both axes.
///
/// Candidates are visited vertical gutters first, then horizontal ones, each
/// in list order. A later candidate takes over only if it scores higher by
/// more than [`EPSILON`], or if the scores tie and its gutter is strictly
/// larger in absolute size. The same rule applies to both axes, so on a full
/// tie the earliest candidate wins.
pub fn best_split(
    region: BBox,
    v_gutters: &[Interval],
    h_gutters: &[Interval],
    centrality_weight: f64,
) -> Result<SplitChoice> {
    validate_centrality_weight(centrality_weight)?;

    let candidates = v_gutters
        .iter()
        .enumerate()
        .map(|(i, g)| (Axis::X, i, *g))
        .chain(h_gutters.iter().enumerate().map(|(i, g)| (Axis::Y, i, *g)));

    let mut best: Option<(SplitChoice, f64)> = None;
    for (axis, index, gutter) in candidates {
        let score = gutter_score(gutter, region.interval(axis), centrality_weight);
        let size = gutter.len();
        tracing::trace!(?axis, index, score, size, "gutter candidate");

        let wins = match &best {
            None => true,
            Some((cur, cur_size)) => {
                score > cur.score + EPSILON
                    || ((score - cur.score).abs() <= EPSILON && size > cur_size + EPSILON)
            }
        };
        if wins {
            best = Some((SplitChoice { axis, index, score }, size));
        }
    }

    best.map(|(choice, _)| choice)
        .ok_or(LayoutError::NoCandidateGutters)
}
