//! Page pipeline: unit height, XY-cut, then reading columns.
//!
//! - `infer_layout()` - Lay out a single page
//! - `infer_layouts()` - Lay out many pages in parallel, keeping input order

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result, ensure_positive};
use crate::layout::{LayoutTree, build_layout_tree, estimate_unit_height, unit_height_from_label};
use crate::model::{Component, PageDim, component_map};
use crate::params::{LayoutParams, UnitSource};
use crate::partition::{RegionTree, xy_cut};

/// One page of detector output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    pub page: PageDim,
    pub components: Vec<Component>,
}

/// Everything inferred for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    /// Unit height the page was laid out with, in native units.
    pub unit_height: f64,
    pub tree: RegionTree,
    pub layout: LayoutTree,
}

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Resolves the unit height and the components that take part in the layout.
///
/// With [`UnitSource::Label`] the labelled helper components are dropped from
/// the returned set.
pub fn resolve_unit(components: &[Component], unit: &UnitSource) -> Result<(f64, Vec<Component>)> {
    match unit {
        UnitSource::Explicit(h) => {
            let h = ensure_positive("unit_height", *h)?;
            Ok((h, components.to_vec()))
        }
        UnitSource::Label(label) => {
            let h = unit_height_from_label(components, label)
                .ok_or_else(|| LayoutError::MissingUnitLabel(label.clone()))?;
            let h = ensure_positive("unit_height", h)?;
            let kept = components
                .iter()
                .filter(|c| c.kind != *label)
                .cloned()
                .collect();
            Ok((h, kept))
        }
        UnitSource::Estimate => Ok((estimate_unit_height(components)?, components.to_vec())),
    }
}

/// Infers the reading layout of one page.
///
/// The region tree and the columns are both in native units. The caller's
/// components are not modified; snapped boxes are in
/// `layout.snapped_components`.
pub fn infer_layout(
    components: &[Component],
    page: PageDim,
    params: &LayoutParams,
) -> Result<PageLayout> {
    let (unit_height, components) = resolve_unit(components, &params.unit)?;
    let xy = params.xy_cut_params(unit_height)?;
    tracing::debug!(
        components = components.len(),
        unit_height,
        min_gap = xy.min_gap,
        "inferring page layout"
    );

    let tree = xy_cut(&components, page, &xy)?;
    let dict = component_map(&components)?;
    let layout = build_layout_tree(&tree, &dict, unit_height)?;
    Ok(PageLayout {
        unit_height,
        tree,
        layout,
    })
}

/// Infers layouts for many pages on the global rayon pool.
///
/// Results are returned in input order; one failing page does not stop the
/// others.
pub fn infer_layouts(pages: &[PageInput], params: &LayoutParams) -> Vec<Result<PageLayout>> {
    pages
        .par_iter()
        .map(|p| infer_layout(&p.components, p.page, params))
        .collect()
}

/// Like [`infer_layouts`], on a dedicated pool of `threads` workers
/// (all available cores when `None`).
pub fn infer_layouts_with_threads(
    pages: &[PageInput],
    params: &LayoutParams,
    threads: Option<usize>,
) -> Result<Vec<Result<PageLayout>>> {
    let thread_count = threads.unwrap_or_else(default_thread_count).max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| LayoutError::ThreadPool(e.to_string()))?;

    let mut results: Vec<(usize, Result<PageLayout>)> = pool.install(|| {
        pages
            .par_iter()
            .enumerate()
            .map(|(idx, p)| (idx, infer_layout(&p.components, p.page, params)))
            .collect()
    });
    results.sort_by_key(|(idx, _)| *idx);
    Ok(results.into_iter().map(|(_, r)| r).collect())
}
