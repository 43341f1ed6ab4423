//! Recursive XY-cut over whitespace gutters.
//!
//! Components are normalized into page space once, then regions are split
//! at the midpoint of their best gutter until no gutter of at least
//! `min_gap` remains. The resulting tree is returned in native units.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::scorer::best_split;
use super::tree::{NodeId, RegionTree};
use crate::error::{LayoutError, Result};
use crate::geometry::{
    Axis, BBox, EPSILON, HasBBox, Interval, horizontal_gutters, interval_overlap, union_of_boxes,
    vertical_gutters,
};
use crate::model::{Component, ComponentId, NormComponent, PageDim, normalize};
use crate::params::XyCutParams;

/// One side of a region cut by [`split_on_gutter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPart {
    pub region: BBox,
    pub component_ids: Vec<ComponentId>,
}

/// Cuts `region` at the midpoint of `gutter` along `axis`.
///
/// Returns the cut coordinate and the two halves; the other axis keeps the
/// region's extent.
pub fn cut_region(region: BBox, axis: Axis, gutter: Interval) -> (f64, [BBox; 2]) {
    let cut = gutter.midpoint();
    let span = region.interval(axis);
    (
        cut,
        [
            region.with_interval(axis, Interval::new(span.start, cut)),
            region.with_interval(axis, Interval::new(cut, span.end)),
        ],
    )
}

/// Splits member indices between the two halves of a cut.
///
/// A member goes to the first half iff its interval on `axis` overlaps
/// `first` (see [`interval_overlap`]); everything else goes to the second
/// half. The second half's interval is never tested.
fn partition_members<T: HasBBox>(
    items: &[T],
    members: &[usize],
    axis: Axis,
    first: Interval,
) -> (Vec<usize>, Vec<usize>) {
    members
        .iter()
        .partition(|&&i| interval_overlap(items[i].bbox().interval(axis), first))
}

/// Splits `components` between the two halves of `region` cut inside
/// `gutter`. Input order is kept within each half.
pub fn split_on_gutter(
    axis: Axis,
    gutter: Interval,
    region: BBox,
    components: &[Component],
) -> [RegionPart; 2] {
    let (_, [first, second]) = cut_region(region, axis, gutter);
    let all: Vec<usize> = (0..components.len()).collect();
    let (a, b) = partition_members(components, &all, axis, first.interval(axis));
    let ids = |m: Vec<usize>| -> Vec<ComponentId> {
        m.into_iter().map(|i| components[i].id.clone()).collect()
    };
    [
        RegionPart {
            region: first,
            component_ids: ids(a),
        },
        RegionPart {
            region: second,
            component_ids: ids(b),
        },
    ]
}

/// Finds the gutter to cut a node at, if any.
///
/// Gutters are searched inside the node's occupied extent (the union of its
/// members clipped to the region), so margins between the region boundary
/// and its content never qualify. A gutter is clean when it is at least
/// `min_gap[axis]` wide.
fn find_cut<T: HasBBox>(
    region: BBox,
    boxes: &[T],
    min_gap: [f64; 2],
    centrality_weight: f64,
) -> Result<Option<(Axis, Interval, f64)>> {
    let Some(occupied) = union_of_boxes(boxes.iter().filter_map(|b| region.clip(&b.bbox())))
    else {
        return Ok(None);
    };

    let clean = |gutters: Vec<Interval>, gap: f64| -> Vec<Interval> {
        gutters
            .into_iter()
            .filter(|g| g.len() + EPSILON >= gap)
            .collect()
    };
    let v = clean(vertical_gutters(occupied, boxes), min_gap[0]);
    let h = clean(horizontal_gutters(occupied, boxes), min_gap[1]);
    if v.is_empty() && h.is_empty() {
        return Ok(None);
    }

    let choice = best_split(region, &v, &h, centrality_weight)?;
    let gutter = match choice.axis {
        Axis::X => v[choice.index],
        Axis::Y => h[choice.index],
    };
    Ok(Some((choice.axis, gutter, choice.score)))
}

fn validate_input(components: &[Component], page: PageDim, params: &XyCutParams) -> Result<()> {
    page.validate()?;
    params.validate()?;
    if components.is_empty() {
        return Err(LayoutError::EmptyComponents);
    }
    let mut seen = HashSet::with_capacity(components.len());
    for c in components {
        c.validate()?;
        if !seen.insert(&c.id) {
            return Err(LayoutError::DuplicateId(c.id.clone()));
        }
    }
    Ok(())
}

/// Recursively partitions `components` into a binary tree of regions.
///
/// The root covers the content bounds of all components. `params.min_gap`
/// is in native units; it is converted per axis for the normalized search.
/// Fails when the tree would exceed `params.max_nodes` nodes or
/// `params.max_depth` levels.
pub fn xy_cut(
    components: &[Component],
    page: PageDim,
    params: &XyCutParams,
) -> Result<RegionTree> {
    validate_input(components, page, params)?;

    let norm: Vec<NormComponent> = normalize(components, page);
    let root_region = union_of_boxes(norm.iter()).ok_or(LayoutError::EmptyComponents)?;
    let min_gap = [params.min_gap / page.width, params.min_gap / page.height];

    let ids_of = |members: &[usize]| -> Vec<ComponentId> {
        members.iter().map(|&i| norm[i].id.clone()).collect()
    };

    let all: Vec<usize> = (0..norm.len()).collect();
    let mut tree = RegionTree::with_root(root_region, ids_of(&all));
    let mut stack: Vec<(NodeId, Vec<usize>, usize)> = vec![(NodeId::ROOT, all, 0)];

    while let Some((node, members, depth)) = stack.pop() {
        let region = tree.node(node).region;
        let boxes: Vec<&NormComponent> = members.iter().map(|&i| &norm[i]).collect();
        let Some((axis, gutter, score)) =
            find_cut(region, &boxes, min_gap, params.centrality_weight)?
        else {
            continue;
        };

        if depth + 1 > params.max_depth {
            return Err(LayoutError::DepthLimitExceeded {
                limit: params.max_depth,
            });
        }
        if tree.len() + 2 > params.max_nodes {
            return Err(LayoutError::NodeLimitExceeded {
                limit: params.max_nodes,
            });
        }

        let (cut, [first, second]) = cut_region(region, axis, gutter);
        let (a, b) = partition_members(&norm, &members, axis, first.interval(axis));
        tracing::debug!(
            node = node.index(),
            ?axis,
            cut,
            score,
            first = a.len(),
            second = b.len(),
            "split region"
        );

        let [ca, cb] = tree.split(
            node,
            axis,
            cut,
            [(first, ids_of(&a)), (second, ids_of(&b))],
        );
        stack.push((cb, b, depth + 1));
        stack.push((ca, a, depth + 1));
    }

    tree.scale(page.width, page.height);
    tracing::debug!(
        nodes = tree.len(),
        leaves = tree.leaves().len(),
        depth = tree.depth(),
        "xy-cut complete"
    );
    Ok(tree)
}
