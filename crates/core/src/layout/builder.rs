//! Turns a region tree into ordered reading columns.

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::snapping::{snap_boxes, snap_epsilon};
use crate::error::{LayoutError, Result, ensure_positive};
use crate::geometry::BBox;
use crate::model::{ComponentId, ComponentMap};
use crate::partition::{NodeId, RegionTree};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub block_ids: Vec<ComponentId>,
}

/// One leaf of the region tree, read as a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnLayout {
    /// `[min x0, max x1]` of the members divided by the content width.
    ///
    /// No origin offset is subtracted, so the values leave `[0, 1]` when the
    /// content does not start at `x = 0`; multiplying by `page.width`
    /// recovers native coordinates.
    pub x_range: (f64, f64),
    pub row_groups: Vec<Row>,
    /// Members ordered top to bottom, then left to right.
    pub block_ids_in_column: Vec<ComponentId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageExtent {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTree {
    /// Extent of the root region.
    pub page: PageExtent,
    /// Columns ordered left to right.
    pub columns: Vec<ColumnLayout>,
    /// A copy of the input components with snapped edges.
    pub snapped_components: ComponentMap,
}

/// Snapped boxes for one leaf, in member order.
fn snap_leaf(ids: &[ComponentId], components: &ComponentMap, eps: f64) -> Result<Vec<BBox>> {
    let boxes = ids
        .iter()
        .map(|id| {
            components
                .get(id)
                .map(|c| c.bbox)
                .ok_or_else(|| LayoutError::UnknownComponent(id.clone()))
        })
        .collect::<Result<Vec<BBox>>>()?;
    Ok(snap_boxes(&boxes, eps))
}

fn x_range(boxes: &[BBox], width: f64) -> (f64, f64) {
    let min_x = boxes.iter().map(|b| b.x0).fold(f64::INFINITY, f64::min);
    let max_x = boxes.iter().map(|b| b.x1).fold(f64::NEG_INFINITY, f64::max);
    if !min_x.is_finite() || !max_x.is_finite() || width <= 0.0 {
        return (0.0, 1.0);
    }
    (min_x / width, max_x / width)
}

fn build_column(ids: &[ComponentId], boxes: &[BBox], width: f64) -> ColumnLayout {
    let mut order: Vec<usize> = (0..ids.len()).collect();
    order.sort_by_key(|&i| (OrderedFloat(boxes[i].y0), OrderedFloat(boxes[i].x0)));
    let ordered: Vec<ComponentId> = order.into_iter().map(|i| ids[i].clone()).collect();
    ColumnLayout {
        x_range: x_range(boxes, width),
        row_groups: vec![Row {
            block_ids: ordered.clone(),
        }],
        block_ids_in_column: ordered,
    }
}

/// Builds ordered, edge-snapped columns from the leaves of `tree`.
///
/// `tree` must be in the same native units as `components`. The snap
/// tolerance is derived from `unit_height`. The caller's map is never
/// modified; the snapped copy is returned in `snapped_components`.
pub fn build_layout_tree(
    tree: &RegionTree,
    components: &ComponentMap,
    unit_height: f64,
) -> Result<LayoutTree> {
    let unit_height = ensure_positive("unit_height", unit_height)?;
    let eps = snap_epsilon(unit_height);
    let root = tree.root().region;
    let width = root.width();

    let leaves: Vec<NodeId> = tree.leaves();
    let snapped: Vec<Vec<BBox>> = leaves
        .par_iter()
        .map(|&leaf| snap_leaf(&tree.node(leaf).component_ids, components, eps))
        .collect::<Result<_>>()?;

    let mut dict = components.clone();
    let mut columns = Vec::with_capacity(leaves.len());
    for (&leaf, boxes) in leaves.iter().zip(&snapped) {
        let ids = &tree.node(leaf).component_ids;
        for (id, bbox) in ids.iter().zip(boxes) {
            if let Some(c) = dict.get_mut(id) {
                c.bbox = *bbox;
            }
        }
        columns.push(build_column(ids, boxes, width));
    }
    columns.sort_by_key(|c| OrderedFloat(c.x_range.0));

    tracing::debug!(columns = columns.len(), eps, "built layout tree");
    Ok(LayoutTree {
        page: PageExtent {
            width,
            height: root.height(),
        },
        columns,
        snapped_components: dict,
    })
}
