//! Reading-layout construction.
//!
//! This module contains:
//! - Edge snapping within a column
//! - Column ordering from the leaves of a region tree
//! - Unit-height estimation

mod builder;
mod snapping;
mod unit;

pub use builder::{ColumnLayout, LayoutTree, PageExtent, Row, build_layout_tree};
pub use snapping::{Bucket, bucket_snap, cluster_list, snap_boxes, snap_epsilon, snap_value};
pub use unit::{estimate_unit_height, quantile_clip, unit_height_from_label};
