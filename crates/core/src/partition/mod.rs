//! Recursive region partitioning (XY-cut).
//!
//! Contains:
//! - The gutter scorer that picks where to cut
//! - The arena-backed region tree
//! - The recursive cut itself

mod scorer;
mod tree;
mod xycut;

pub use scorer::{SplitChoice, best_split, centrality, gutter_score};
pub use tree::{NodeId, RegionNode, RegionTree, Split};
pub use xycut::{RegionPart, cut_region, split_on_gutter, xy_cut};
