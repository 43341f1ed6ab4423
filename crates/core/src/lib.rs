//! gutterline - Reading-layout inference over detected page components.
//!
//! Boxes from a layout detector are partitioned by a recursive XY-cut along
//! whitespace gutters; the leaves of the region tree become reading columns
//! with snapped edges and a top-to-bottom block order.

pub mod api;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod params;
pub mod partition;

// Re-export high_level for convenience
pub use api::high_level;

pub use api::{PageInput, PageLayout, infer_layout, infer_layouts};
pub use error::{LayoutError, Result};
pub use geometry::{Axis, BBox, Interval};
pub use layout::{ColumnLayout, LayoutTree, build_layout_tree};
pub use model::{Component, ComponentId, ComponentMap, PageDim};
pub use params::{LayoutParams, UnitSource, XyCutParams};
pub use partition::{RegionTree, xy_cut};
