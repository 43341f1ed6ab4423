//! High-level API module for reading-layout inference.
//!
//! This module provides the page pipeline: unit height resolution, XY-cut
//! partitioning and column construction in one call.
//!
//! # Example
//!
//! ```ignore
//! use gutterline_core::api::{PageInput, infer_layout};
//! use gutterline_core::params::LayoutParams;
//!
//! let input: PageInput = serde_json::from_str(&json)?;
//! let result = infer_layout(&input.components, input.page, &LayoutParams::default())?;
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{
    PageInput, PageLayout, infer_layout, infer_layouts, infer_layouts_with_threads, resolve_unit,
};
