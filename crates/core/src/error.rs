//! Error types for gutterline layout inference.

use smol_str::SmolStr;
use thiserror::Error;

use crate::geometry::BBox;

/// Primary error type for partitioning and layout operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("invalid box for component {id}: {bbox:?}")]
    InvalidBox { id: SmolStr, bbox: BBox },

    #[error("invalid page dimensions: {width}x{height}")]
    InvalidPage { width: f64, height: f64 },

    #[error("no components to partition")]
    EmptyComponents,

    #[error("duplicate component id: {0}")]
    DuplicateId(SmolStr),

    #[error("unknown component id: {0}")]
    UnknownComponent(SmolStr),

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("centrality weight must lie in [0, 1], got {0}")]
    InvalidCentralityWeight(f64),

    #[error("no candidate gutters to split on")]
    NoCandidateGutters,

    #[error("region tree exceeded {limit} nodes")]
    NodeLimitExceeded { limit: usize },

    #[error("region tree exceeded depth {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("no unit component labelled {0:?}")]
    MissingUnitLabel(String),

    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

/// Convenience Result type alias for LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Rejects values that are not finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::NonPositive { name, value })
    }
}
