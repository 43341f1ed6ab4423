//! Partitioning and layout parameters.
//!
//! Contains `XyCutParams` for the recursive partitioner and `LayoutParams`
//! for the full page pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result, ensure_positive};

pub const DEFAULT_CENTRALITY_WEIGHT: f64 = 0.3;
pub const DEFAULT_MIN_GAP_FACTOR: f64 = 0.2;
pub const DEFAULT_MAX_NODES: usize = 16_384;
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Label of the helper component whose height is one line of body text.
pub const DEFAULT_UNIT_LABEL: &str = "text_unit";

/// Parameters for the recursive XY-cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XyCutParams {
    /// Smallest gutter worth cutting, in native page units.
    pub min_gap: f64,

    /// How strongly off-center gutters are penalized. Range: 0.0 (size only)
    /// to 1.0 (a gutter at the region edge scores zero).
    pub centrality_weight: f64,

    /// Ceiling on the number of nodes in the region tree.
    pub max_nodes: usize,

    /// Ceiling on the depth of the region tree (root has depth 0).
    pub max_depth: usize,
}

impl Default for XyCutParams {
    fn default() -> Self {
        Self {
            min_gap: 1.0,
            centrality_weight: DEFAULT_CENTRALITY_WEIGHT,
            max_nodes: DEFAULT_MAX_NODES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl XyCutParams {
    /// Creates validated parameters with default limits.
    pub fn new(min_gap: f64, centrality_weight: f64) -> Result<Self> {
        let params = Self {
            min_gap,
            centrality_weight,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_limits(mut self, max_nodes: usize, max_depth: usize) -> Self {
        self.max_nodes = max_nodes;
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("min_gap", self.min_gap)?;
        validate_centrality_weight(self.centrality_weight)?;
        if self.max_nodes == 0 {
            return Err(LayoutError::NonPositive {
                name: "max_nodes",
                value: 0.0,
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_centrality_weight(w: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&w) {
        Ok(w)
    } else {
        Err(LayoutError::InvalidCentralityWeight(w))
    }
}

/// Where the pipeline takes its unit height from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSource {
    /// A caller-supplied height in native units.
    Explicit(f64),
    /// The height of the first component carrying this label. Components with
    /// the label are helpers and are kept out of the layout.
    Label(String),
    /// Median component height after trimming outliers.
    #[default]
    Estimate,
}

/// Parameters for [`crate::api::infer_layout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Minimum gutter as a multiple of the unit height.
    pub min_gap_factor: f64,

    /// Absolute minimum gutter in native units. Overrides `min_gap_factor`.
    pub min_gap: Option<f64>,

    pub centrality_weight: f64,

    pub unit: UnitSource,

    pub max_nodes: usize,

    pub max_depth: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            min_gap_factor: DEFAULT_MIN_GAP_FACTOR,
            min_gap: None,
            centrality_weight: DEFAULT_CENTRALITY_WEIGHT,
            unit: UnitSource::default(),
            max_nodes: DEFAULT_MAX_NODES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LayoutParams {
    /// Resolves the partitioner parameters for a page with the given unit.
    pub fn xy_cut_params(&self, unit_height: f64) -> Result<XyCutParams> {
        let min_gap = match self.min_gap {
            Some(g) => g,
            None => ensure_positive("min_gap_factor", self.min_gap_factor)? * unit_height,
        };
        let params = XyCutParams {
            min_gap,
            centrality_weight: self.centrality_weight,
            max_nodes: self.max_nodes,
            max_depth: self.max_depth,
        };
        params.validate()?;
        Ok(params)
    }
}
