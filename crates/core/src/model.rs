//! Page and component types supplied by the caller.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{LayoutError, Result};
use crate::geometry::{BBox, HasBBox, clamp01};

/// Opaque, cheaply clonable component identifier.
pub type ComponentId = SmolStr;

/// Components keyed by id, in insertion order.
pub type ComponentMap = IndexMap<ComponentId, Component>;

/// A detected content box in native page units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    /// Detector label, passed through untouched.
    #[serde(rename = "type", default)]
    pub kind: String,
    pub bbox: BBox,
}

impl Component {
    pub fn new(id: impl Into<ComponentId>, kind: impl Into<String>, bbox: BBox) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            bbox,
        }
    }

    /// Rejects non-finite or inverted boxes.
    pub fn validate(&self) -> Result<()> {
        if self.bbox.is_valid() {
            Ok(())
        } else {
            Err(LayoutError::InvalidBox {
                id: self.id.clone(),
                bbox: self.bbox,
            })
        }
    }
}

impl HasBBox for Component {
    fn bbox(&self) -> BBox {
        self.bbox
    }
}

/// Page dimensions in the same units as component boxes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageDim {
    pub width: f64,
    pub height: f64,
}

impl PageDim {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(LayoutError::InvalidPage {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// A component projected into `[0, 1] x [0, 1]` page space.
#[derive(Clone, Debug, PartialEq)]
pub struct NormComponent {
    pub id: ComponentId,
    pub bbox: BBox,
}

impl HasBBox for NormComponent {
    fn bbox(&self) -> BBox {
        self.bbox
    }
}

/// Normalizes every box to page space, clamping each coordinate to `[0, 1]`.
pub fn normalize(components: &[Component], page: PageDim) -> Vec<NormComponent> {
    components
        .iter()
        .map(|c| NormComponent {
            id: c.id.clone(),
            bbox: BBox {
                x0: clamp01(c.bbox.x0 / page.width),
                y0: clamp01(c.bbox.y0 / page.height),
                x1: clamp01(c.bbox.x1 / page.width),
                y1: clamp01(c.bbox.y1 / page.height),
            },
        })
        .collect()
}

/// Builds an id-keyed map, rejecting duplicate ids.
pub fn component_map(components: &[Component]) -> Result<ComponentMap> {
    let mut map = ComponentMap::with_capacity(components.len());
    for c in components {
        match map.entry(c.id.clone()) {
            Entry::Occupied(_) => return Err(LayoutError::DuplicateId(c.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(c.clone());
            }
        }
    }
    Ok(map)
}
