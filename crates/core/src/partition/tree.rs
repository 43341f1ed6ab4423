//! Arena-backed region tree produced by the XY-cut.

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, BBox};
use crate::model::ComponentId;

/// Index of a node inside a [`RegionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub const fn index(self) -> usize {
        self.0
    }
}

/// How a node was divided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub axis: Axis,
    /// Coordinate of the cut along `axis`.
    pub cut: f64,
    /// First child (left or top) and second child (right or bottom).
    pub children: [NodeId; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionNode {
    pub region: BBox,
    /// Member ids, in the caller's input order.
    pub component_ids: Vec<ComponentId>,
    /// `None` for a leaf.
    pub split: Option<Split>,
}

impl RegionNode {
    pub fn is_leaf(&self) -> bool {
        self.split.is_none()
    }
}

/// Binary tree of regions stored as a flat vector. The root is node 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTree {
    nodes: Vec<RegionNode>,
}

impl RegionTree {
    pub(crate) fn with_root(region: BBox, component_ids: Vec<ComponentId>) -> Self {
        Self {
            nodes: vec![RegionNode {
                region,
                component_ids,
                split: None,
            }],
        }
    }

    /// Appends two children to `parent` and returns their ids.
    pub(crate) fn split(
        &mut self,
        parent: NodeId,
        axis: Axis,
        cut: f64,
        parts: [(BBox, Vec<ComponentId>); 2],
    ) -> [NodeId; 2] {
        let [first, second] = parts;
        let a = self.push(first);
        let b = self.push(second);
        self.nodes[parent.0].split = Some(Split {
            axis,
            cut,
            children: [a, b],
        });
        [a, b]
    }

    fn push(&mut self, (region, component_ids): (BBox, Vec<ComponentId>)) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(RegionNode {
            region,
            component_ids,
            split: None,
        });
        id
    }

    /// Scales every region and cut coordinate, per axis.
    pub(crate) fn scale(&mut self, sx: f64, sy: f64) {
        for node in &mut self.nodes {
            node.region = node.region.scale(sx, sy);
            if let Some(split) = node.split.as_mut() {
                split.cut *= match split.axis {
                    Axis::X => sx,
                    Axis::Y => sy,
                };
            }
        }
    }

    pub fn root(&self) -> &RegionNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &RegionNode {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> Option<[&RegionNode; 2]> {
        self.node(id)
            .split
            .map(|s| [self.node(s.children[0]), self.node(s.children[1])])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &RegionNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Leaves in depth-first order, first child before second.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            match self.node(id).split {
                None => out.push(id),
                Some(split) => {
                    stack.push(split.children[1]);
                    stack.push(split.children[0]);
                }
            }
        }
        out
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(NodeId::ROOT, 0usize)];
        while let Some((id, d)) = stack.pop() {
            deepest = deepest.max(d);
            if let Some(split) = self.node(id).split {
                stack.extend(split.children.map(|c| (c, d + 1)));
            }
        }
        deepest
    }
}
