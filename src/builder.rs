//! Assembles the raw nodes/layers/group-children read by
//! [`crate::reader::ChunkReader`] into a checked, index-addressed
//! [`SceneGraph`].
//!
//! File ids can be sparse and are not necessarily stored in ascending
//! order, so every cross-reference (`nTRN`'s target node, a transform's
//! assigned layer, an `nGRP`'s children) arrives here as a raw `u32` id.
//! [`SceneBuilder::build`] sorts the node and layer tables by id and
//! rewrites every reference as an index into that sorted table, then walks
//! the graph once to assign each node a height and confirm it is acyclic.

use crate::error::{Result, VoxError};
use crate::node::{Layer, Node};
use crate::transform::Transform;

/// Scene-graph node as read from the file, before id-to-index remapping.
pub(crate) enum RawNodeKind {
    Shape {
        model_idx: usize,
    },
    Transform {
        child_id: u32,
        layer_id: Option<u32>,
        is_hidden: bool,
        transform: Transform,
    },
    Group {
        /// Range into the builder's shared `raw_group_children` array.
        children_start: usize,
        children_end: usize,
    },
}

pub(crate) struct RawNode {
    pub id: u32,
    pub kind: RawNodeKind,
}

pub(crate) struct RawLayer {
    pub id: u32,
    pub is_hidden: bool,
}

/// The checked scene graph: nodes and layers addressed by array index, with
/// every node's height from its deepest leaf already computed.
pub struct SceneGraph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) heights: Vec<u32>,
    pub(crate) group_children: Vec<usize>,
    pub(crate) layers: Vec<Layer>,
}

impl SceneGraph {
    pub(crate) fn root_height(&self) -> u32 {
        self.heights[0]
    }
}

pub(crate) struct SceneBuilder {
    raw_nodes: Vec<RawNode>,
    raw_group_children: Vec<u32>,
    raw_layers: Vec<RawLayer>,
}

impl SceneBuilder {
    pub(crate) fn new() -> Self {
        SceneBuilder {
            raw_nodes: Vec::new(),
            raw_group_children: Vec::new(),
            raw_layers: Vec::new(),
        }
    }

    pub(crate) fn push_shape(&mut self, id: u32, model_idx: usize) {
        self.raw_nodes.push(RawNode {
            id,
            kind: RawNodeKind::Shape { model_idx },
        });
    }

    pub(crate) fn push_transform(
        &mut self,
        id: u32,
        child_id: u32,
        layer_id: Option<u32>,
        is_hidden: bool,
        transform: Transform,
    ) {
        self.raw_nodes.push(RawNode {
            id,
            kind: RawNodeKind::Transform {
                child_id,
                layer_id,
                is_hidden,
                transform,
            },
        });
    }

    pub(crate) fn push_group(&mut self, id: u32, child_ids: &[u32]) {
        let children_start = self.raw_group_children.len();
        self.raw_group_children.extend_from_slice(child_ids);
        let children_end = self.raw_group_children.len();
        self.raw_nodes.push(RawNode {
            id,
            kind: RawNodeKind::Group {
                children_start,
                children_end,
            },
        });
    }

    pub(crate) fn push_layer(&mut self, id: u32, is_hidden: bool) {
        self.raw_layers.push(RawLayer { id, is_hidden });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.raw_nodes.is_empty()
    }

    /// Consume the builder, producing a checked [`SceneGraph`].
    ///
    /// `model_count` bounds shape nodes' `model_idx` during the cycle
    /// check; `open_common` is responsible for synthesizing an implicit
    /// root shape node (id 0) before calling this when the file has no
    /// scene graph chunks at all.
    pub(crate) fn build(mut self, model_count: usize) -> Result<SceneGraph> {
        self.raw_nodes.sort_by_key(|n| n.id);
        self.raw_layers.sort_by_key(|l| l.id);

        let find_node = |id: u32, nodes: &[RawNode]| -> Result<usize> {
            nodes
                .binary_search_by_key(&id, |n| n.id)
                .map_err(|_| VoxError::InvalidScene(format!("reference to unknown node id {id}")))
        };
        let find_layer = |id: u32, layers: &[RawLayer]| -> Result<usize> {
            layers
                .binary_search_by_key(&id, |l| l.id)
                .map_err(|_| VoxError::InvalidScene(format!("reference to unknown layer id {id}")))
        };

        for child_id in &mut self.raw_group_children {
            *child_id = find_node(*child_id, &self.raw_nodes)? as u32;
        }

        let mut nodes = Vec::with_capacity(self.raw_nodes.len());
        for raw in &self.raw_nodes {
            nodes.push(match &raw.kind {
                RawNodeKind::Shape { model_idx } => Node::Shape {
                    model_idx: *model_idx,
                },
                RawNodeKind::Transform {
                    child_id,
                    layer_id,
                    is_hidden,
                    transform,
                } => {
                    let child_node_idx = find_node(*child_id, &self.raw_nodes)?;
                    let layer_idx = layer_id
                        .map(|id| find_layer(id, &self.raw_layers))
                        .transpose()?;
                    Node::Transform {
                        child_node_idx,
                        layer_idx,
                        is_hidden: *is_hidden,
                        transform: *transform,
                    }
                }
                RawNodeKind::Group {
                    children_start,
                    children_end,
                } => Node::Group {
                    children: *children_start..*children_end,
                },
            });
        }

        let group_children: Vec<usize> = self
            .raw_group_children
            .iter()
            .map(|&i| i as usize)
            .collect();
        let layers = self
            .raw_layers
            .iter()
            .map(|l| Layer {
                is_hidden: l.is_hidden,
            })
            .collect();

        let mut heights = vec![0u32; nodes.len()];
        assign_height(&nodes, &group_children, &mut heights, 0, model_count)?;

        Ok(SceneGraph {
            nodes,
            heights,
            group_children,
            layers,
        })
    }
}

/// In-progress sentinel for cycle detection, matching the C reference's use
/// of `UINT_MAX` as a "currently on the call stack" marker.
const IN_PROGRESS: u32 = u32::MAX;

fn assign_height(
    nodes: &[Node],
    group_children: &[usize],
    heights: &mut [u32],
    node_idx: usize,
    model_count: usize,
) -> Result<u32> {
    if heights[node_idx] == IN_PROGRESS {
        return Err(VoxError::InvalidScene("scene graph contains a cycle".into()));
    }
    if heights[node_idx] > 0 {
        return Ok(heights[node_idx]);
    }

    heights[node_idx] = IN_PROGRESS;
    let height = match &nodes[node_idx] {
        Node::Shape { model_idx } => {
            if *model_idx >= model_count {
                return Err(VoxError::InvalidScene(format!(
                    "shape node references out-of-range model {model_idx}"
                )));
            }
            0
        }
        Node::Transform { child_node_idx, .. } => {
            assign_height(nodes, group_children, heights, *child_node_idx, model_count)? + 1
        }
        Node::Group { children } => {
            if children.is_empty() {
                0
            } else {
                let mut max_child_height = 0;
                for &child_idx in &group_children[children.clone()] {
                    let h = assign_height(nodes, group_children, heights, child_idx, model_count)?;
                    max_child_height = max_child_height.max(h);
                }
                max_child_height + 1
            }
        }
    };
    heights[node_idx] = height;
    Ok(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_shape_node_has_height_zero() {
        let mut b = SceneBuilder::new();
        b.push_shape(0, 0);
        let graph = b.build(1).unwrap();
        assert_eq!(graph.root_height(), 0);
    }

    #[test]
    fn transform_wrapping_shape_has_height_one() {
        let mut b = SceneBuilder::new();
        b.push_transform(0, 1, None, false, Transform::IDENTITY);
        b.push_shape(1, 0);
        let graph = b.build(1).unwrap();
        assert_eq!(graph.root_height(), 1);
    }

    #[test]
    fn group_height_is_max_child_height_plus_one() {
        let mut b = SceneBuilder::new();
        b.push_group(0, &[1, 2]);
        b.push_shape(1, 0);
        b.push_transform(2, 3, None, false, Transform::IDENTITY);
        b.push_shape(3, 0);
        let graph = b.build(1).unwrap();
        assert_eq!(graph.root_height(), 2);
    }

    #[test]
    fn self_referencing_transform_is_rejected_as_cyclic() {
        let mut b = SceneBuilder::new();
        b.push_transform(0, 0, None, false, Transform::IDENTITY);
        assert!(matches!(b.build(1), Err(VoxError::InvalidScene(_))));
    }

    #[test]
    fn mutually_referencing_transforms_are_rejected_as_cyclic() {
        let mut b = SceneBuilder::new();
        b.push_transform(0, 1, None, false, Transform::IDENTITY);
        b.push_transform(1, 0, None, false, Transform::IDENTITY);
        assert!(matches!(b.build(1), Err(VoxError::InvalidScene(_))));
    }

    #[test]
    fn shape_referencing_out_of_range_model_is_rejected() {
        let mut b = SceneBuilder::new();
        b.push_shape(0, 5);
        assert!(matches!(b.build(1), Err(VoxError::InvalidScene(_))));
    }

    #[test]
    fn unknown_node_reference_is_rejected() {
        let mut b = SceneBuilder::new();
        b.push_transform(0, 99, None, false, Transform::IDENTITY);
        assert!(matches!(b.build(1), Err(VoxError::InvalidScene(_))));
    }

    #[test]
    fn sparse_unordered_ids_are_remapped_correctly() {
        let mut b = SceneBuilder::new();
        b.push_group(0, &[10, 5]);
        b.push_shape(10, 0);
        b.push_shape(5, 0);
        let graph = b.build(1).unwrap();
        assert_eq!(graph.root_height(), 1);
        assert_eq!(graph.group_children.len(), 2);
    }
}
