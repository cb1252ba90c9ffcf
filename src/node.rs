//! The scene graph: group/shape/transform nodes and layers, addressed by
//! array index after id remapping (see [`crate::builder`]).

use std::ops::Range;

use crate::transform::Transform;

/// A named, independently toggleable visibility group that transform
/// nodes can be assigned to via `_layer` indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub is_hidden: bool,
}

/// One node of the scene graph, with all id references already resolved to
/// array indices into [`crate::scene::SceneGraph`]'s tables.
#[derive(Debug, Clone)]
pub enum Node {
    /// Leaf node instancing a single voxel model.
    Shape { model_idx: usize },
    /// Applies a rotation/translation frame to a single child, optionally
    /// hidden directly or via an assigned layer.
    Transform {
        child_node_idx: usize,
        layer_idx: Option<usize>,
        is_hidden: bool,
        transform: Transform,
    },
    /// Groups zero or more children under a shared parent transform.
    Group { children: Range<usize> },
}
