//! Non-resumable aggregate queries over the scene graph: total voxel count
//! and world-space bounding box.

use crate::builder::SceneGraph;
use crate::model::{Model, ModelSize};
use crate::node::Node;
use crate::transform::Transform;

/// Inclusive-inclusive axis-aligned bounding box of every voxel in a
/// scene, in world coordinates. `min > max` on an empty scene is
/// normalized to `min == max == [0, 0, 0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: [i32; 3],
    pub max: [i32; 3],
}

fn is_node_hidden(scene: &SceneGraph, node_idx: usize) -> bool {
    match &scene.nodes[node_idx] {
        Node::Transform {
            is_hidden,
            layer_idx,
            ..
        } => *is_hidden || layer_idx.is_some_and(|i| scene.layers[i].is_hidden),
        _ => false,
    }
}

pub(crate) fn count_voxels(scene: &SceneGraph, models: &[Model], node_idx: usize) -> u64 {
    match &scene.nodes[node_idx] {
        Node::Shape { model_idx } => models[*model_idx].voxel_count,
        Node::Transform { child_node_idx, .. } => {
            if is_node_hidden(scene, node_idx) {
                0
            } else {
                count_voxels(scene, models, *child_node_idx)
            }
        }
        Node::Group { children } => scene.group_children[children.clone()]
            .iter()
            .map(|&child_idx| count_voxels(scene, models, child_idx))
            .sum(),
    }
}

fn extend_bounds(min: &mut [i32; 3], max: &mut [i32; 3], transform: &Transform, model_pos: [i32; 3]) {
    let global = transform.apply(model_pos);
    for i in 0..3 {
        min[i] = min[i].min(global[i]);
        max[i] = max[i].max(global[i]);
    }
}

fn extend_bounds_recursive(
    scene: &SceneGraph,
    model_sizes: &[ModelSize],
    min: &mut [i32; 3],
    max: &mut [i32; 3],
    parent: &Transform,
    node_idx: usize,
) {
    match &scene.nodes[node_idx] {
        Node::Shape { model_idx } => {
            let size = model_sizes[*model_idx].get();
            let transform = parent.model_transform(size);
            extend_bounds(min, max, &transform, [0, 0, 0]);
            let corner = [
                size[0].clamp(1, 256) as i32 - 1,
                size[1].clamp(1, 256) as i32 - 1,
                size[2].clamp(1, 256) as i32 - 1,
            ];
            extend_bounds(min, max, &transform, corner);
        }
        Node::Transform {
            child_node_idx,
            transform,
            ..
        } => {
            if is_node_hidden(scene, node_idx) {
                return;
            }
            let combined = parent.compose(transform);
            extend_bounds_recursive(scene, model_sizes, min, max, &combined, *child_node_idx);
        }
        Node::Group { children } => {
            for &child_idx in &scene.group_children[children.clone()] {
                extend_bounds_recursive(scene, model_sizes, min, max, parent, child_idx);
            }
        }
    }
}

pub(crate) fn calculate_bounds(scene: &SceneGraph, model_sizes: &[ModelSize]) -> Bounds {
    let mut min = [i32::MAX; 3];
    let mut max = [i32::MIN; 3];
    extend_bounds_recursive(
        scene,
        model_sizes,
        &mut min,
        &mut max,
        &Transform::IDENTITY,
        0,
    );
    if min[0] > max[0] {
        min = [0, 0, 0];
        max = [0, 0, 0];
    }
    Bounds { min, max }
}
