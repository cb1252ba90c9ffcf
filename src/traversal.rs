//! Resumable depth-first traversal of the scene graph, producing voxel
//! positions and colors in bounded batches.
//!
//! A single `.vox` scene can reference models far larger than any
//! reasonable output buffer, so voxels are produced incrementally: each
//! call to [`Traversal::read`] advances a depth-first walk by at most
//! `xyz_buf.len()` voxels and leaves a [`Frame`] stack behind so the next
//! call can resume exactly where the last one left off. The stack is sized
//! once, to the root node's height plus one, since the graph's height is
//! already known from [`crate::builder::SceneGraph`].

use crate::builder::SceneGraph;
use crate::byte_source::ByteSource;
use crate::error::{Result, VoxError};
use crate::model::{Model, ModelSize};
use crate::node::Node;
use crate::palette::Palette;
use crate::transform::Transform;

/// How far a [`Frame`] has gotten through its node: for a shape, the
/// number of voxels already emitted; for a group or transform, whether its
/// (at most one) child has already been descended into.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    node_idx: usize,
    pos: u64,
    transform: Transform,
}

enum Outcome {
    Complete,
    Incomplete,
    Child(usize),
}

/// Destination for voxel colors, chosen per call by [`crate::VoxScene::read_xyz_rgba`]
/// or [`crate::VoxScene::read_xyz_coloridx`].
pub(crate) enum Sink<'a> {
    Rgba(&'a mut [[u8; 4]]),
    ColorIdx(&'a mut [u8]),
}

pub(crate) struct Traversal {
    stack: Vec<Frame>,
    depth: usize,
    eof: bool,
    /// Once a read fails, every subsequent read returns the same error
    /// instead of retrying a possibly-corrupted stream position.
    sticky_error: Option<VoxError>,
}

impl Traversal {
    pub(crate) fn new() -> Self {
        Traversal {
            stack: Vec::new(),
            depth: 0,
            eof: false,
            sticky_error: None,
        }
    }

    pub(crate) fn read(
        &mut self,
        source: &mut ByteSource<'_>,
        scene: &SceneGraph,
        models: &[Model],
        model_sizes: &[ModelSize],
        palette: &Palette,
        xyz_buf: &mut [[i32; 3]],
        mut sink: Sink<'_>,
    ) -> Result<usize> {
        if self.eof {
            return Ok(0);
        }
        if let Some(err) = &self.sticky_error {
            return Err(err.clone());
        }

        if self.stack.is_empty() {
            self.stack = vec![
                Frame {
                    node_idx: 0,
                    pos: 0,
                    transform: Transform::IDENTITY
                };
                scene.root_height() as usize + 1
            ];
            self.stack[0] = start_frame(0, &Transform::IDENTITY, scene, models, model_sizes, source)?;
        }

        let result = self.run(source, scene, models, model_sizes, palette, xyz_buf, &mut sink);
        match result {
            Ok(count) => Ok(count),
            Err(err) => {
                self.sticky_error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn run(
        &mut self,
        source: &mut ByteSource<'_>,
        scene: &SceneGraph,
        models: &[Model],
        model_sizes: &[ModelSize],
        palette: &Palette,
        xyz_buf: &mut [[i32; 3]],
        sink: &mut Sink<'_>,
    ) -> Result<usize> {
        let max_count = xyz_buf.len();
        let mut count_read = 0;
        while count_read < max_count {
            let outcome = continue_frame(
                &mut self.stack[self.depth],
                scene,
                models,
                source,
                palette,
                xyz_buf,
                sink,
                &mut count_read,
            )?;
            match outcome {
                Outcome::Incomplete => {
                    debug_assert_eq!(count_read, max_count);
                }
                Outcome::Complete => {
                    if self.depth == 0 {
                        self.eof = true;
                        break;
                    }
                    self.depth -= 1;
                }
                Outcome::Child(child_idx) => {
                    let parent_transform = self.stack[self.depth].transform;
                    self.depth += 1;
                    self.stack[self.depth] =
                        start_frame(child_idx, &parent_transform, scene, models, model_sizes, source)?;
                }
            }
        }
        Ok(count_read)
    }
}

fn start_frame(
    node_idx: usize,
    parent_transform: &Transform,
    scene: &SceneGraph,
    models: &[Model],
    model_sizes: &[ModelSize],
    source: &mut ByteSource<'_>,
) -> Result<Frame> {
    match &scene.nodes[node_idx] {
        Node::Shape { model_idx } => {
            source.seek_to(models[*model_idx].data_mark)?;
            Ok(Frame {
                node_idx,
                pos: 0,
                transform: parent_transform.model_transform(model_sizes[*model_idx].get()),
            })
        }
        Node::Transform { transform, .. } => Ok(Frame {
            node_idx,
            pos: 0,
            transform: parent_transform.compose(transform),
        }),
        Node::Group { .. } => Ok(Frame {
            node_idx,
            pos: 0,
            transform: *parent_transform,
        }),
    }
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

#[allow(clippy::too_many_arguments)]
fn continue_frame(
    frame: &mut Frame,
    scene: &SceneGraph,
    models: &[Model],
    source: &mut ByteSource<'_>,
    palette: &Palette,
    xyz_buf: &mut [[i32; 3]],
    sink: &mut Sink<'_>,
    count_read: &mut usize,
) -> Result<Outcome> {
    match &scene.nodes[frame.node_idx] {
        Node::Shape { model_idx } => {
            let model = &models[*model_idx];
            let remaining_in_buffer = xyz_buf.len() - *count_read;
            let remaining_in_model = model.voxel_count - frame.pos;
            let count = remaining_in_buffer.min(remaining_in_model as usize);
            read_model_voxels(source, &frame.transform, palette, xyz_buf, sink, *count_read, count)?;
            frame.pos += count as u64;
            *count_read += count;
            if frame.pos < model.voxel_count {
                Ok(Outcome::Incomplete)
            } else {
                Ok(Outcome::Complete)
            }
        }
        Node::Transform { child_node_idx, .. } => {
            frame.pos += 1;
            if frame.pos > 1 {
                return Ok(Outcome::Complete);
            }
            if is_node_hidden(scene, frame.node_idx) {
                return Ok(Outcome::Complete);
            }
            Ok(Outcome::Child(*child_node_idx))
        }
        Node::Group { children } => {
            if children.start + frame.pos as usize >= children.end {
                return Ok(Outcome::Complete);
            }
            let child_idx = scene.group_children[children.start + frame.pos as usize];
            frame.pos += 1;
            Ok(Outcome::Child(child_idx))
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn read_model_voxels(
    source: &mut ByteSource<'_>,
    transform: &Transform,
    palette: &Palette,
    xyz_buf: &mut [[i32; 3]],
    sink: &mut Sink<'_>,
    offset: usize,
    count: usize,
) -> Result<()> {
    const BATCH: usize = crate::byte_source::SCRATCH_CAPACITY / 4;
    let mut remaining = count;
    let mut cursor = offset;
    while remaining > 0 {
        let n = remaining.min(BATCH);
        let raw = source.get_bytes(n * 4)?;
        for i in 0..n {
            let entry = &raw[i * 4..i * 4 + 4];
            let model_pos = [i32::from(entry[0]), i32::from(entry[1]), i32::from(entry[2])];
            xyz_buf[cursor + i] = transform.apply(model_pos);
            let color_idx = entry[3];
            match sink {
                Sink::Rgba(out) => out[cursor + i] = palette.entries()[color_idx as usize],
                Sink::ColorIdx(out) => out[cursor + i] = color_idx,
            }
        }
        cursor += n;
        remaining -= n;
    }
    Ok(())
}
