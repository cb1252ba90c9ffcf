//! A streaming reader for the MagicaVoxel `.vox` binary scene format.
//!
//! `.vox` files store one or more fixed-size voxel models plus an optional
//! scene graph of groups, shapes and transforms that places and hides
//! instances of those models. This crate reads that format directly off a
//! file, an arbitrary seekable stream, or an in-memory buffer, without
//! materializing the whole scene's voxels in memory at once.
//!
//! # Quick start
//!
//! ```no_run
//! use vox_scene::VoxScene;
//!
//! let mut scene = VoxScene::open_path("model.vox")?;
//! println!("{} voxels", scene.count_voxels());
//!
//! let mut xyz = [[0i32; 3]; 256];
//! let mut rgba = [[0u8; 4]; 256];
//! loop {
//!     let n = scene.read_xyz_rgba(&mut xyz, &mut rgba)?;
//!     if n == 0 {
//!         break;
//!     }
//!     // process xyz[..n] / rgba[..n]
//! }
//! # Ok::<(), vox_scene::VoxError>(())
//! ```
//!
//! # Coordinate system and layers
//!
//! Returned voxel positions are in the scene's global coordinate system,
//! after applying every ancestor transform. Voxels belonging to hidden
//! transform nodes, or to transforms assigned to a hidden layer, are
//! skipped entirely by both the read functions and [`VoxScene::count_voxels`]
//! / [`VoxScene::calculate_bounds`].

mod builder;
mod byte_source;
mod error;
mod model;
mod node;
mod palette;
mod query;
mod reader;
mod transform;
mod traversal;

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use tracing::debug;

pub use crate::byte_source::SeekRead;
pub use crate::error::{Result, VoxError};
pub use crate::palette::Palette;
pub use crate::query::Bounds;

use crate::builder::SceneGraph;
use crate::byte_source::ByteSource;
use crate::model::{Model, ModelSize};
use crate::reader::ChunkReader;
use crate::traversal::{Sink, Traversal};

/// An opened `.vox` scene, ready for aggregate queries and/or streamed
/// voxel reads.
///
/// The lifetime parameter ties a memory- or stream-backed scene to the
/// buffer or stream it borrows; [`VoxScene::open_path`] owns the file it
/// opens internally and so returns a `VoxScene<'static>`.
pub struct VoxScene<'a> {
    source: ByteSource<'a>,
    scene: SceneGraph,
    models: Vec<Model>,
    model_sizes: Vec<ModelSize>,
    palette: Palette,
    traversal: Traversal,
}

impl VoxScene<'static> {
    /// Opens a `.vox` file by path. The file is kept open until the
    /// returned `VoxScene` (and the `File` it owns) is dropped.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|_| VoxError::FileOpen(path.display().to_string()))?;
        debug!("opened vox file {}", path.display());
        Self::open_common(ByteSource::from_stream(file))
    }
}

impl<'a> VoxScene<'a> {
    /// Opens a `.vox` scene from any seekable stream the caller keeps
    /// alive for at least `'a`. Unlike [`VoxScene::open_path`], the stream
    /// is never closed by this crate.
    pub fn open_stream<S: Read + Seek + 'a>(stream: &'a mut S) -> Result<Self> {
        Self::open_common(ByteSource::from_stream(stream))
    }

    /// Opens a `.vox` scene from an in-memory buffer the caller keeps
    /// alive for at least `'a`.
    pub fn open_memory(buffer: &'a [u8]) -> Result<Self> {
        Self::open_common(ByteSource::from_memory(buffer))
    }

    fn open_common(mut source: ByteSource<'a>) -> Result<Self> {
        let parsed = ChunkReader::new(&mut source).parse()?;
        let reader::ParsedFile {
            models,
            model_sizes,
            mut builder,
            palette,
        } = parsed;

        if models.is_empty() || models.len() != model_sizes.len() {
            return Err(VoxError::InvalidScene(
                "file declares no models, or SIZE/XYZI chunk counts disagree".into(),
            ));
        }

        // Files containing exactly one model and no scene graph chunks at
        // all are valid; synthesize the implicit single-instance root the
        // format assumes in that case.
        if builder.is_empty() {
            builder.push_shape(0, 0);
        }

        let scene = builder.build(models.len())?;
        debug!(
            "parsed vox scene: {} models, {} scene nodes, root height {}",
            models.len(),
            scene_node_count(&scene),
            scene.root_height()
        );

        Ok(VoxScene {
            source,
            scene,
            models,
            model_sizes,
            palette,
            traversal: Traversal::new(),
        })
    }

    /// Total number of voxels across every visible model instance in the
    /// scene, equal to the sum of all [`VoxScene::read_xyz_rgba`] /
    /// [`VoxScene::read_xyz_coloridx`] return values over a full read.
    #[must_use]
    pub fn count_voxels(&self) -> u64 {
        query::count_voxels(&self.scene, &self.models, 0)
    }

    /// World-space axis-aligned bounding box of every visible voxel in the
    /// scene.
    #[must_use]
    pub fn calculate_bounds(&self) -> Bounds {
        query::calculate_bounds(&self.scene, &self.model_sizes)
    }

    /// The scene's color palette: either the file's `RGBA` chunk, or the
    /// default MagicaVoxel palette if it has none.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Reads up to `xyz_buf.len()` voxels (positions and RGBA colors) in
    /// scene traversal order, resuming from the previous call. Returns the
    /// number of voxels written, or `0` once every visible voxel has been
    /// returned.
    ///
    /// `xyz_buf` and `rgba_buf` must be the same length.
    pub fn read_xyz_rgba(
        &mut self,
        xyz_buf: &mut [[i32; 3]],
        rgba_buf: &mut [[u8; 4]],
    ) -> Result<usize> {
        if xyz_buf.len() != rgba_buf.len() {
            return Err(VoxError::InvalidArgument(
                "xyz_buf and rgba_buf must have the same length".into(),
            ));
        }
        self.traversal.read(
            &mut self.source,
            &self.scene,
            &self.models,
            &self.model_sizes,
            &self.palette,
            xyz_buf,
            Sink::Rgba(rgba_buf),
        )
    }

    /// Like [`VoxScene::read_xyz_rgba`], but writes palette indices instead
    /// of resolved RGBA colors. Indices are valid indices into
    /// [`VoxScene::palette`].
    ///
    /// `xyz_buf` and `coloridx_buf` must be the same length.
    pub fn read_xyz_coloridx(
        &mut self,
        xyz_buf: &mut [[i32; 3]],
        coloridx_buf: &mut [u8],
    ) -> Result<usize> {
        if xyz_buf.len() != coloridx_buf.len() {
            return Err(VoxError::InvalidArgument(
                "xyz_buf and coloridx_buf must have the same length".into(),
            ));
        }
        self.traversal.read(
            &mut self.source,
            &self.scene,
            &self.models,
            &self.model_sizes,
            &self.palette,
            xyz_buf,
            Sink::ColorIdx(coloridx_buf),
        )
    }
}

fn scene_node_count(scene: &SceneGraph) -> usize {
    scene.nodes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn chunk(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(fourcc);
        out.extend_from_slice(&(content.len() as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(content);
        out
    }

    fn single_voxel_file() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"VOX ");
        data.extend_from_slice(&150u32.to_le_bytes());
        data.extend_from_slice(b"MAIN");
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend(chunk(b"SIZE", &[2, 0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0]));
        let mut xyzi_content = 2u32.to_le_bytes().to_vec();
        xyzi_content.extend_from_slice(&[0, 0, 0, 1]);
        xyzi_content.extend_from_slice(&[1, 1, 1, 2]);
        data.extend(chunk(b"XYZI", &xyzi_content));
        data
    }

    #[test]
    fn open_memory_reads_all_voxels_in_one_batch() {
        let data = single_voxel_file();
        let mut scene = VoxScene::open_memory(&data).unwrap();
        assert_eq!(scene.count_voxels(), 2);

        let mut xyz = [[0i32; 3]; 8];
        let mut rgba = [[0u8; 4]; 8];
        let n = scene.read_xyz_rgba(&mut xyz, &mut rgba).unwrap();
        assert_eq!(n, 2);
        assert_eq!(xyz[0], [-1, -1, -1]);
        assert_eq!(xyz[1], [0, 0, 0]);

        let n2 = scene.read_xyz_rgba(&mut xyz, &mut rgba).unwrap();
        assert_eq!(n2, 0);
    }

    #[test]
    fn open_memory_reads_voxels_in_small_batches() {
        let data = single_voxel_file();
        let mut scene = VoxScene::open_memory(&data).unwrap();

        let mut xyz = [[0i32; 3]; 1];
        let mut coloridx = [0u8; 1];
        let mut total = 0;
        loop {
            let n = scene.read_xyz_coloridx(&mut xyz, &mut coloridx).unwrap();
            if n == 0 {
                break;
            }
            total += n;
        }
        assert_eq!(total, 2);
    }

    #[test]
    fn open_stream_works_over_a_cursor() {
        let data = single_voxel_file();
        let mut cursor = Cursor::new(data);
        let mut scene = VoxScene::open_stream(&mut cursor).unwrap();
        assert_eq!(scene.count_voxels(), 2);
    }

    #[test]
    fn mismatched_output_buffer_lengths_are_rejected() {
        let data = single_voxel_file();
        let mut scene = VoxScene::open_memory(&data).unwrap();
        let mut xyz = [[0i32; 3]; 2];
        let mut rgba = [[0u8; 4]; 1];
        let err = scene.read_xyz_rgba(&mut xyz, &mut rgba).unwrap_err();
        assert!(matches!(err, VoxError::InvalidArgument(_)));
    }

    #[test]
    fn bounds_match_reference_model_extent() {
        let data = single_voxel_file();
        let scene = VoxScene::open_memory(&data).unwrap();
        let bounds = scene.calculate_bounds();
        assert_eq!(bounds.min, [-1, -1, -1]);
        assert_eq!(bounds.max, [0, 0, 0]);
    }
}
