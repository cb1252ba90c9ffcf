//! Chunk-level parsing: reads the `"VOX "` prologue and dispatches each
//! child of the `MAIN` chunk to a parser that feeds [`crate::builder::SceneBuilder`]
//! and the model/palette tables.

use tracing::{debug, trace, warn};

use crate::builder::SceneBuilder;
use crate::byte_source::ByteSource;
use crate::error::{Result, VoxError};
use crate::model::{Model, ModelSize};
use crate::palette::Palette;
use crate::transform::Transform;

const FOURCC_VOX: u32 = fourcc(b"VOX ");
const FOURCC_MAIN: u32 = fourcc(b"MAIN");
const FOURCC_SIZE: u32 = fourcc(b"SIZE");
const FOURCC_XYZI: u32 = fourcc(b"XYZI");
const FOURCC_RGBA: u32 = fourcc(b"RGBA");
const FOURCC_NGRP: u32 = fourcc(b"nGRP");
const FOURCC_NTRN: u32 = fourcc(b"nTRN");
const FOURCC_NSHP: u32 = fourcc(b"nSHP");
const FOURCC_LAYR: u32 = fourcc(b"LAYR");

const fn fourcc(bytes: &[u8; 4]) -> u32 {
    (bytes[0] as u32) | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16 | (bytes[3] as u32) << 24
}

/// Longest string this crate will buffer; excess bytes are skipped rather
/// than read, matching the reference implementation's truncation limit.
const MAX_STRING_LEN: usize = crate::byte_source::SCRATCH_CAPACITY - 1;

/// Everything `ChunkReader::parse` extracts from a `.vox` byte stream,
/// ready to be fed to [`crate::builder::SceneBuilder::build`].
pub(crate) struct ParsedFile {
    pub models: Vec<Model>,
    pub model_sizes: Vec<ModelSize>,
    pub builder: SceneBuilder,
    pub palette: Palette,
}

pub(crate) struct ChunkReader<'a, 'b> {
    source: &'a mut ByteSource<'b>,
    read_counter: usize,
    models: Vec<Model>,
    model_sizes: Vec<ModelSize>,
    builder: SceneBuilder,
    palette: Option<Palette>,
}

impl<'a, 'b> ChunkReader<'a, 'b> {
    pub(crate) fn new(source: &'a mut ByteSource<'b>) -> Self {
        ChunkReader {
            source,
            read_counter: 0,
            models: Vec::new(),
            model_sizes: Vec::new(),
            builder: SceneBuilder::new(),
            palette: None,
        }
    }

    pub(crate) fn parse(mut self) -> Result<ParsedFile> {
        self.parse_prologue()?;
        self.parse_main_children()?;
        Ok(ParsedFile {
            models: self.models,
            model_sizes: self.model_sizes,
            builder: self.builder,
            palette: self.palette.unwrap_or_default(),
        })
    }

    fn get_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.read_counter += count;
        Ok(self.source.get_bytes(count)?.to_vec())
    }

    fn skip(&mut self, count: u64) -> Result<()> {
        self.read_counter += count as usize;
        self.source.skip(count)
    }

    fn get_u32(&mut self) -> Result<u32> {
        let b = self.get_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn get_i32(&mut self) -> Result<i32> {
        Ok(self.get_u32()? as i32)
    }

    /// Reads a length-prefixed string, truncating anything beyond
    /// [`MAX_STRING_LEN`] bytes (the remainder is still consumed, just not
    /// buffered — these are never longer than a handful of bytes in
    /// practice).
    fn get_string(&mut self) -> Result<String> {
        let raw_len = self.get_u32()? as usize;
        let result_len = raw_len.min(MAX_STRING_LEN);
        let bytes = self.get_bytes(result_len)?;
        self.skip((raw_len - result_len) as u64)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn skip_string(&mut self) -> Result<()> {
        let len = self.get_u32()? as u64;
        self.skip(len)
    }

    fn skip_dict(&mut self) -> Result<()> {
        let count = self.get_u32()?;
        for _ in 0..count {
            self.skip_string()?;
            self.skip_string()?;
        }
        Ok(())
    }

    fn parse_prologue(&mut self) -> Result<()> {
        let header = self.get_bytes(20)?;
        let vox_fourcc = u32::from_le_bytes(header[0..4].try_into().unwrap());
        let main_fourcc = u32::from_le_bytes(header[8..12].try_into().unwrap());
        let content_size = u32::from_le_bytes(header[12..16].try_into().unwrap());
        if vox_fourcc != FOURCC_VOX || main_fourcc != FOURCC_MAIN {
            return Err(VoxError::UnrecognizedFileFormat);
        }
        self.read_counter = 0;
        self.skip(content_size as u64)
    }

    /// Reads children until the source runs out, ignoring the MAIN chunk's
    /// own declared content size. MagicaVoxel scenes can exceed the 32-bit
    /// size field, so the only reliable end-of-scene signal is EOF.
    fn parse_main_children(&mut self) -> Result<()> {
        loop {
            self.read_counter = 0;
            let header = match self.source.try_get_bytes(12)? {
                Some(h) => h.to_vec(),
                None => break,
            };
            self.read_counter += 12;
            let fourcc = u32::from_le_bytes(header[0..4].try_into().unwrap());
            let content_size = u32::from_le_bytes(header[4..8].try_into().unwrap()) as usize;
            let children_size = u32::from_le_bytes(header[8..12].try_into().unwrap()) as u64;

            self.read_counter = 0;
            match fourcc {
                FOURCC_SIZE => self.parse_size_chunk()?,
                FOURCC_XYZI => self.parse_model_chunk()?,
                FOURCC_RGBA => self.parse_rgba_chunk()?,
                FOURCC_NSHP => self.parse_shape_chunk()?,
                FOURCC_NGRP => self.parse_group_chunk()?,
                FOURCC_NTRN => self.parse_transform_chunk()?,
                FOURCC_LAYR => self.parse_layer_chunk()?,
                other => {
                    trace!("skipping unrecognized chunk {other:08x}");
                    self.skip(content_size as u64)?;
                }
            }
            if self.read_counter != content_size {
                return Err(VoxError::InvalidFileStructure(format!(
                    "chunk {fourcc:08x} declared {content_size} bytes but consumed {}",
                    self.read_counter
                )));
            }
            self.skip(children_size)?;
        }
        Ok(())
    }

    fn parse_size_chunk(&mut self) -> Result<()> {
        let x = self.get_u32()?;
        let y = self.get_u32()?;
        let z = self.get_u32()?;
        self.model_sizes.push(ModelSize([x, y, z]));
        Ok(())
    }

    fn parse_model_chunk(&mut self) -> Result<()> {
        let voxel_count = self.get_u32()? as u64;
        let data_mark = self.source.bookmark()?;
        self.models.push(Model {
            voxel_count,
            data_mark,
        });
        self.skip(4 * voxel_count)
    }

    fn parse_shape_chunk(&mut self) -> Result<()> {
        let node_id = self.get_u32()?;
        self.skip_dict()?;
        let model_count = self.get_u32()?;
        if model_count < 1 {
            return Err(VoxError::InvalidFileStructure(
                "nSHP chunk has zero model frames".into(),
            ));
        }
        let mut model_idx = 0usize;
        for i in 0..model_count {
            let idx = self.get_u32()? as usize;
            if i == 0 {
                model_idx = idx;
            }
            // Additional animation frames beyond the first are not
            // supported; discard their per-frame dictionaries.
            self.skip_dict()?;
        }
        self.builder.push_shape(node_id, model_idx);
        Ok(())
    }

    fn parse_group_chunk(&mut self) -> Result<()> {
        let node_id = self.get_u32()?;
        self.skip_dict()?;
        let child_count = self.get_u32()?;
        let mut children = Vec::with_capacity(child_count as usize);
        for _ in 0..child_count {
            children.push(self.get_u32()?);
        }
        self.builder.push_group(node_id, &children);
        Ok(())
    }

    fn parse_is_hidden_dict(&mut self) -> Result<bool> {
        let mut is_hidden = false;
        let count = self.get_u32()?;
        for _ in 0..count {
            let key = self.get_string()?;
            if key == "_hidden" {
                let value = self.get_string()?;
                is_hidden = value.trim().parse::<i32>().unwrap_or(0) != 0;
            } else {
                self.skip_string()?;
            }
        }
        Ok(is_hidden)
    }

    fn parse_transform_frame_dict(&mut self) -> Result<Transform> {
        let mut t = Transform::IDENTITY;
        let count = self.get_u32()?;
        for _ in 0..count {
            let key = self.get_string()?;
            if key == "_r" {
                let rotcode: u32 = self
                    .get_string()?
                    .trim()
                    .parse()
                    .map_err(|_| VoxError::InvalidFileStructure("malformed _r rotation code".into()))?;
                t.cols[0] = (rotcode & 0x3).min(2) as u8;
                t.cols[1] = (rotcode >> 2 & 0x3).min(2) as u8;
                // Matches voxflat.c's unsigned `3u - col0 - col1`: this wraps
                // around on malformed codes where col0+col1>3 instead of
                // flooring at zero, and the following `.min(2)` then clamps
                // that wrapped value down to the nearest legal column.
                t.cols[2] = 3u32
                    .wrapping_sub(u32::from(t.cols[0]))
                    .wrapping_sub(u32::from(t.cols[1]))
                    .min(2) as u8;
                t.signs[0] = if rotcode & 0x10 != 0 { -1 } else { 1 };
                t.signs[1] = if rotcode & 0x20 != 0 { -1 } else { 1 };
                t.signs[2] = if rotcode & 0x40 != 0 { -1 } else { 1 };
            } else if key == "_t" {
                let value = self.get_string()?;
                let mut parts = value.split_whitespace();
                for axis in t.translation.iter_mut() {
                    if let Some(tok) = parts.next() {
                        *axis = tok.parse().unwrap_or(0);
                    }
                }
            } else {
                self.skip_string()?;
            }
        }
        Ok(t)
    }

    fn parse_transform_chunk(&mut self) -> Result<()> {
        let node_id = self.get_u32()?;
        let is_hidden = self.parse_is_hidden_dict()?;
        let child_id = self.get_u32()?;
        let _reserved = self.get_i32()?;
        let layer_value = self.get_i32()?;
        let layer_id = if layer_value >= 0 {
            Some(layer_value as u32)
        } else {
            None
        };
        let frame_count = self.get_u32()?;
        if frame_count < 1 {
            return Err(VoxError::InvalidFileStructure(
                "nTRN chunk has zero transform frames".into(),
            ));
        }
        let mut transform = Transform::IDENTITY;
        for i in 0..frame_count {
            if i == 0 {
                transform = self.parse_transform_frame_dict()?;
            } else {
                self.skip_dict()?;
            }
        }
        self.builder
            .push_transform(node_id, child_id, layer_id, is_hidden, transform);
        Ok(())
    }

    fn parse_layer_chunk(&mut self) -> Result<()> {
        let layer_id = self.get_u32()?;
        let is_hidden = self.parse_is_hidden_dict()?;
        self.skip(4)?;
        self.builder.push_layer(layer_id, is_hidden);
        Ok(())
    }

    fn parse_rgba_chunk(&mut self) -> Result<()> {
        if self.palette.is_some() {
            warn!("ignoring duplicate RGBA chunk");
            return self.skip(256 * 4);
        }
        let data = self.get_bytes(256 * 4)?;
        let mut entries = [[0u8; 4]; 256];
        // The file's 256 colors start at palette index 1; index 0 always
        // stays transparent black.
        for i in 0..255 {
            entries[i + 1] = [data[i * 4], data[i * 4 + 1], data[i * 4 + 2], data[i * 4 + 3]];
        }
        debug!("loaded custom RGBA palette");
        self.palette = Some(Palette(entries));
        Ok(())
    }
}
