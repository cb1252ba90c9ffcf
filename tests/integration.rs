//! End-to-end tests exercising [`vox_scene::VoxScene`] against small,
//! hand-built `.vox` byte buffers.

use std::io::{Cursor, Read, Seek, SeekFrom};

use pretty_assertions::assert_eq;
use vox_scene::{VoxError, VoxScene};

fn chunk(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
    chunk_with_children(fourcc, content, &[])
}

fn chunk_with_children(fourcc: &[u8; 4], content: &[u8], children: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(fourcc);
    out.extend_from_slice(&(content.len() as u32).to_le_bytes());
    out.extend_from_slice(&(children.len() as u32).to_le_bytes());
    out.extend_from_slice(content);
    out.extend_from_slice(children);
    out
}

fn prologue() -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"VOX ");
    out.extend_from_slice(&150u32.to_le_bytes());
    out.extend_from_slice(b"MAIN");
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out
}

fn size_chunk(size: [u32; 3]) -> Vec<u8> {
    let mut content = Vec::new();
    for axis in size {
        content.extend_from_slice(&axis.to_le_bytes());
    }
    chunk(b"SIZE", &content)
}

fn xyzi_chunk(voxels: &[(u8, u8, u8, u8)]) -> Vec<u8> {
    let mut content = (voxels.len() as u32).to_le_bytes().to_vec();
    for &(x, y, z, c) in voxels {
        content.extend_from_slice(&[x, y, z, c]);
    }
    chunk(b"XYZI", &content)
}

/// A single 2x2x2 model with three voxels, no scene graph — the implicit
/// single-instance root is synthesized.
fn three_voxel_file() -> Vec<u8> {
    let mut data = prologue();
    data.extend(size_chunk([2, 2, 2]));
    data.extend(xyzi_chunk(&[(0, 0, 0, 1), (1, 0, 0, 2), (1, 1, 1, 3)]));
    data
}

#[test]
fn rejects_truncated_prologue() {
    let data = b"VOX ".to_vec();
    let err = VoxScene::open_memory(&data).unwrap_err();
    assert!(matches!(err, VoxError::UnexpectedEof));
}

#[test]
fn rejects_wrong_magic_bytes() {
    let mut data = b"RIFF".to_vec();
    data.extend_from_slice(&[0u8; 16]);
    let err = VoxScene::open_memory(&data).unwrap_err();
    assert!(matches!(err, VoxError::UnrecognizedFileFormat));
}

#[test]
fn rejects_file_with_no_models() {
    let data = prologue();
    let err = VoxScene::open_memory(&data).unwrap_err();
    assert!(matches!(err, VoxError::InvalidScene(_)));
}

#[test]
fn count_voxels_matches_model_voxel_count() {
    let data = three_voxel_file();
    let scene = VoxScene::open_memory(&data).unwrap();
    assert_eq!(scene.count_voxels(), 3);
}

#[test]
fn calculate_bounds_centers_model_on_even_size() {
    let data = three_voxel_file();
    let scene = VoxScene::open_memory(&data).unwrap();
    let bounds = scene.calculate_bounds();
    assert_eq!(bounds.min, [-1, -1, -1]);
    assert_eq!(bounds.max, [0, 0, 0]);
}

#[test]
fn reading_past_the_end_returns_fewer_voxels_then_zero() {
    let data = three_voxel_file();
    let mut scene = VoxScene::open_memory(&data).unwrap();

    let mut xyz = [[0i32; 3]; 5];
    let mut coloridx = [0u8; 5];
    let count = scene.read_xyz_coloridx(&mut xyz, &mut coloridx).unwrap();
    assert_eq!(count, 3);

    let count = scene.read_xyz_coloridx(&mut xyz, &mut coloridx).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn hidden_layer_excludes_instance_from_count_and_bounds() {
    // Scene graph: root transform (id 0) -> shape (id 1), its layer (0) hidden.
    let mut data = prologue();
    data.extend(size_chunk([1, 1, 1]));
    data.extend(xyzi_chunk(&[(0, 0, 0, 1)]));
    data.extend(chunk(b"LAYR", &{
        let mut c = 0u32.to_le_bytes().to_vec(); // layer id 0
        c.extend_from_slice(&1u32.to_le_bytes()); // one dict entry
        c.extend_from_slice(&7u32.to_le_bytes());
        c.extend_from_slice(b"_hidden");
        c.extend_from_slice(&1u32.to_le_bytes());
        c.extend_from_slice(b"1");
        c.extend_from_slice(&(-1i32).to_le_bytes()); // reserved field
        c
    }));
    data.extend(chunk(b"nTRN", &{
        let mut c = 0u32.to_le_bytes().to_vec(); // node id 0
        c.extend_from_slice(&0u32.to_le_bytes()); // empty dict (not hidden directly)
        c.extend_from_slice(&1u32.to_le_bytes()); // child node id 1
        c.extend_from_slice(&(-1i32).to_le_bytes()); // reserved
        c.extend_from_slice(&0i32.to_le_bytes()); // layer id 0
        c.extend_from_slice(&1u32.to_le_bytes()); // one frame
        c.extend_from_slice(&0u32.to_le_bytes()); // empty frame dict (identity transform)
        c
    }));
    data.extend(chunk(b"nSHP", &{
        let mut c = 1u32.to_le_bytes().to_vec(); // node id 1
        c.extend_from_slice(&0u32.to_le_bytes()); // empty dict
        c.extend_from_slice(&1u32.to_le_bytes()); // one model frame
        c.extend_from_slice(&0u32.to_le_bytes()); // model index 0
        c.extend_from_slice(&0u32.to_le_bytes()); // empty frame dict
        c
    }));

    let scene = VoxScene::open_memory(&data).unwrap();
    assert_eq!(scene.count_voxels(), 0);
    let bounds = scene.calculate_bounds();
    assert_eq!(bounds.min, [0, 0, 0]);
    assert_eq!(bounds.max, [0, 0, 0]);
}

#[test]
fn mismatched_output_buffers_are_rejected_as_invalid_argument() {
    let data = three_voxel_file();
    let mut scene = VoxScene::open_memory(&data).unwrap();
    let mut xyz = [[0i32; 3]; 3];
    let mut coloridx = [0u8; 2];
    let err = scene.read_xyz_coloridx(&mut xyz, &mut coloridx).unwrap_err();
    assert!(matches!(err, VoxError::InvalidArgument(_)));
}

/// Simulates the stream's position being moved out from under the reader
/// (e.g. by another part of a program sharing the same file handle): after
/// `reads_allowed` successful reads, every further read first jumps the
/// underlying cursor to EOF before delegating.
struct PositionYankedAfter {
    cursor: Cursor<Vec<u8>>,
    reads_allowed: usize,
}

impl Read for PositionYankedAfter {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.reads_allowed == 0 {
            self.cursor.seek(SeekFrom::End(0))?;
        } else {
            self.reads_allowed -= 1;
        }
        self.cursor.read(buf)
    }
}

impl Seek for PositionYankedAfter {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.cursor.seek(pos)
    }
}

#[test]
fn sticky_error_latches_after_unexpected_eof() {
    let data = three_voxel_file();
    let mut stream = PositionYankedAfter {
        cursor: Cursor::new(data),
        reads_allowed: 7,
    };
    let mut scene = VoxScene::open_stream(&mut stream).unwrap();

    let mut xyz = [[0i32; 3]; 2];
    let mut coloridx = [0u8; 2];

    // First call succeeds and consumes the allotted reads.
    let count = scene.read_xyz_coloridx(&mut xyz, &mut coloridx).unwrap();
    assert_eq!(count, 2);

    // The stream's position is now yanked to EOF on every further read.
    let err = scene.read_xyz_coloridx(&mut xyz, &mut coloridx).unwrap_err();
    assert!(matches!(err, VoxError::UnexpectedEof));

    // Trying again returns the same latched error rather than retrying.
    let err = scene.read_xyz_coloridx(&mut xyz, &mut coloridx).unwrap_err();
    assert!(matches!(err, VoxError::UnexpectedEof));
}

#[test]
fn open_stream_and_open_memory_agree_on_voxel_count() {
    let data = three_voxel_file();
    let mut cursor = Cursor::new(data.clone());
    let stream_scene = VoxScene::open_stream(&mut cursor).unwrap();
    let memory_scene = VoxScene::open_memory(&data).unwrap();
    assert_eq!(stream_scene.count_voxels(), memory_scene.count_voxels());
}

#[test]
fn default_palette_reserves_index_zero_as_transparent() {
    let data = three_voxel_file();
    let scene = VoxScene::open_memory(&data).unwrap();
    assert_eq!(scene.palette().entries()[0], [0, 0, 0, 0]);
}
