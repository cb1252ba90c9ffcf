use std::io::{Read, Seek, SeekFrom};

use crate::error::{Result, VoxError};

/// Scratch buffer capacity for stream reads — large enough to hold a
/// 256-entry RGBA palette chunk (1024 bytes) in one shot.
pub(crate) const SCRATCH_CAPACITY: usize = 1024;

/// A bookmarked position that can be restored with [`ByteSource::seek_to`].
///
/// For memory sources this is a plain byte offset; for streams it is
/// whatever `Seek::stream_position` returned, replayed through
/// `SeekFrom::Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(pub(crate) u64);

/// Uniform seek/read access over either a borrowed memory buffer or a
/// caller-owned seekable stream.
///
/// Every `read`/`skip` call increments `read_counter`, which
/// [`crate::reader::ChunkReader`] resets per chunk to detect chunks whose
/// declared content size does not match what was actually consumed.
pub enum ByteSource<'a> {
    Memory {
        buffer: &'a [u8],
        offset: usize,
    },
    Stream {
        stream: Box<dyn SeekRead + 'a>,
        scratch: Box<[u8; SCRATCH_CAPACITY]>,
    },
}

/// Object-safe union of `Read + Seek`, so either an owned stream (a file
/// opened by [`crate::VoxScene::open_path`]) or a caller-borrowed one (one
/// passed to [`crate::VoxScene::open_stream`]) can be boxed into the same
/// field.
pub trait SeekRead: Read + Seek {}
impl<T: Read + Seek + ?Sized> SeekRead for T {}

impl<'a> ByteSource<'a> {
    pub fn from_memory(buffer: &'a [u8]) -> Self {
        ByteSource::Memory { buffer, offset: 0 }
    }

    /// Wraps any owned or borrowed seekable stream. Passing an owned
    /// `File` yields a `ByteSource<'static>` whose `Drop` closes the file;
    /// passing a `&mut` reference ties the source to the borrow's lifetime
    /// and leaves closing it to the caller.
    pub fn from_stream<S: SeekRead + 'a>(stream: S) -> Self {
        ByteSource::Stream {
            stream: Box::new(stream),
            scratch: Box::new([0u8; SCRATCH_CAPACITY]),
        }
    }

    /// Read exactly `count` bytes, returning `None` on a clean short read
    /// (EOF with zero bytes available) and `Err` on a genuine I/O error.
    ///
    /// `count` must not exceed [`SCRATCH_CAPACITY`].
    pub(crate) fn try_get_bytes(&mut self, count: usize) -> Result<Option<&[u8]>> {
        debug_assert!(count <= SCRATCH_CAPACITY);
        match self {
            ByteSource::Memory { buffer, offset } => {
                if count > buffer.len() - *offset {
                    return Ok(None);
                }
                let start = *offset;
                *offset += count;
                Ok(Some(&buffer[start..start + count]))
            }
            ByteSource::Stream { stream, scratch } => {
                match stream.read_exact(&mut scratch[..count]) {
                    Ok(()) => Ok(Some(&scratch[..count])),
                    Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
                    Err(_) => Err(VoxError::FileRead),
                }
            }
        }
    }

    /// Read exactly `count` bytes, failing with [`VoxError::UnexpectedEof`]
    /// on a short read.
    pub(crate) fn get_bytes(&mut self, count: usize) -> Result<&[u8]> {
        self.try_get_bytes(count)?.ok_or(VoxError::UnexpectedEof)
    }

    /// Advance the cursor by up to `count` bytes, clamped to the end of a
    /// memory buffer and performed via `SeekFrom::Current` on a stream.
    pub(crate) fn skip(&mut self, count: u64) -> Result<()> {
        match self {
            ByteSource::Memory { buffer, offset } => {
                let remaining = (buffer.len() - *offset) as u64;
                *offset += count.min(remaining) as usize;
                Ok(())
            }
            ByteSource::Stream { stream, .. } => {
                stream
                    .seek(SeekFrom::Current(i64::try_from(count).unwrap_or(i64::MAX)))
                    .map_err(|_| VoxError::FileSeek)?;
                Ok(())
            }
        }
    }

    /// Capture the current position so it can be restored later.
    pub(crate) fn bookmark(&mut self) -> Result<Mark> {
        match self {
            ByteSource::Memory { offset, .. } => Ok(Mark(*offset as u64)),
            ByteSource::Stream { stream, .. } => {
                Ok(Mark(stream.stream_position().map_err(|_| VoxError::FileSeek)?))
            }
        }
    }

    /// Restore a position captured by [`ByteSource::bookmark`].
    pub(crate) fn seek_to(&mut self, mark: Mark) -> Result<()> {
        match self {
            ByteSource::Memory { offset, .. } => {
                *offset = mark.0 as usize;
                Ok(())
            }
            ByteSource::Stream { stream, .. } => {
                stream
                    .seek(SeekFrom::Start(mark.0))
                    .map_err(|_| VoxError::FileSeek)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_reads_and_skips() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut src = ByteSource::from_memory(&data);
        assert_eq!(src.get_bytes(4).unwrap(), &[1, 2, 3, 4]);
        src.skip(2).unwrap();
        assert_eq!(src.get_bytes(2).unwrap(), &[7, 8]);
        assert!(matches!(src.get_bytes(1), Err(VoxError::UnexpectedEof)));
    }

    #[test]
    fn memory_source_bookmark_round_trips() {
        let data = [1u8, 2, 3, 4];
        let mut src = ByteSource::from_memory(&data);
        src.get_bytes(2).unwrap();
        let mark = src.bookmark().unwrap();
        src.get_bytes(2).unwrap();
        src.seek_to(mark).unwrap();
        assert_eq!(src.get_bytes(2).unwrap(), &[3, 4]);
    }

    #[test]
    fn memory_source_skip_clamps_to_end() {
        let data = [1u8, 2, 3];
        let mut src = ByteSource::from_memory(&data);
        src.skip(100).unwrap();
        assert!(matches!(src.get_bytes(1), Err(VoxError::UnexpectedEof)));
    }

    #[test]
    fn stream_source_reads_and_bookmarks() {
        use std::io::Cursor;
        let mut cursor = Cursor::new(vec![10u8, 20, 30, 40, 50]);
        let mut src = ByteSource::from_stream(&mut cursor);
        assert_eq!(src.get_bytes(2).unwrap(), &[10, 20]);
        let mark = src.bookmark().unwrap();
        src.get_bytes(2).unwrap();
        src.seek_to(mark).unwrap();
        assert_eq!(src.get_bytes(3).unwrap(), &[30, 40, 50]);
    }
}
