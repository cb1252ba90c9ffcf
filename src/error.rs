use thiserror::Error;

/// Error type for opening and reading a `.vox` scene.
///
/// Variants correspond one-to-one with the condition they report; there is
/// deliberately no catch-all "other" variant, so callers can match
/// exhaustively on failure causes the same way they would match on the
/// reference implementation's error codes.
#[derive(Error, Debug, Clone)]
pub enum VoxError {
    /// The named input could not be opened.
    #[error("failed to open input file: {0}")]
    FileOpen(String),

    /// A read from the underlying stream failed.
    #[error("failed to read from input stream")]
    FileRead,

    /// A seek/tell/bookmark operation on the underlying stream failed.
    #[error("input stream is not seekable")]
    FileSeek,

    /// The 20-byte prologue did not start with `"VOX "` / `"MAIN"`.
    #[error("unrecognized file format")]
    UnrecognizedFileFormat,

    /// A read required more bytes than the source had left.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Chunk framing was inconsistent, or a required count field was zero
    /// where the format requires at least one.
    #[error("invalid vox file structure: {0}")]
    InvalidFileStructure(String),

    /// The scene graph is unacyclic-unsafe, references an unresolved id, or
    /// a shape points past the end of the model table.
    #[error("invalid scene graph: {0}")]
    InvalidScene(String),

    /// Allocation failed or a size computation would overflow.
    #[error("out of memory or size overflow")]
    OutOfMemory,

    /// A caller-supplied output buffer was too small for `max_count`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, VoxError>;
