//! Byte source abstraction
//!
//! The structural scanner works on an immutable, fully loaded byte buffer.
//! This trait is the interface the I/O layer implements for its loaded file
//! prefixes. It carries no implementations here.

/// Trait for backends that expose a contiguous, immutable byte buffer
///
/// Implementors may own the bytes, borrow them, or map them from a file.
/// The scanner only ever sees the slice.
pub trait ByteSource {
    /// Get a slice of the underlying data
    ///
    /// The slice starts at the first byte of the file. It may cover the
    /// whole file or only a prefix of it, so callers must not infer the file
    /// size from its length.
    fn as_slice(&self) -> &[u8];

    /// Get the size of the data in bytes
    ///
    /// Default implementation uses the slice length.
    fn size(&self) -> usize {
        self.as_slice().len()
    }
}
