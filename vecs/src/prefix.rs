//! Bounded prefix loading for the structural scanner
//!
//! The scanner needs the first `max_bytes` of a file as one contiguous slice.
//! With the `mmap` feature the prefix is memory mapped, otherwise it is read
//! into an owned buffer. Either way the length is `min(max_bytes, file size)`.

use std::fs::File;
use std::io::{self, Read};
#[cfg(not(feature = "mmap"))]
use std::io::{Seek, SeekFrom};

#[cfg(feature = "mmap")]
use memmap2::{Mmap, MmapOptions};
use tracing::trace;
use vecs_core::ByteSource;

/// A loaded file prefix
pub enum PrefixBuffer {
    /// Memory mapped prefix of exactly `len` bytes
    #[cfg(feature = "mmap")]
    Mapped { map: Mmap, len: usize },
    /// Prefix copied into memory
    Owned(Vec<u8>),
}

impl PrefixBuffer {
    /// Read at most `max_bytes` from a reader into an owned buffer
    pub fn read_from<R: Read>(reader: R, max_bytes: usize) -> io::Result<Self> {
        let mut buf = Vec::with_capacity(max_bytes.min(crate::constants::DEFAULT_SCAN_BYTES));
        reader.take(max_bytes as u64).read_to_end(&mut buf)?;
        trace!(len = buf.len(), "prefix read");
        Ok(PrefixBuffer::Owned(buf))
    }

    /// Memory map the first `min(max_bytes, file_size)` bytes of a file
    #[cfg(feature = "mmap")]
    pub fn map_file(file: &File, file_size: u64, max_bytes: usize) -> io::Result<Self> {
        let len = usize::try_from(file_size).map_or(max_bytes, |size| size.min(max_bytes));

        // Zero-length mappings are rejected by the OS
        if len == 0 {
            return Ok(PrefixBuffer::Owned(Vec::new()));
        }

        // SAFETY: Read-only mapping of a range inside the file. The file is not
        // modified by this process while the mapping is alive.
        let map = unsafe { MmapOptions::new().len(len).map(file)? };
        trace!(len, "prefix mapped");
        Ok(PrefixBuffer::Mapped { map, len })
    }

    /// Load a prefix using the best strategy the build supports
    pub fn load(file: &File, file_size: u64, max_bytes: usize) -> io::Result<Self> {
        #[cfg(feature = "mmap")]
        {
            Self::map_file(file, file_size, max_bytes)
        }
        #[cfg(not(feature = "mmap"))]
        {
            let _ = file_size;
            let mut file = file;
            file.seek(SeekFrom::Start(0))?;
            Self::read_from(file, max_bytes)
        }
    }

    /// Whether the prefix is backed by a memory mapping
    pub fn is_mapped(&self) -> bool {
        match self {
            #[cfg(feature = "mmap")]
            PrefixBuffer::Mapped { .. } => true,
            PrefixBuffer::Owned(_) => false,
        }
    }
}

impl ByteSource for PrefixBuffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            #[cfg(feature = "mmap")]
            PrefixBuffer::Mapped { map, len } => &map[..*len],
            PrefixBuffer::Owned(buf) => buf,
        }
    }
}

impl std::fmt::Debug for PrefixBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixBuffer")
            .field("mapped", &self.is_mapped())
            .field("len", &self.size())
            .finish()
    }
}
