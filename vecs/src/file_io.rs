//! File access for `.fvecs` / `.ivecs` files
//!
//! The format is chosen from the file suffix before the file is touched, so an
//! unsupported name fails without any I/O. Every read opens its own handle,
//! which is released when the call returns, early stops included.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use vecs_core::{
    scan_dynamic, ByteSource, DynamicRecords, DynamicScan, ScanConfig, VecElement, VecFormat,
    VecsError,
};

use crate::dataset::{load_uniform, UniformVectors};
use crate::error::{ReadError, Result};
use crate::prefix::PrefixBuffer;
use crate::reader::{read_records_dynamic, ReadOutcome};

/// Handle for a vector file on disk
#[derive(Debug, Clone)]
pub struct VecsFile {
    pub path: PathBuf,
    pub format: VecFormat,
    /// File size in bytes at open time
    pub size: u64,
}

impl VecsFile {
    /// Open a vector file, selecting the format by suffix
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let format = Self::format_of(&path)?;

        let size = std::fs::metadata(&path)
            .map_err(|source| ReadError::Open {
                path: path.clone(),
                source,
            })?
            .len();

        debug!(path = %path.display(), %format, size, "opened vector file");
        Ok(Self { path, format, size })
    }

    /// Format implied by a path's suffix
    pub fn format_of(path: &Path) -> Result<VecFormat> {
        path.file_name()
            .and_then(|name| name.to_str())
            .ok_or(VecsError::UnsupportedFormat)
            .and_then(VecFormat::from_file_name)
            .map_err(|_| ReadError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    fn open_handle(&self) -> Result<File> {
        File::open(&self.path).map_err(|source| ReadError::Open {
            path: self.path.clone(),
            source,
        })
    }

    /// Read up to `max_count` records from the start of the file
    ///
    /// Opening failures are returned as errors. Failures while reading are
    /// reported in the outcome alongside the records read before them.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn read_records(&self, max_count: usize) -> Result<ReadOutcome<DynamicRecords>> {
        let mut reader = BufReader::new(self.open_handle()?);
        let outcome = read_records_dynamic(&mut reader, max_count, self.format);
        if let Some(err) = &outcome.diagnostic {
            warn!(%err, "read stopped early");
        }
        Ok(outcome)
    }

    /// Load the whole file as a set of vectors sharing one dimension
    ///
    /// The element type must match the file format. `min_dim` rejects files
    /// whose vectors are narrower, such as ground truth with too few
    /// neighbours per query.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load_uniform<T: VecElement>(&self, min_dim: Option<usize>) -> Result<UniformVectors<T>> {
        if T::FORMAT != self.format {
            return Err(ReadError::ElementType {
                path: self.path.clone(),
                format: self.format,
                requested: T::FORMAT,
            });
        }

        let mut reader = BufReader::new(self.open_handle()?);
        let set = load_uniform::<T, _>(&mut reader, self.size, min_dim)?;
        info!(vectors = set.len(), dim = set.dim, "loaded uniform set");
        Ok(set)
    }

    /// Load the first `min(max_bytes, size)` bytes of the file
    pub fn read_prefix(&self, max_bytes: usize) -> Result<PrefixBuffer> {
        let file = self.open_handle()?;
        PrefixBuffer::load(&file, self.size, max_bytes).map_err(|source| ReadError::Prefix {
            path: self.path.clone(),
            source,
        })
    }

    /// Run the structural scanner over a bounded prefix of the file
    #[instrument(level = "debug", skip(self, config), fields(path = %self.path.display()))]
    pub fn scan_prefix(&self, max_bytes: usize, config: &ScanConfig) -> Result<LayoutReport> {
        let prefix = self.read_prefix(max_bytes)?;
        let scan = scan_dynamic(prefix.as_slice(), self.format, config);

        for resync in scan.resyncs() {
            warn!(
                "Expected a plausible dimension but found {} at offset {}",
                resync.found(),
                resync.offset
            );
        }
        info!(
            records = scan.record_count(),
            resyncs = scan.resyncs().len(),
            end_offset = scan.end_offset(),
            "prefix scanned"
        );

        Ok(LayoutReport {
            path: self.path.clone(),
            file_size: self.size,
            prefix_len: prefix.size(),
            scan,
        })
    }
}

/// Structural scan of a file prefix together with file facts for display
#[derive(Debug, Clone)]
pub struct LayoutReport {
    pub path: PathBuf,
    pub file_size: u64,
    /// Bytes actually scanned
    pub prefix_len: usize,
    pub scan: DynamicScan,
}

impl LayoutReport {
    pub fn format(&self) -> VecFormat {
        self.scan.format()
    }
}
