//! vecs - Decoder and inspector for `.fvecs` / `.ivecs` vector files
//!
//! This crate provides the I/O side of the vecs workspace: a streaming record
//! reader, a whole-file loader for fixed-dimension datasets, bounded prefix
//! loading for the structural scanner, and text rendering of the views.
//!
//! ## Architecture
//!
//! - **vecs-core**: format definitions, element decoding, the structural
//!   scanner and statistics (no I/O)
//! - **vecs**: file access, the record reader, formatting and the CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vecs::{display::RecordsView, VecsFile};
//!
//! fn example() -> vecs::Result<()> {
//!     let file = VecsFile::open("siftsmall_base.fvecs")?;
//!     let outcome = file.read_records(5)?;
//!     print!("{}", RecordsView(&outcome.records));
//!     if let Some(err) = outcome.diagnostic {
//!         eprintln!("{err}");
//!     }
//!     Ok(())
//! }
//! ```

// Re-export core abstractions and format definitions
pub use vecs_core::{
    // Format definitions
    constants, VecFormat,
    // Records and statistics
    DynamicRecords, Record, Summary,
    // Scanner
    scan, scan_dynamic, DimensionPolicy, DimensionWindow, DynamicScan, HeaderOrder, Resync,
    ScanConfig, ScanReport, ScannedRecord,
    // Traits
    ByteSource, Fixed, VecElement,
    // Error handling
    VecsError,
};

pub mod dataset;
pub mod display;
pub mod error;
pub mod file_io;
pub mod prefix;
pub mod reader;

pub use dataset::{load_uniform, UniformVectors};
pub use error::{ReadError, Result};
pub use file_io::{LayoutReport, VecsFile};
pub use prefix::PrefixBuffer;
pub use reader::{read_records, read_records_dynamic, ReadOutcome};
