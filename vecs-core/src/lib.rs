#![no_std]

//! vecs-core - `.fvecs` / `.ivecs` vector file format definitions
//!
//! This crate provides the format definitions, element decoding and the
//! structural scanner for the TEXMEX vector file family. It performs no I/O:
//! everything here operates on byte slices handed in by the caller.

extern crate alloc;

pub mod error;
pub mod format;
pub mod record;
pub mod scanner;
pub mod stats;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use record::{DynamicRecords, Record};
pub use scanner::{
    scan, scan_dynamic, DynamicScan, HeaderOrder, Resync, ScanConfig, ScanReport, ScannedRecord,
};
pub use stats::Summary;
pub use traits::*;
pub use validation::{DimensionPolicy, DimensionWindow};
