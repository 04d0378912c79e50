//! Format constants for vector files

/// Size of the per-record dimension/count header
pub const HEADER_SIZE: usize = 4;

/// Size of every element, float or integer
pub const ELEMENT_SIZE: usize = 4;

/// Default number of records printed by the record view
pub const DEFAULT_VIEW_COUNT: usize = 5;

/// Default prefix size loaded for the structural scan
pub const DEFAULT_SCAN_BYTES: usize = 2048;

/// Default number of records kept by the structural scan
pub const DEFAULT_DISPLAY_RECORDS: usize = 3;

/// Plausible dimensions for SIFT-style float vectors
pub mod sift {
    /// The SIFT descriptor dimension
    pub const EXPECTED_DIM: i32 = 128;

    /// Smallest dimension accepted around the expected one
    pub const MIN_DIM: i32 = 80;

    /// Largest dimension accepted around the expected one
    pub const MAX_DIM: i32 = 200;
}

/// File name suffixes
pub mod extension {
    pub const FVECS: &str = "fvecs";
    pub const IVECS: &str = "ivecs";
}
