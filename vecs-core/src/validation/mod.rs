//! Validation utilities for vector file records
//!
//! This module contains pure functions with no I/O dependencies: the
//! dimension plausibility policy used for resynchronization and the checked
//! arithmetic that decides whether a record fits in the bytes available.

pub mod bounds;
pub mod dimension;

pub use bounds::{payload_len, record_end};
pub use dimension::{DimensionPolicy, DimensionWindow};
