//! Error types for vecs format operations

/// Errors that can occur while interpreting vector file data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VecsError {
    /// File suffix is neither `.fvecs` nor `.ivecs`
    UnsupportedFormat,
    /// Record header declares a negative dimension
    NegativeDimension,
    /// Payload length cannot be represented on this platform
    LengthOverflow,
}

impl core::fmt::Display for VecsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            VecsError::UnsupportedFormat => "Unknown file format. Please use .fvecs or .ivecs files.",
            VecsError::NegativeDimension => "Negative vector dimension",
            VecsError::LengthOverflow => "Vector payload length overflows",
        };
        write!(f, "{msg}")
    }
}

/// Result type for vecs format operations
pub type Result<T> = core::result::Result<T, VecsError>;
