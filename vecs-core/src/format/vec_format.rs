//! Vector file variants

use super::constants::{extension, ELEMENT_SIZE};
use crate::error::{Result, VecsError};
use crate::validation::{DimensionPolicy, DimensionWindow};

/// The two sibling vector file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VecFormat {
    /// `.fvecs`: little-endian `f32` elements
    FloatVectors,
    /// `.ivecs`: little-endian `i32` elements
    IntVectors,
}

impl VecFormat {
    /// Select a format from a bare extension (without the dot)
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext {
            extension::FVECS => Ok(VecFormat::FloatVectors),
            extension::IVECS => Ok(VecFormat::IntVectors),
            _ => Err(VecsError::UnsupportedFormat),
        }
    }

    /// Select a format from a file name by its suffix
    pub fn from_file_name(name: &str) -> Result<Self> {
        let (_, ext) = name.rsplit_once('.').ok_or(VecsError::UnsupportedFormat)?;
        Self::from_extension(ext)
    }

    /// File extension for this format
    pub const fn extension(self) -> &'static str {
        match self {
            VecFormat::FloatVectors => extension::FVECS,
            VecFormat::IntVectors => extension::IVECS,
        }
    }

    /// Size of one element in bytes
    pub const fn element_size(self) -> usize {
        ELEMENT_SIZE
    }

    /// Human-readable type line
    pub const fn description(self) -> &'static str {
        match self {
            VecFormat::FloatVectors => "FVECS (Floating-point vectors)",
            VecFormat::IntVectors => "IVECS (Integer vectors)",
        }
    }

    /// Element kind used in summaries
    pub const fn element_kind(self) -> &'static str {
        match self {
            VecFormat::FloatVectors => "float",
            VecFormat::IntVectors => "integer",
        }
    }

    /// Dimension policy the structural scanner applies by default
    pub const fn default_policy(self) -> DimensionPolicy {
        match self {
            VecFormat::FloatVectors => DimensionPolicy::Window(DimensionWindow::sift()),
            VecFormat::IntVectors => DimensionPolicy::NonNegative,
        }
    }

    /// Whether rejected headers are retried as big-endian by default
    pub const fn default_byte_order_fallback(self) -> bool {
        matches!(self, VecFormat::FloatVectors)
    }
}

impl core::fmt::Display for VecFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
