//! Element type constraints for vector files
//!
//! Every element is four bytes wide and stored little-endian. The trait
//! covers decoding, re-encoding for hex display and the conversions needed
//! for summary statistics.

use alloc::vec::Vec;
use byteorder::{ByteOrder, LittleEndian};

use crate::format::constants::ELEMENT_SIZE;
use crate::format::VecFormat;

/// Trait for types that can be stored as vector elements
///
/// Implemented for `f32` (`.fvecs`) and `i32` (`.ivecs`). Each type is tied to
/// exactly one file format, which lets generic readers check that the
/// requested element type matches the file they were handed.
pub trait VecElement:
    Copy + PartialEq + PartialOrd + core::fmt::Debug + core::fmt::Display + Sized
{
    /// The file format that stores this element type
    const FORMAT: VecFormat;

    /// Decode one element from the first four bytes of `bytes`
    ///
    /// Elements are always little-endian, even when the record header was
    /// accepted in the other byte order.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than four bytes.
    fn read_le(bytes: &[u8]) -> Self;

    /// Re-encode the element as it is laid out on disk
    fn to_le_bytes(self) -> [u8; ELEMENT_SIZE];

    /// Widen to f64 for statistics
    fn to_f64(self) -> f64;

    /// Write the value with `decimals` fractional digits where that applies
    ///
    /// Floating-point values are rounded to `decimals` places. Integers
    /// ignore the precision and print as they are.
    fn fmt_fixed(&self, f: &mut core::fmt::Formatter<'_>, decimals: usize) -> core::fmt::Result;

    /// Decode a payload of whole elements
    ///
    /// Trailing bytes that do not form a full element are ignored.
    fn decode_slice(bytes: &[u8]) -> Vec<Self> {
        bytes.chunks_exact(ELEMENT_SIZE).map(Self::read_le).collect()
    }
}

impl VecElement for f32 {
    const FORMAT: VecFormat = VecFormat::FloatVectors;

    fn read_le(bytes: &[u8]) -> Self {
        LittleEndian::read_f32(bytes)
    }

    fn to_le_bytes(self) -> [u8; ELEMENT_SIZE] {
        let mut buf = [0u8; ELEMENT_SIZE];
        LittleEndian::write_f32(&mut buf, self);
        buf
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn fmt_fixed(&self, f: &mut core::fmt::Formatter<'_>, decimals: usize) -> core::fmt::Result {
        write!(f, "{:.*}", decimals, self)
    }
}

impl VecElement for i32 {
    const FORMAT: VecFormat = VecFormat::IntVectors;

    fn read_le(bytes: &[u8]) -> Self {
        LittleEndian::read_i32(bytes)
    }

    fn to_le_bytes(self) -> [u8; ELEMENT_SIZE] {
        let mut buf = [0u8; ELEMENT_SIZE];
        LittleEndian::write_i32(&mut buf, self);
        buf
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    // Integers are never padded with fractional digits
    fn fmt_fixed(&self, f: &mut core::fmt::Formatter<'_>, _decimals: usize) -> core::fmt::Result {
        write!(f, "{self}")
    }
}

/// Display adapter printing an element with a fixed number of decimals
#[derive(Debug, Clone, Copy)]
pub struct Fixed<T>(pub T, pub usize);

impl<T: VecElement> core::fmt::Display for Fixed<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt_fixed(f, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    #[test]
    fn test_decode_slice() {
        let mut bytes = vec![];
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        bytes.extend_from_slice(&(-2.5f32).to_le_bytes());
        bytes.push(0xff);

        assert_eq!(f32::decode_slice(&bytes), vec![1.5, -2.5]);
        assert_eq!(i32::decode_slice(&[7, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]), vec![7, -1]);
        assert!(i32::decode_slice(&[]).is_empty());
    }

    #[test]
    fn test_to_le_bytes_matches_disk_layout() {
        assert_eq!(VecElement::to_le_bytes(128i32), [0x80, 0, 0, 0]);
        assert_eq!(VecElement::to_le_bytes(1.0f32), [0x00, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn test_fixed_display() {
        assert_eq!(format!("{}", Fixed(1.5f32, 4)), "1.5000");
        assert_eq!(format!("{}", Fixed(-0.25f32, 2)), "-0.25");
        assert_eq!(format!("{}", Fixed(42i32, 4)), "42");
    }
}
