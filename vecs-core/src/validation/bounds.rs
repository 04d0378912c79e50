//! Record bounds validation
//!
//! Header values come straight from untrusted bytes, so every size
//! calculation derived from them is checked.

use crate::error::VecsError;
use crate::format::constants::ELEMENT_SIZE;

/// Payload length in bytes for a record header
pub fn payload_len(dim: i32) -> Result<usize, VecsError> {
    let dim = usize::try_from(dim).map_err(|_| VecsError::NegativeDimension)?;
    dim.checked_mul(ELEMENT_SIZE)
        .ok_or(VecsError::LengthOverflow)
}

/// End offset of a payload of `dim` elements starting at `start`
///
/// Returns `None` when the end cannot be represented, which callers treat the
/// same as a record that does not fit.
pub const fn record_end(start: usize, dim: usize) -> Option<usize> {
    match dim.checked_mul(ELEMENT_SIZE) {
        Some(len) => start.checked_add(len),
        None => None,
    }
}
