//! Format definitions for `.fvecs` / `.ivecs` files
//!
//! Both variants share one physical layout: a sequence of records, each a
//! little-endian `i32` header followed by that many 4-byte elements. There is
//! no file header, footer, magic number or checksum.

pub mod constants;
pub mod vec_format;

pub use vec_format::VecFormat;
