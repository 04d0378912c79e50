//! Abstract interfaces shared by the vecs crates

pub mod backend;
pub mod element;

pub use backend::ByteSource;
pub use element::{Fixed, VecElement};
