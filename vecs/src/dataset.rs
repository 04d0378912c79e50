//! Whole-file loading of uniform vector sets
//!
//! Benchmark datasets such as SIFT base, query and ground-truth files store
//! every record with the same dimension. For those files the first header
//! fixes the dimension, the record count follows from the file size, and all
//! values are loaded into one flat row-major buffer. Any later header that
//! disagrees with the first is an error.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use tracing::{debug, instrument};
use vecs_core::constants::HEADER_SIZE;
use vecs_core::validation::payload_len;
use vecs_core::{VecElement, VecsError};

use crate::error::{ReadError, Result};

/// A fixed-dimension vector set stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct UniformVectors<T> {
    /// Elements per vector
    pub dim: usize,
    /// `len() * dim` values, one vector after another
    pub data: Vec<T>,
}

impl<T: VecElement> UniformVectors<T> {
    /// Number of vectors
    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.data.len() / self.dim
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The vector at `index`
    pub fn row(&self, index: usize) -> Option<&[T]> {
        let start = index.checked_mul(self.dim)?;
        self.data.get(start..start.checked_add(self.dim)?)
    }

    /// Iterate over all vectors in file order
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact rejects zero; zero-dim sets hold no data anyway
        self.data.chunks_exact(self.dim.max(1))
    }
}

/// Bytes taken by one record of `dim` elements of type `T`
fn record_size<T: VecElement>(dim: usize) -> u64 {
    HEADER_SIZE as u64 + dim as u64 * T::FORMAT.element_size() as u64
}

/// Load every complete record of a uniform file
///
/// `file_size` is the total length of `source` in bytes. The record count is
/// `file_size / record size`, so a trailing partial record is ignored. When
/// `min_dim` is set, a dimension below it is rejected before any payload is
/// read.
///
/// An empty source yields an empty set with dimension zero.
#[instrument(level = "debug", skip(source))]
pub fn load_uniform<T: VecElement, R: Read>(
    source: &mut R,
    file_size: u64,
    min_dim: Option<usize>,
) -> Result<UniformVectors<T>> {
    if file_size < HEADER_SIZE as u64 {
        return Ok(UniformVectors {
            dim: 0,
            data: Vec::new(),
        });
    }

    let first = read_header(source, 0)?;
    let (dim, record_bytes) = match payload_len(first) {
        Ok(len) => (first as usize, len),
        Err(VecsError::NegativeDimension) => {
            return Err(ReadError::NegativeLength {
                index: 0,
                value: first,
            })
        }
        Err(_) => {
            return Ok(UniformVectors {
                dim: 0,
                data: Vec::new(),
            })
        }
    };

    if let Some(required) = min_dim {
        if dim < required {
            return Err(ReadError::TooNarrow {
                index: 0,
                dim,
                required,
            });
        }
    }

    let count = usize::try_from(file_size / record_size::<T>(dim)).unwrap_or(usize::MAX);
    if count == 0 {
        debug!(dim, "no complete record");
        return Ok(UniformVectors {
            dim,
            data: Vec::new(),
        });
    }

    // A whole record fits in the file, which bounds `record_bytes`
    let mut data = Vec::with_capacity(count.saturating_mul(dim));
    let mut payload = vec![0u8; record_bytes];

    for index in 0..count {
        if index > 0 {
            let found = read_header(source, index)?;
            if usize::try_from(found).ok() != Some(dim) {
                return Err(ReadError::DimensionMismatch {
                    index,
                    expected: dim,
                    found,
                });
            }
        }
        source
            .read_exact(&mut payload)
            .map_err(|source| ReadError::Io { index, source })?;
        data.extend(T::decode_slice(&payload));
    }

    debug!(dim, count, "uniform set loaded");
    Ok(UniformVectors { dim, data })
}

fn read_header<R: Read>(source: &mut R, index: usize) -> Result<i32> {
    source
        .read_i32::<LittleEndian>()
        .map_err(|source| ReadError::Io { index, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode<T: VecElement>(records: &[&[T]]) -> Vec<u8> {
        let mut buf = Vec::new();
        for values in records {
            buf.extend_from_slice(&(values.len() as i32).to_le_bytes());
            for &value in values.iter() {
                buf.extend_from_slice(&value.to_le_bytes());
            }
        }
        buf
    }

    fn load<T: VecElement>(bytes: Vec<u8>, min_dim: Option<usize>) -> Result<UniformVectors<T>> {
        let size = bytes.len() as u64;
        load_uniform::<T, _>(&mut Cursor::new(bytes), size, min_dim)
    }

    #[test]
    fn test_load_flat_rows() {
        let input: [&[f32]; 3] = [&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]];
        let set = load::<f32>(encode(&input), None).unwrap();

        assert_eq!(set.dim, 2);
        assert_eq!(set.len(), 3);
        assert_eq!(set.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(set.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(set.row(3), None);
        assert_eq!(set.rows().count(), 3);
    }

    #[test]
    fn test_trailing_partial_record_is_ignored() {
        let input: [&[i32]; 2] = [&[1, 2, 3], &[4, 5, 6]];
        let mut bytes = encode(&input);
        bytes.extend_from_slice(&3i32.to_le_bytes());
        bytes.extend_from_slice(&7i32.to_le_bytes());

        let set = load::<i32>(bytes, None).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.row(1), Some(&[4, 5, 6][..]));
    }

    #[test]
    fn test_dimension_mismatch() {
        let input: [&[f32]; 3] = [&[1.0, 2.0], &[3.0, 4.0], &[5.0]];
        let mut bytes = encode(&input);
        bytes.extend_from_slice(&[0u8; 8]);

        match load::<f32>(bytes, None) {
            Err(ReadError::DimensionMismatch {
                index,
                expected,
                found,
            }) => {
                assert_eq!((index, expected, found), (2, 2, 1));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_minimum_width() {
        let input: [&[i32]; 2] = [&[1, 2], &[3, 4]];

        let err = load::<i32>(encode(&input), Some(10)).unwrap_err();
        assert!(matches!(
            err,
            ReadError::TooNarrow {
                index: 0,
                dim: 2,
                required: 10
            }
        ));
        assert_eq!(
            err.to_string(),
            "Vector 0 contains only 2 values, but 10 are needed"
        );

        assert_eq!(load::<i32>(encode(&input), Some(2)).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_and_negative() {
        let empty = load::<f32>(Vec::new(), None).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);

        let err = load::<f32>((-4i32).to_le_bytes().to_vec(), None).unwrap_err();
        assert!(matches!(err, ReadError::NegativeLength { index: 0, value: -4 }));
    }

    #[test]
    fn test_zero_dimension_rows() {
        let input: [&[i32]; 2] = [&[], &[]];
        let set = load::<i32>(encode(&input), None).unwrap();
        assert_eq!(set.dim, 0);
        assert!(set.is_empty());
        assert_eq!(set.rows().count(), 0);
    }

    #[test]
    fn test_source_shorter_than_declared_size() {
        let input: [&[f32]; 1] = [&[1.0, 2.0]];
        let bytes = encode(&input);
        let declared = bytes.len() as u64 * 2;

        let err = load_uniform::<f32, _>(&mut Cursor::new(bytes), declared, None).unwrap_err();
        assert_eq!(err.record_index(), Some(1));
    }
}
