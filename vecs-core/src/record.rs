//! Decoded vector records

use alloc::vec::Vec;

use crate::format::VecFormat;
use crate::traits::VecElement;

/// One decoded `(dimension, values)` pair
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record<T> {
    /// Dimension (`.fvecs`) or count (`.ivecs`) read from the header
    pub dim: usize,
    /// Exactly `dim` decoded elements
    pub values: Vec<T>,
}

impl<T: VecElement> Record<T> {
    /// Build a record from its values, deriving the dimension
    pub fn new(values: Vec<T>) -> Self {
        Self {
            dim: values.len(),
            values,
        }
    }

    /// Decode a record from a complete payload
    pub fn from_payload(payload: &[u8]) -> Self {
        Self::new(T::decode_slice(payload))
    }
}

/// Records of either element type, selected by the file format at runtime
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DynamicRecords {
    F32(Vec<Record<f32>>),
    I32(Vec<Record<i32>>),
}

impl DynamicRecords {
    /// Format the records were decoded from
    pub fn format(&self) -> VecFormat {
        match self {
            DynamicRecords::F32(_) => VecFormat::FloatVectors,
            DynamicRecords::I32(_) => VecFormat::IntVectors,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        match self {
            DynamicRecords::F32(records) => records.len(),
            DynamicRecords::I32(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensions of all records in order
    pub fn dims(&self) -> Vec<usize> {
        match self {
            DynamicRecords::F32(records) => records.iter().map(|r| r.dim).collect(),
            DynamicRecords::I32(records) => records.iter().map(|r| r.dim).collect(),
        }
    }
}

impl From<Vec<Record<f32>>> for DynamicRecords {
    fn from(records: Vec<Record<f32>>) -> Self {
        DynamicRecords::F32(records)
    }
}

impl From<Vec<Record<i32>>> for DynamicRecords {
    fn from(records: Vec<Record<i32>>) -> Self {
        DynamicRecords::I32(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_record_from_payload() {
        let record = Record::<i32>::from_payload(&[1, 0, 0, 0, 2, 0, 0, 0]);
        assert_eq!(record.dim, 2);
        assert_eq!(record.values, vec![1, 2]);
    }

    #[test]
    fn test_dynamic_records() {
        let records = DynamicRecords::from(vec![Record::new(vec![1.0f32]), Record::new(vec![])]);
        assert_eq!(records.format(), VecFormat::FloatVectors);
        assert_eq!(records.len(), 2);
        assert_eq!(records.dims(), vec![1, 0]);

        let empty = DynamicRecords::from(Vec::<Record<i32>>::new());
        assert!(empty.is_empty());
        assert_eq!(empty.format(), VecFormat::IntVectors);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_record_serializes() {
        let record = Record::new(vec![3i32, 4]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"dim":2,"values":[3,4]}"#);
    }
}
