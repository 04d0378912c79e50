//! Summary statistics over a record's elements

use crate::traits::VecElement;

/// Minimum, maximum and arithmetic mean of a non-empty element list
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary<T> {
    pub min: T,
    pub max: T,
    /// Mean, promoted to f64 for integer elements
    pub mean: f64,
}

impl<T: VecElement> Summary<T> {
    /// Compute statistics, or `None` for an empty slice
    pub fn of(values: &[T]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;

        let mut min = first;
        let mut max = first;
        let mut sum = first.to_f64();
        for &value in rest {
            if value < min {
                min = value;
            }
            if value > max {
                max = value;
            }
            sum += value.to_f64();
        }

        Some(Self {
            min,
            max,
            mean: sum / values.len() as f64,
        })
    }
}
