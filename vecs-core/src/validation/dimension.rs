//! Dimension plausibility policies
//!
//! The structural scanner has no framing beyond the dimension header, so a
//! misaligned cursor is only detectable by a header value that makes no sense.
//! A policy decides which header values are believable.

use crate::format::constants::sift;

/// Window of plausible dimensions around an expected value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionWindow {
    /// Dimension that is always accepted
    pub expected: i32,
    /// Smallest accepted dimension (inclusive)
    pub min: i32,
    /// Largest accepted dimension (inclusive)
    pub max: i32,
}

impl DimensionWindow {
    /// Window for SIFT descriptors: exactly 128 or anything in `[80, 200]`
    pub const fn sift() -> Self {
        Self {
            expected: sift::EXPECTED_DIM,
            min: sift::MIN_DIM,
            max: sift::MAX_DIM,
        }
    }

    /// Set the always-accepted dimension
    pub fn with_expected(mut self, expected: i32) -> Self {
        self.expected = expected;
        self
    }

    /// Set the inclusive range of accepted dimensions
    pub fn with_range(mut self, min: i32, max: i32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Check a dimension against the window
    pub const fn contains(&self, dim: i32) -> bool {
        dim == self.expected || (self.min <= dim && dim <= self.max)
    }
}

impl Default for DimensionWindow {
    fn default() -> Self {
        Self::sift()
    }
}

/// Predicate deciding whether a decoded header value is a believable dimension
#[derive(Debug, Clone, Copy)]
pub enum DimensionPolicy {
    /// Any non-negative dimension
    NonNegative,
    /// Dimensions inside a window
    Window(DimensionWindow),
    /// Caller supplied predicate
    Custom(fn(i32) -> bool),
}

impl DimensionPolicy {
    /// Check a dimension against the policy
    ///
    /// Negative values never describe a payload and are rejected by every
    /// policy, custom ones included.
    pub fn accepts(&self, dim: i32) -> bool {
        if dim < 0 {
            return false;
        }
        match self {
            DimensionPolicy::NonNegative => true,
            DimensionPolicy::Window(window) => window.contains(dim),
            DimensionPolicy::Custom(predicate) => predicate(dim),
        }
    }
}

impl Default for DimensionPolicy {
    fn default() -> Self {
        DimensionPolicy::Window(DimensionWindow::sift())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sift_window() {
        let window = DimensionWindow::sift();

        assert!(window.contains(128));
        assert!(window.contains(80));
        assert!(window.contains(200));
        assert!(window.contains(96));

        assert!(!window.contains(79));
        assert!(!window.contains(201));
        assert!(!window.contains(0));
        assert!(!window.contains(-128));
    }

    #[test]
    fn test_expected_outside_range() {
        let window = DimensionWindow::sift().with_expected(960).with_range(900, 1000);
        assert!(window.contains(960));
        assert!(window.contains(900));
        assert!(!window.contains(128));

        let narrow = DimensionWindow::sift().with_expected(4).with_range(10, 20);
        assert!(narrow.contains(4));
        assert!(!narrow.contains(5));
        assert!(narrow.contains(15));
    }

    #[test]
    fn test_policies() {
        assert!(DimensionPolicy::NonNegative.accepts(0));
        assert!(DimensionPolicy::NonNegative.accepts(i32::MAX));
        assert!(!DimensionPolicy::NonNegative.accepts(-1));

        let even = DimensionPolicy::Custom(|dim| dim % 2 == 0);
        assert!(even.accepts(4));
        assert!(!even.accepts(5));
        // Negative values are rejected before the predicate runs
        assert!(!even.accepts(-4));

        assert!(DimensionPolicy::default().accepts(128));
        assert!(!DimensionPolicy::default().accepts(3));
    }
}
