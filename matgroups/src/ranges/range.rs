//! Closed label intervals with guaranteed invariants.
//!
//! A `Range` always satisfies `lower <= upper`.

use std::ops::RangeInclusive;

/// Error types that can occur when constructing ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// The lower bound is greater than the upper bound.
    #[error("range lower bound {0} is greater than upper bound {1}")]
    Inverted(u64, u64),
}

/// A closed interval `[lower, upper]` of consecutive labels.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    lower: u64,
    upper: u64,
}

impl Range {
    /// Creates a new range, rejecting inverted bounds.
    pub fn new(lower: u64, upper: u64) -> Result<Self, RangeError> {
        if lower > upper {
            return Err(RangeError::Inverted(lower, upper));
        }

        Ok(Self { lower, upper })
    }

    /// Creates a range from bounds the caller already knows are ordered.
    pub(super) fn new_unchecked(lower: u64, upper: u64) -> Self {
        debug_assert!(lower <= upper);
        Self { lower, upper }
    }

    /// Creates a range holding exactly one label.
    pub fn single(value: u64) -> Self {
        Self { lower: value, upper: value }
    }

    /// Returns the smallest label in the range.
    pub fn lower(&self) -> u64 {
        self.lower
    }

    /// Returns the greatest label in the range.
    pub fn upper(&self) -> u64 {
        self.upper
    }

    /// Returns span of the range (upper - lower).
    pub fn span(&self) -> u64 {
        self.upper - self.lower
    }

    /// Returns `true` if the range holds a single label.
    pub fn is_single(&self) -> bool {
        self.lower == self.upper
    }

    /// Returns `true` if `value` lies within the range.
    pub fn contains(&self, value: u64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Returns `true` if the two ranges share a label or touch end to end,
    /// meaning they could be merged into one contiguous range.
    pub fn is_mergeable_with(&self, other: &Range) -> bool {
        let (first, second) = if self.lower <= other.lower {
            (self, other)
        } else {
            (other, self)
        };

        second.lower <= first.upper.saturating_add(1)
    }

    /// Iterates over every label in the range.
    pub fn values(&self) -> RangeInclusive<u64> {
        self.lower..=self.upper
    }
}

impl From<Range> for (u64, u64) {
    fn from(range: Range) -> Self {
        (range.lower, range.upper)
    }
}

/// String representation for ranges: `lower..=upper`.
impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.lower, self.upper)
    }
}

impl std::fmt::Debug for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Range({self})")
    }
}
