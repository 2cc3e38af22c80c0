use std::ops::Index;

use super::Range;

/// Errors that can occur when assembling a [`Runs`] collection by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RunsError {
    /// The pushed range does not start after the previous range.
    #[error("range {0} does not start after the previous range")]
    OutOfOrder(Range),

    /// The pushed range overlaps or touches the previous range, so the two
    /// should have been a single run.
    #[error("range {0} could be merged with the previous range")]
    Mergeable(Range),
}

/// Ordered collection of maximal runs produced by compressing one label set.
///
/// Ranges are sorted by lower bound and no two ranges overlap or touch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Runs(Vec<Range>);

impl IntoIterator for Runs {
    type Item = Range;
    type IntoIter = std::vec::IntoIter<Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Runs {
    type Item = &'a Range;
    type IntoIter = std::slice::Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Index<usize> for Runs {
    type Output = Range;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Runs {
    /// Wraps ranges that are already sorted and maximally merged.
    pub(super) fn from_maximal(ranges: Vec<Range>) -> Self {
        debug_assert!(ranges
            .windows(2)
            .all(|pair| pair[0].upper() < pair[1].lower() && !pair[0].is_mergeable_with(&pair[1])));
        Self(ranges)
    }

    /// Pushes a range to the end of the collection, keeping the ordering and
    /// non-adjacency invariants.
    pub fn try_push(&mut self, range: Range) -> Result<(), RunsError> {
        if let Some(last) = self.0.last() {
            if range.lower() <= last.lower() {
                return Err(RunsError::OutOfOrder(range));
            }
            if last.is_mergeable_with(&range) {
                return Err(RunsError::Mergeable(range));
            }
        }

        self.0.push(range);
        Ok(())
    }

    /// Returns every label covered by the runs, in ascending order.
    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().flat_map(Range::values)
    }

    /// Returns the number of labels covered by the runs.
    pub fn value_count(&self) -> u64 {
        self.0
            .iter()
            .fold(0, |total: u64, range| total.saturating_add(range.span().saturating_add(1)))
    }

    /// Returns the number of runs in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no runs in the collection.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the runs.
    pub fn iter(&self) -> impl Iterator<Item = &Range> {
        self.0.iter()
    }

    /// Returns the runs as `(lower, upper)` pairs.
    pub fn to_pairs(&self) -> Vec<(u64, u64)> {
        self.0.iter().copied().map(Into::into).collect()
    }
}
