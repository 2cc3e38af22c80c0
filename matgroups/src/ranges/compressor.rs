use super::{Range, Runs};

/// Trait for compressing label collections into maximal contiguous runs.
pub trait Compressor {
    /// Compresses the input labels into runs.
    ///
    /// ## Parameters
    /// * `values` - The input labels, in any order and possibly with
    ///   duplicates.
    ///
    /// ## Returns
    /// The maximal runs covering exactly the distinct input labels, ordered by
    /// ascending lower bound. Empty input yields empty runs.
    fn compress(&self, values: &[u64]) -> Runs;
}

/// A compressor that locates the end of each run with a bisection search
/// over the sorted labels instead of walking them one at a time.
///
/// For mostly-contiguous label sets, which is what meshers produce, each run
/// is found in logarithmic rather than linear time. Overall cost is dominated
/// by the initial sort.
#[derive(Debug, Default, Clone, Copy)]
pub struct BisectingCompressor;

impl Compressor for BisectingCompressor {
    fn compress(&self, values: &[u64]) -> Runs {
        let sorted = sort_unique(values);

        let mut ranges = Vec::new();
        let mut lower = 0;

        while lower < sorted.len() {
            let upper = find_run_end(&sorted, lower);
            ranges.push(Range::new_unchecked(sorted[lower], sorted[upper]));
            lower = upper + 1;
        }

        Runs::from_maximal(ranges)
    }
}

/// Returns a sorted copy of the labels with duplicates removed.
fn sort_unique(values: &[u64]) -> Vec<u64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

/// Finds the index of the last label of the run starting at `start`.
///
/// `sorted` must be strictly ascending. A sub-slice `sorted[a..=b]` is
/// contiguous exactly when `sorted[b] - sorted[a] == b - a`, and since the
/// labels are strictly ascending the difference can never be smaller than
/// the index distance. That makes contiguity monotone in `b`, so the run end
/// can be bisected.
///
/// ## Algorithm
/// 1. `upper` is the farthest index known to be in the run, `boundary` the
///    nearest index known (or assumed) to be outside it.
/// 2. Probe the midpoint; while it breaks contiguity, pull `boundary` down to
///    it and probe again.
/// 3. Once the midpoint is contiguous, advance `upper` to it.
/// 4. Stop when `boundary` is directly after `upper`.
fn find_run_end(sorted: &[u64], start: usize) -> usize {
    let mut upper = start;
    let mut boundary = sorted.len();

    while boundary > upper + 1 {
        let mut mid = upper + (boundary - upper) / 2;

        // Sorted input guarantees `sorted[mid] >= sorted[upper]`.
        while sorted[mid] - sorted[upper] > (mid - upper) as u64 {
            boundary = mid;
            mid = upper + (boundary - upper) / 2;
        }

        upper = mid;
    }

    upper
}
