//! # Ranges: Run-Length Compression of Label Sets
//!
//! `ranges` collapses an unordered collection of integer labels into the
//! smallest list of closed intervals that covers exactly the same labels.
//!
//! ## Usage Example
//!
//! ```
//! use matgroups::ranges::{BisectingCompressor, Compressor};
//!
//! let labels = vec![10, 11, 12, 1, 2, 3, 4, 17, 18, 20];
//! let runs = BisectingCompressor.compress(&labels);
//!
//! let pairs: Vec<(u64, u64)> = runs.iter().map(|r| (r.lower(), r.upper())).collect();
//! assert_eq!(pairs, vec![(1, 4), (10, 12), (17, 18), (20, 20)]);
//! ```
//!
//! ## Guarantees
//!
//! For any input the returned [`Runs`]:
//!
//! * are ordered by ascending lower bound,
//! * are pairwise disjoint and never adjacent (no two could merge),
//! * cover exactly the distinct input values.
//!
//! ## Architecture
//!
//! * **Compressor**: Finds maximal contiguous runs in a label collection
//! * **Runs**: Ordered collection of runs produced by one compression
//! * **Range**: A single closed interval of labels

mod compressor;
mod range;
mod runs;


pub use range::Range;
pub use range::RangeError;

pub use runs::Runs;
pub use runs::RunsError;

pub use compressor::BisectingCompressor;
pub use compressor::Compressor;
