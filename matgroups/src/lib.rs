#![deny(missing_docs)]

//! # Material Groups
//!
//! This library turns per-material element label sets into Hypermesh
//! bulk-data (`.bdf`) group definitions that a fatigue solver can import.
//! Label sets are run-length compressed into `THRU` ranges before being
//! written, which keeps the files small for the mostly-contiguous label
//! numbering that meshers produce.

pub mod bdf;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod ranges;
pub mod selftest;
pub mod sets;

pub use error::Error;
