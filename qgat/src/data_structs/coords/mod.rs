//! This module defines data structures for genomic coordinates.
//!
//! - [`GenomicInterval`]: a closed, 1-based interval on a chromosome. Every
//!   record format is normalized to it at parse time, so the overlap logic is
//!   format-agnostic.
//! - [`ChromosomeIndex`]: reference features grouped by chromosome and sorted
//!   by `(start, end)` for sub-linear overlap queries.


mod interval;
mod interval_map;

pub use interval::GenomicInterval;
pub use interval_map::ChromosomeIndex;

#[cfg(test)]
mod tests;
