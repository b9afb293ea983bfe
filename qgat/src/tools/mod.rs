//! Higher-level analysis built on the data structures and I/O layer.
//!
//! - [`overlap`]: matching query regions against a reference index,
//!   assembling output rows, trait-frequency counting and run summaries.

pub mod overlap;
