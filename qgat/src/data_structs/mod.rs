//! Core data structures of the overlap engine.
//!
//! - [`coords`]: [`GenomicInterval`](coords::GenomicInterval), the closed
//!   1-based interval every format is normalized to, and
//!   [`ChromosomeIndex`](coords::ChromosomeIndex), the per-chromosome query
//!   structure over reference features.
//! - [`annotation`]: [`Feature`](annotation::Feature), a reference record
//!   with its attributes, and the GFF/GTF attribute parsers.
//! - [`QueryRegion`]: a user interval of interest with its line identity.
//! - Enumerations for strand, coordinate conventions, GTF dialects, overlap
//!   modes and delimiters.
//! - [`typedef`]: type aliases for positions, chromosome names and attribute
//!   maps.

pub mod annotation;
pub mod coords;
mod enums;
mod region;
pub mod typedef;

pub use enums::{
    CoordConvention,
    Delimiter,
    GtfDialect,
    NoMatchPolicy,
    OverlapMode,
    ReferenceFormat,
    Strand,
};
pub use region::QueryRegion;
