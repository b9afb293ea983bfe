//! The overlap engine: region queries against a
//! [`ChromosomeIndex`](crate::data_structs::coords::ChromosomeIndex), row
//! assembly and trait counting.
//!
//! A run is configured with [`OverlapConfig`] and returns an
//! [`OverlapOutput`] holding the assembled rows and a [`RunSummary`].

mod aggregate;
mod assemble;
mod config;
mod matcher;
mod run;
mod summary;

pub use aggregate::{
    aggregate,
    qtl_name_counts,
    TraitFrequency,
};
pub use assemble::{
    ResultAssembler,
    NA,
    NOTE_COLUMN,
    NO_OVERLAP_NOTE,
};
pub use config::OverlapConfig;
pub use matcher::{
    query,
    OverlapResult,
};
pub use run::{
    ensure_shared_chromosome,
    OverlapOutput,
};
pub use summary::{
    unique_by,
    AnnotationSummary,
    RunSummary,
};
