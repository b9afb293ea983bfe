//! # qgat
//!
//! `qgat` locates genomic intervals of interest against quantitative trait
//! locus (QTL) and gene annotations. User regions (chromosome, start, end)
//! are matched against a reference set read from QTLdb BED/GFF files or from
//! Ensembl / NCBI GTF files; every overlap becomes an output row carrying the
//! region and the matched record's metadata, and trait-annotated rows can be
//! counted by trait.
//!
//! If you do not want to use qgat as a crate, check out the `qgat` command
//! line tool in the `console` workspace member.
//!
//! ## Key Features
//!
//! * **One interval model**: every format is normalized at parse time to a
//!   closed, 1-based [`GenomicInterval`]. BED starts are shifted once, on
//!   ingestion.
//! * **Fast queries**: reference features are grouped per chromosome into a
//!   [`ChromosomeIndex`] backed by `rust-lapper`.
//! * **Tolerant, accountable parsing**: malformed lines are skipped and
//!   reported with file, line and field in a [`ParseReport`]; a failure
//!   threshold can make them fatal.
//! * **Parallel runs**: region queries run on a Rayon thread pool.
//!
//! Number of threads to be used can be configured with setting
//! `QGAT_NUM_THREADS` environment variable.
//!
//! ## Structure
//!
//! * [`data_structs`]: intervals, features, query regions and the chromosome
//!   index.
//! * [`io`]: record parsers, readers with failure accounting, gzip support
//!   and the TSV table writer.
//! * [`tools`]: the overlap engine, result assembly, trait aggregation and
//!   run summaries.
//! * [`error`]: line-scoped and fatal error types.
//! * [`utils`]: thread pool, helper macros and text utilities.
//!
//! ## Usage
//!
//! ```no_run
//! use qgat::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ParseConfig::default();
//!     let (index, _) = read_reference("QTLdb_cattleARS_UCD1.gff", ReferenceFormat::Gff, &config)?;
//!     let (regions, _) = read_regions("regions.tsv", &config)?;
//!
//!     let output = OverlapConfig::default()
//!         .with_mode(OverlapMode::Trait)
//!         .run(&regions, &index)?;
//!
//!     for (name, count) in output.trait_frequency().top_n(10) {
//!         println!("{name}\t{count}");
//!     }
//!     let mut writer = TableWriter::from_path("overlaps.tsv")?;
//!     writer.write_rows(&output.rows)?;
//!     writer.finish()?;
//!     Ok(())
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
