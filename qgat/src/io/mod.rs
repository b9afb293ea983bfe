//! File input and output.
//!
//! - [`records`]: per-format line parsers.
//! - [`RecordReader`]: line reading with UTF-8/Latin-1 decoding and failure
//!   accounting into a [`ParseReport`], plus the [`read_features`],
//!   [`read_reference`] and [`read_regions`] helpers.
//! - [`TableWriter`]: TSV output with column-union headers.
//! - [`Compression`]: transparent gzip for inputs and outputs (`compression`
//!   feature).

pub mod compression;
mod reader;
pub mod records;
mod table;

pub use compression::Compression;
pub use reader::{
    open_reader,
    read_features,
    read_reference,
    read_regions,
    resolve_path,
    ParseConfig,
    ParseReport,
    RecordReader,
};
pub use table::{
    column_union,
    read_table,
    TableWriter,
};
