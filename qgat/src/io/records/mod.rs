//! Line parsers turning source lines into [`Feature`]s and
//! [`QueryRegion`](crate::data_structs::QueryRegion)s.
//!
//! Every parser implements [`RecordParser`]: a line either yields a record,
//! is skipped (`Ok(None)`: comments, headers, filtered feature types) or
//! fails with a [`RecordError`]. Line numbers and file paths are attached by
//! [`RecordReader`](crate::io::RecordReader).

mod bed;
mod gff;
mod gtf;
mod plain;

pub use bed::BedParser;
pub use gff::GffParser;
pub use gtf::GtfParser;
pub use plain::RegionParser;

use crate::data_structs::annotation::Feature;
use crate::data_structs::typedef::PosType;
use crate::data_structs::ReferenceFormat;
use crate::error::RecordError;

pub trait RecordParser {
    type Record;

    /// Parses one decoded line; `line_no` is 1-based.
    fn parse_line(
        &mut self,
        line: &str,
        line_no: usize,
    ) -> Result<Option<Self::Record>, RecordError>;
}

/// Reference parser selected by the caller from a [`ReferenceFormat`].
#[derive(Debug, Clone)]
pub enum FeatureParser {
    Bed(BedParser),
    Gff(GffParser),
    Gtf(GtfParser),
}

impl FeatureParser {
    /// Parser with default settings for `format`.
    pub fn new(format: ReferenceFormat) -> Self {
        match format {
            ReferenceFormat::Bed => FeatureParser::Bed(BedParser::default()),
            ReferenceFormat::Gff => FeatureParser::Gff(GffParser::default()),
            ReferenceFormat::Gtf(dialect) => {
                FeatureParser::Gtf(GtfParser::new(dialect))
            },
        }
    }

    pub fn format(&self) -> ReferenceFormat {
        match self {
            FeatureParser::Bed(_) => ReferenceFormat::Bed,
            FeatureParser::Gff(_) => ReferenceFormat::Gff,
            FeatureParser::Gtf(parser) => ReferenceFormat::Gtf(parser.dialect()),
        }
    }
}

impl From<ReferenceFormat> for FeatureParser {
    fn from(format: ReferenceFormat) -> Self {
        Self::new(format)
    }
}

impl RecordParser for FeatureParser {
    type Record = Feature;

    fn parse_line(
        &mut self,
        line: &str,
        line_no: usize,
    ) -> Result<Option<Feature>, RecordError> {
        match self {
            FeatureParser::Bed(parser) => parser.parse_line(line, line_no),
            FeatureParser::Gff(parser) => parser.parse_line(line, line_no),
            FeatureParser::Gtf(parser) => parser.parse_line(line, line_no),
        }
    }
}

/// Blank lines and `#` comments.
pub(crate) fn is_comment(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty() || line.starts_with('#')
}

pub(crate) fn parse_coord(
    field: &'static str,
    value: &str,
) -> Result<PosType, RecordError> {
    value
        .trim()
        .parse::<PosType>()
        .map_err(|_| RecordError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}
