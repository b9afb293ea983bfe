use hashbrown::HashSet;

use crate::data_structs::annotation::{
    normalize_gtf_attributes,
    parse_gtf_attributes,
    Feature,
};
use crate::data_structs::coords::GenomicInterval;
use crate::data_structs::{
    CoordConvention,
    GtfDialect,
};
use crate::error::RecordError;
use crate::io::records::gff::GFF_COLUMNS;
use crate::io::records::{
    is_comment,
    parse_coord,
    RecordParser,
};

pub const DEFAULT_GTF_FEATURE_TYPE: &str = "gene";

/// GTF gene parser for a declared dialect.
///
/// Only records whose feature type is in `feature_types` are parsed, others
/// are skipped. Attributes are normalized with
/// [`normalize_gtf_attributes`], so both dialects produce the same keys.
#[derive(Debug, Clone)]
pub struct GtfParser {
    dialect:       GtfDialect,
    feature_types: HashSet<String>,
}

impl Default for GtfParser {
    fn default() -> Self {
        Self::new(GtfDialect::default())
    }
}

impl GtfParser {
    pub fn new(dialect: GtfDialect) -> Self {
        Self {
            dialect,
            feature_types: HashSet::from_iter([DEFAULT_GTF_FEATURE_TYPE.to_string()]),
        }
    }

    /// Replaces the indexed feature types. An empty set keeps the default.
    pub fn with_feature_types<I, S>(
        mut self,
        feature_types: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>, {
        let feature_types: HashSet<String> =
            feature_types.into_iter().map(Into::into).collect();
        if !feature_types.is_empty() {
            self.feature_types = feature_types;
        }
        self
    }

    pub fn dialect(&self) -> GtfDialect {
        self.dialect
    }

    pub fn feature_types(&self) -> &HashSet<String> {
        &self.feature_types
    }
}

impl RecordParser for GtfParser {
    type Record = Feature;

    fn parse_line(
        &mut self,
        line: &str,
        _line_no: usize,
    ) -> Result<Option<Feature>, RecordError> {
        if is_comment(line) {
            return Ok(None);
        }
        let fields = line.split('\t').collect::<Vec<_>>();
        if fields.len() != GFF_COLUMNS {
            return Err(RecordError::ColumnCount {
                expected: GFF_COLUMNS,
                found:    fields.len(),
            });
        }
        let feature_type = fields[2].trim();
        if !self.feature_types.contains(feature_type) {
            return Ok(None);
        }

        let start = parse_coord("start", fields[3])?;
        let end = parse_coord("end", fields[4])?;
        let interval = GenomicInterval::from_source(
            fields[0].trim(),
            start,
            end,
            CoordConvention::OneBasedClosed,
        )?;
        let raw = parse_gtf_attributes(fields[8], self.dialect)?;
        let attributes = normalize_gtf_attributes(raw, feature_type, self.dialect)?;

        Ok(Some(Feature::new(
            interval,
            fields[6].trim().parse().unwrap_or_default(),
            attributes,
        )))
    }
}
