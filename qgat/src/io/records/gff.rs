use crate::data_structs::annotation::{
    derive_trait_attributes,
    parse_gff_attributes,
    Feature,
};
use crate::data_structs::coords::GenomicInterval;
use crate::data_structs::CoordConvention;
use crate::error::RecordError;
use crate::io::records::{
    is_comment,
    parse_coord,
    RecordParser,
};

pub(crate) const GFF_COLUMNS: usize = 9;

/// QTLdb GFF parser (trait mode).
///
/// Exactly nine tab-separated columns in 1-based closed coordinates. The
/// feature-type column names the trait; see
/// [`derive_trait_attributes`] for the attribute keys.
#[derive(Debug, Clone, Default)]
pub struct GffParser;

impl GffParser {
    pub fn new() -> Self {
        Self
    }
}

impl RecordParser for GffParser {
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

        let start = parse_coord("start", fields[3])?;
        let end = parse_coord("end", fields[4])?;
        let interval = GenomicInterval::from_source(
            fields[0].trim(),
            start,
            end,
            CoordConvention::OneBasedClosed,
        )?;
        let raw = parse_gff_attributes(fields[8])?;
        let attributes = derive_trait_attributes(raw, fields[2].trim());

        Ok(Some(Feature::new(
            interval,
            fields[6].trim().parse().unwrap_or_default(),
            attributes,
        )))
    }
}
