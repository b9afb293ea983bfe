use crate::data_structs::annotation::{
    Feature,
    QTL_ID_KEY,
    QTL_NAME_KEY,
};
use crate::data_structs::coords::GenomicInterval;
use crate::data_structs::typedef::AttrMap;
use crate::data_structs::CoordConvention;
use crate::error::RecordError;
use crate::io::records::{
    is_comment,
    parse_coord,
    RecordParser,
};
use crate::utils::bracketed_number;

/// QTLdb BED parser.
///
/// Columns 1-3 are chromosome, start and end in 0-based half-open
/// coordinates. The remaining columns form the QTL name; a column written as
/// `(1234)` (or the trailing bracket of the name itself) gives the QTL id.
/// Lines are tab-delimited; a line without tabs is split on whitespace.
#[derive(Debug, Clone, Default)]
pub struct BedParser;

impl BedParser {
    pub fn new() -> Self {
        Self
    }

    fn name_columns(columns: &[&str]) -> AttrMap {
        let mut name_parts = Vec::new();
        let mut qtl_id = None;
        for column in columns {
            let column = column.trim();
            name_parts.push(column);
            if let Some(number) = leading_number(column) {
                qtl_id = Some(number.to_string());
                break;
            }
        }
        if qtl_id.is_none() {
            qtl_id = columns
                .first()
                .and_then(|name| bracketed_number(name))
                .map(str::to_string);
        }

        let mut attributes = AttrMap::new();
        if let Some(id) = qtl_id {
            attributes.insert(QTL_ID_KEY.to_string(), id);
        }
        let name = name_parts.join(" ");
        let name = name.trim();
        if !name.is_empty() {
            attributes.insert(QTL_NAME_KEY.to_string(), name.to_string());
        }
        attributes
    }
}

/// `"1234"` for a column starting with `(1234)`.
fn leading_number(column: &str) -> Option<&str> {
    column
        .strip_prefix('(')
        .and_then(|rest| rest.split_once(')'))
        .map(|(digits, _)| digits)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

impl RecordParser for BedParser {
    type Record = Feature;

    fn parse_line(
        &mut self,
        line: &str,
        _line_no: usize,
    ) -> Result<Option<Feature>, RecordError> {
        if is_comment(line) || line.starts_with("track") || line.starts_with("browser") {
            return Ok(None);
        }
        let fields: Vec<&str> = if line.contains('\t') {
            line.split('\t').collect()
        }
        else {
            line.split_whitespace().collect()
        };
        if fields.len() < 3 {
            return Err(RecordError::ColumnCount {
                expected: 3,
                found:    fields.len(),
            });
        }

        let start = parse_coord("start", fields[1])?;
        let end = parse_coord("end", fields[2])?;
        let interval = GenomicInterval::from_source(
            fields[0].trim(),
            start,
            end,
            CoordConvention::ZeroBasedHalfOpen,
        )?;
        let strand = fields
            .get(5)
            .map(|s| s.trim().parse().unwrap_or_default())
            .unwrap_or_default();

        Ok(Some(Feature::new(
            interval,
            strand,
            Self::name_columns(&fields[3..]),
        )))
    }
}
