use crate::data_structs::coords::GenomicInterval;
use crate::data_structs::typedef::{
    AttrMap,
    PosType,
};
use crate::data_structs::{
    CoordConvention,
    Delimiter,
    QueryRegion,
};
use crate::error::RecordError;
use crate::io::records::{
    is_comment,
    parse_coord,
    RecordParser,
};

/// Parser of user region files: chromosome, start and end in the first three
/// columns, any further columns are carried along.
///
/// The first data line is taken as a header when its start or end field is
/// not a number. Coordinates are 1-based closed unless configured otherwise.
#[derive(Debug, Clone, Default)]
pub struct RegionParser {
    delimiter:  Delimiter,
    convention: CoordConvention,
    header:     Option<Vec<String>>,
    seen_first: bool,
}

impl RegionParser {
    pub fn new(
        delimiter: Delimiter,
        convention: CoordConvention,
    ) -> Self {
        Self {
            delimiter,
            convention,
            header: None,
            seen_first: false,
        }
    }

    /// Column names of the header line, when one was found.
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    fn extra_columns(
        &self,
        fields: &[&str],
    ) -> AttrMap {
        fields
            .iter()
            .enumerate()
            .skip(3)
            .map(|(idx, value)| {
                let name = self
                    .header
                    .as_ref()
                    .and_then(|h| h.get(idx))
                    .filter(|name| !name.is_empty())
                    .cloned()
                    .unwrap_or_else(|| format!("col_{}", idx + 1));
                (name, value.to_string())
            })
            .collect()
    }
}

fn is_number(field: &str) -> bool {
    field.trim().parse::<PosType>().is_ok()
}

impl RecordParser for RegionParser {
    type Record = QueryRegion;

    fn parse_line(
        &mut self,
        line: &str,
        line_no: usize,
    ) -> Result<Option<QueryRegion>, RecordError> {
        if is_comment(line) {
            return Ok(None);
        }
        let fields = self
            .delimiter
            .split(line)
            .into_iter()
            .map(str::trim)
            .collect::<Vec<_>>();
        if fields.len() < 3 {
            return Err(RecordError::ColumnCount {
                expected: 3,
                found:    fields.len(),
            });
        }

        if !self.seen_first {
            self.seen_first = true;
            if !is_number(fields[1]) || !is_number(fields[2]) {
                self.header = Some(fields.iter().map(|f| f.to_string()).collect());
                return Ok(None);
            }
        }

        let start = parse_coord("start", fields[1])?;
        let end = parse_coord("end", fields[2])?;
        let interval =
            GenomicInterval::from_source(fields[0], start, end, self.convention)?;

        Ok(Some(
            QueryRegion::new(interval, line_no, line.to_string())
                .with_extra(self.extra_columns(&fields)),
        ))
    }
}
