use serde::Serialize;

use crate::data_structs::coords::GenomicInterval;
use crate::data_structs::typedef::AttrMap;

/// A user-supplied interval of interest together with the identity of its
/// input line.
///
/// `extra` holds the non-coordinate columns of the line, keyed by the header
/// names when the input had a header and by `col_<n>` (1-based column
/// number) otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRegion {
    interval: GenomicInterval,
    line:     usize,
    raw:      String,
    extra:    AttrMap,
}

impl QueryRegion {
    pub fn new(
        interval: GenomicInterval,
        line: usize,
        raw: String,
    ) -> Self {
        Self {
            interval,
            line,
            raw,
            extra: AttrMap::new(),
        }
    }

    crate::with_field_fn!(extra, AttrMap);

    crate::getter_fn!(interval, GenomicInterval);

    crate::getter_fn!(extra, AttrMap);

    pub fn chromosome(&self) -> &str {
        self.interval.chromosome()
    }

    /// 1-based line number in the input file.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The input line as read, without the line terminator.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}
