use std::cmp::Ordering;
use std::fmt::Display;

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::enums::CoordConvention;
use crate::data_structs::typedef::{
    PosType,
    SeqName,
};
use crate::error::RecordError;

/// Closed, 1-based genomic interval `[start, end]` on a chromosome.
///
/// Source coordinates go through [`GenomicInterval::from_source`], which
/// rejects `start >= end` and applies the convention shift exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenomicInterval {
    chromosome: SeqName,
    start:      PosType,
    end:        PosType,
}

impl GenomicInterval {
    /// Creates an interval from internal (closed) coordinates.
    pub fn new(
        chromosome: SeqName,
        start: PosType,
        end: PosType,
    ) -> Self {
        assert!(
            start <= end,
            "Start position must be less than or equal to end position"
        );
        Self {
            chromosome,
            start,
            end,
        }
    }

    /// Creates an interval from the coordinates written in a source line.
    pub fn from_source(
        chromosome: &str,
        start: PosType,
        end: PosType,
        convention: CoordConvention,
    ) -> Result<Self, RecordError> {
        if start >= end {
            return Err(RecordError::InvertedInterval { start, end });
        }
        Ok(Self {
            chromosome: SeqName::from(chromosome),
            start:      start + convention.start_shift(),
            end,
        })
    }

    /// Returns the chromosome name.
    pub fn chromosome(&self) -> &str {
        self.chromosome.as_str()
    }

    pub fn seqname(&self) -> &SeqName {
        &self.chromosome
    }

    /// Returns the first covered position.
    pub fn start(&self) -> PosType {
        self.start
    }

    /// Returns the last covered position.
    pub fn end(&self) -> PosType {
        self.end
    }

    /// Number of covered positions.
    pub fn width(&self) -> PosType {
        self.end - self.start + 1
    }

    /// Closed-interval overlap: same chromosome and `s1 <= e2 && s2 <= e1`.
    pub fn overlaps(
        &self,
        other: &Self,
    ) -> bool {
        self.chromosome == other.chromosome
            && self.start <= other.end
            && other.start <= self.end
    }

    /// Half-open `[start, end + 1)` bounds, as used by the interval index.
    pub(crate) fn half_open(&self) -> (PosType, PosType) {
        (self.start, self.end.saturating_add(1))
    }

    /// `(start, end)` sort key used for deterministic ordering.
    pub fn sort_key(&self) -> (PosType, PosType) {
        (self.start, self.end)
    }
}

impl PartialOrd for GenomicInterval {
    /// Intervals on different chromosomes are not comparable.
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        if self.chromosome != other.chromosome {
            return None;
        }
        Some(self.sort_key().cmp(&other.sort_key()))
    }
}

impl Display for GenomicInterval {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}
