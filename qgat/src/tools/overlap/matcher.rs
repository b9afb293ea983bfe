use crate::data_structs::annotation::Feature;
use crate::data_structs::coords::ChromosomeIndex;
use crate::data_structs::QueryRegion;

/// Matches of one query region, borrowed from the region and the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapResult<'a> {
    region:           &'a QueryRegion,
    matches:          Vec<&'a Feature>,
    chromosome_known: bool,
}

impl<'a> OverlapResult<'a> {
    pub fn region(&self) -> &'a QueryRegion {
        self.region
    }

    /// Overlapping features, ascending by `(start, end)`.
    pub fn matches(&self) -> &[&'a Feature] {
        &self.matches
    }

    /// Whether the region's chromosome has any feature in the index.
    pub fn chromosome_known(&self) -> bool {
        self.chromosome_known
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }
}

/// Every feature of `index` overlapping `region` (closed coordinates, same
/// chromosome), ascending by `(start, end)`. Equal keys keep reference
/// order.
pub fn query<'a>(
    region: &'a QueryRegion,
    index: &'a ChromosomeIndex,
) -> OverlapResult<'a> {
    OverlapResult {
        region,
        matches: index.find(region.interval()),
        chromosome_known: index.contains_chromosome(region.chromosome()),
    }
}
