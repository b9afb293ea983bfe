use itertools::Itertools;
use log::{
    debug,
    warn,
};

use crate::data_structs::coords::ChromosomeIndex;
use crate::data_structs::typedef::OutputRow;
use crate::data_structs::QueryRegion;
use crate::error::FatalError;
use crate::tools::overlap::aggregate::{
    aggregate,
    qtl_name_counts,
    TraitFrequency,
};
use crate::tools::overlap::assemble::ResultAssembler;
use crate::tools::overlap::matcher::query;
use crate::tools::overlap::summary::RunSummary;

/// Per-region result of a run before it is folded into [`OverlapOutput`].
#[derive(Debug, Clone)]
pub(crate) struct RegionOutcome {
    rows:             Vec<OutputRow>,
    n_matches:        usize,
    chromosome_known: bool,
}

pub(crate) fn process_region(
    region: &QueryRegion,
    index: &ChromosomeIndex,
    assembler: &ResultAssembler,
) -> RegionOutcome {
    let result = query(region, index);
    RegionOutcome {
        rows:             assembler.assemble(&result),
        n_matches:        result.len(),
        chromosome_known: result.chromosome_known(),
    }
}

pub(crate) fn collect_output(
    regions: &[QueryRegion],
    outcomes: Vec<RegionOutcome>,
) -> OverlapOutput {
    let mut summary = RunSummary {
        n_regions: regions.len(),
        ..Default::default()
    };
    let mut rows = Vec::new();

    for (region, outcome) in regions.iter().zip(outcomes) {
        if outcome.n_matches == 0 {
            summary.n_unmatched_regions += 1;
        }
        if !outcome.chromosome_known {
            *summary
                .unknown_chromosomes
                .entry(region.chromosome().to_string())
                .or_insert(0) += 1;
        }
        summary.n_matches += outcome.n_matches;
        rows.extend(outcome.rows);
    }
    summary.n_rows = rows.len();

    for (chromosome, count) in summary.unknown_chromosomes.iter() {
        warn!("Chromosome {chromosome} is absent from the reference ({count} regions)");
    }
    debug!(
        "{} regions, {} matches, {} without overlap",
        summary.n_regions, summary.n_matches, summary.n_unmatched_regions
    );

    OverlapOutput { rows, summary }
}

/// Assembled rows of a run with its diagnostics.
#[derive(Debug, Clone, Default)]
pub struct OverlapOutput {
    pub rows:    Vec<OutputRow>,
    pub summary: RunSummary,
}

impl OverlapOutput {
    /// Rows counted by `trait` (trait mode).
    pub fn trait_frequency(&self) -> TraitFrequency {
        aggregate(&self.rows)
    }

    /// Rows counted by cleaned QTL name (QTL mode).
    pub fn qtl_names(&self) -> TraitFrequency {
        qtl_name_counts(&self.rows)
    }
}

/// Fails with [`FatalError::NoSharedChromosome`] when regions exist but none
/// of their chromosomes is in `index`.
pub fn ensure_shared_chromosome(
    regions: &[QueryRegion],
    index: &ChromosomeIndex,
) -> Result<(), FatalError> {
    if regions.is_empty()
        || regions
            .iter()
            .any(|r| index.contains_chromosome(r.chromosome()))
    {
        return Ok(());
    }
    Err(FatalError::NoSharedChromosome {
        input:     regions
            .iter()
            .map(|r| r.chromosome().to_string())
            .unique()
            .sorted()
            .collect(),
        reference: index.chr_names(),
    })
}
