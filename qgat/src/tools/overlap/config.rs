use log::debug;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;

use crate::data_structs::coords::ChromosomeIndex;
use crate::data_structs::{
    NoMatchPolicy,
    OverlapMode,
    QueryRegion,
};
use crate::tools::overlap::assemble::ResultAssembler;
use crate::tools::overlap::run::{
    collect_output,
    process_region,
    OverlapOutput,
};
use crate::utils::{
    n_threads,
    THREAD_POOL,
};
use crate::with_field_fn;

/// Settings of an overlap run.
///
/// `n_threads` selects where region queries run: `None` uses the crate-wide
/// [`THREAD_POOL`], `Some(1)` runs on the calling thread and any other value
/// builds a dedicated pool of that size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlapConfig {
    pub mode:      OverlapMode,
    pub no_match:  NoMatchPolicy,
    pub n_threads: Option<usize>,
}

impl OverlapConfig {
    with_field_fn!(mode, OverlapMode);

    with_field_fn!(no_match, NoMatchPolicy);

    with_field_fn!(n_threads, Option<usize>);

    pub fn assembler(&self) -> ResultAssembler {
        ResultAssembler::new(self.mode, self.no_match)
    }

    /// Queries every region against `index` and assembles the rows. Rows
    /// follow region order, then match order.
    pub fn run(
        &self,
        regions: &[QueryRegion],
        index: &ChromosomeIndex,
    ) -> anyhow::Result<OverlapOutput> {
        let assembler = self.assembler();
        let process = |region: &QueryRegion| process_region(region, index, &assembler);

        let outcomes = match self.n_threads {
            Some(1) => regions.iter().map(process).collect(),
            Some(n) => {
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()?
                    .install(|| regions.par_iter().map(process).collect())
            },
            None => {
                debug!(
                    "Querying {} regions on {} threads",
                    regions.len(),
                    n_threads()
                );
                THREAD_POOL.install(|| regions.par_iter().map(process).collect())
            },
        };
        Ok(collect_output(regions, outcomes))
    }
}
