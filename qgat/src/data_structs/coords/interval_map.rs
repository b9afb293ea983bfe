use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;
use rust_lapper::{
    Interval,
    Lapper,
};

use super::GenomicInterval;
use crate::data_structs::annotation::Feature;
use crate::data_structs::typedef::{
    PosType,
    SeqName,
};

/// Per-chromosome query structure over a reference feature set.
///
/// Features are grouped by exact chromosome name and kept sorted by
/// `(start, end)`. Each chromosome is a [`Lapper`]: a query binary-searches
/// the first candidate whose start lies within the longest feature span of
/// the chromosome and then scans linearly, so a query costs `O(log n + k)`.
/// Overlapping and duplicate features are kept as they are.
///
/// The index is immutable once built and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct ChromosomeIndex {
    features: Vec<Feature>,
    inner:    HashMap<SeqName, Lapper<PosType, usize>>,
}

impl FromIterator<Feature> for ChromosomeIndex {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        let features = iter.into_iter().collect_vec();
        let grouped = features
            .iter()
            .enumerate()
            .map(|(idx, feature)| {
                let (start, stop) = feature.interval().half_open();
                (feature.interval().seqname().clone(), Interval {
                    start,
                    stop,
                    val: idx,
                })
            })
            .into_group_map();

        let mut inner = HashMap::with_capacity(grouped.len());
        for (chr, intervals) in grouped.into_iter() {
            // Lapper sorts by (start, stop) with a stable sort.
            inner.insert(chr, Lapper::new(intervals));
        }
        debug!(
            "Built chromosome index with {} features on {} chromosomes",
            features.len(),
            inner.len()
        );

        Self { features, inner }
    }
}

impl ChromosomeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from any feature sequence. Input order does not
    /// matter.
    pub fn build<I: IntoIterator<Item = Feature>>(features: I) -> Self {
        Self::from_iter(features)
    }

    /// Features overlapping `interval`, ascending by `(start, end)`.
    ///
    /// A chromosome absent from the index yields an empty vector.
    pub fn find(
        &self,
        interval: &GenomicInterval,
    ) -> Vec<&Feature> {
        match self.inner.get(interval.seqname()) {
            Some(lapper) => {
                let (start, stop) = interval.half_open();
                lapper
                    .find(start, stop)
                    .map(|iv| &self.features[iv.val])
                    .collect_vec()
            },
            None => Vec::new(),
        }
    }

    pub fn contains_chromosome(
        &self,
        chromosome: &str,
    ) -> bool {
        self.inner.contains_key(&SeqName::from(chromosome))
    }

    /// Features of one chromosome in index order.
    pub fn chromosome_features<'a>(
        &'a self,
        chromosome: &str,
    ) -> Box<dyn Iterator<Item = &'a Feature> + 'a> {
        match self.inner.get(&SeqName::from(chromosome)) {
            Some(lapper) => {
                Box::new(lapper.iter().map(|iv| &self.features[iv.val]))
            },
            None => Box::new(std::iter::empty()),
        }
    }

    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    pub fn n_chr(&self) -> usize {
        self.inner.len()
    }

    /// Chromosome names, sorted.
    pub fn chr_names(&self) -> Vec<String> {
        self.inner
            .keys()
            .map(|k| k.to_string())
            .sorted()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Width of the longest feature on a chromosome.
    pub fn max_span(
        &self,
        chromosome: &str,
    ) -> Option<PosType> {
        self.inner
            .get(&SeqName::from(chromosome))
            .and_then(|lapper| lapper.iter().map(|iv| iv.stop - iv.start).max())
    }
}
