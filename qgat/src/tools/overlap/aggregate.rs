use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use crate::data_structs::annotation::{
    QTL_NAME_KEY,
    TRAIT_KEY,
};
use crate::data_structs::typedef::OutputRow;
use crate::utils::clean_qtl_name;

/// Occurrence count per name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TraitFrequency {
    counts: IndexMap<String, usize>,
}

impl TraitFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the values of `column`; rows without it are ignored.
    pub fn from_column(
        rows: &[OutputRow],
        column: &str,
    ) -> Self {
        Self::from_iter(rows.iter().filter_map(|row| row.get(column).cloned()))
    }

    pub fn add<S: Into<String>>(
        &mut self,
        name: S,
    ) {
        *self.counts.entry(name.into()).or_insert(0) += 1;
    }

    pub fn get(
        &self,
        name: &str,
    ) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Descending by count, ties broken by name.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        self.counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
            .collect()
    }

    pub fn top_n(
        &self,
        n: usize,
    ) -> Vec<(&str, usize)> {
        let mut sorted = self.sorted();
        sorted.truncate(n);
        sorted
    }
}

impl<S: Into<String>> FromIterator<S> for TraitFrequency {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut frequency = Self::new();
        for name in iter {
            frequency.add(name);
        }
        frequency
    }
}

/// Counts assembled rows by their `trait` column. Every row counts, so two
/// features with the same trait matching one region count twice.
pub fn aggregate(rows: &[OutputRow]) -> TraitFrequency {
    TraitFrequency::from_column(rows, TRAIT_KEY)
}

/// Counts QTL names with bracketed ids removed, as shown in run summaries.
pub fn qtl_name_counts(rows: &[OutputRow]) -> TraitFrequency {
    rows.iter()
        .filter_map(|row| row.get(QTL_NAME_KEY))
        .map(|name| clean_qtl_name(name))
        .filter(|name| !name.is_empty())
        .collect()
}
