use hashbrown::HashSet;
use itertools::Itertools;
use serde::Serialize;

use crate::data_structs::annotation::{
    Feature,
    FEATURE_TYPE_KEY,
    GENE_BIOTYPE_KEY,
    GENE_ID_KEY,
    GENE_NAME_KEY,
    QTL_ID_KEY,
    QTL_NAME_KEY,
};
use crate::data_structs::typedef::OutputRow;
use crate::data_structs::{
    NoMatchPolicy,
    OverlapMode,
    QueryRegion,
};
use crate::tools::overlap::matcher::OverlapResult;
use crate::with_field_fn;

pub const NOTE_COLUMN: &str = "note";
pub const NO_OVERLAP_NOTE: &str = "no overlap";
/// Placeholder for missing gene name or biotype.
pub const NA: &str = "NA";

/// Prefix of region columns whose name is taken by the matched feature.
const INPUT_PREFIX: &str = "input_";
/// Prefix of fixed feature columns whose name is also a raw attribute key.
const FEATURE_PREFIX: &str = "feature_";

type Columns = Vec<(String, String)>;

/// Joins matched feature attributes onto the query region.
///
/// Every row starts with `chromosome`, `region_start`, `region_end` and the
/// extra input columns of the region. The remaining columns depend on the
/// [`OverlapMode`]. Feature attribute keys always reach the row unchanged:
/// a region column with the same name is written as `input_<name>`, and a
/// fixed feature column (e.g. `qtl_start`) as `feature_<name>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultAssembler {
    mode:     OverlapMode,
    no_match: NoMatchPolicy,
}

impl ResultAssembler {
    pub fn new(
        mode: OverlapMode,
        no_match: NoMatchPolicy,
    ) -> Self {
        Self { mode, no_match }
    }

    with_field_fn!(mode, OverlapMode);

    with_field_fn!(no_match, NoMatchPolicy);

    pub fn mode(&self) -> OverlapMode {
        self.mode
    }

    pub fn no_match(&self) -> NoMatchPolicy {
        self.no_match
    }

    /// One row per matched feature, in match order.
    pub fn assemble(
        &self,
        result: &OverlapResult,
    ) -> Vec<OutputRow> {
        if result.is_empty() {
            return match self.no_match {
                NoMatchPolicy::Skip => Vec::new(),
                NoMatchPolicy::Report => {
                    let note = vec![(NOTE_COLUMN.to_string(), NO_OVERLAP_NOTE.to_string())];
                    vec![compose(result.region(), Vec::new(), note)]
                },
            };
        }

        result
            .matches()
            .iter()
            .map(|feature| {
                let (fixed, attributes) = match self.mode {
                    OverlapMode::Qtl => qtl_columns(feature),
                    OverlapMode::Trait => trait_columns(feature),
                    OverlapMode::Annotation => gene_columns(feature),
                };
                compose(result.region(), fixed, attributes)
            })
            .collect()
    }
}

fn prefixed_until_free<F: Fn(&str) -> bool>(
    prefix: &str,
    key: String,
    taken: F,
) -> String {
    let mut key = key;
    while taken(&key) {
        key = format!("{prefix}{key}");
    }
    key
}

/// Builds a row from region columns, fixed feature columns and attribute
/// columns, in that order. Attribute keys are kept as they are.
fn compose(
    region: &QueryRegion,
    fixed: Columns,
    attributes: Columns,
) -> OutputRow {
    let attribute_keys = attributes
        .iter()
        .map(|(key, _)| key.as_str())
        .collect::<HashSet<_>>();
    let fixed = fixed
        .into_iter()
        .map(|(key, value)| {
            let key =
                prefixed_until_free(FEATURE_PREFIX, key, |k| attribute_keys.contains(k));
            (key, value)
        })
        .collect_vec();
    let feature_keys = fixed
        .iter()
        .chain(attributes.iter())
        .map(|(key, _)| key.as_str())
        .collect::<HashSet<_>>();

    let mut row = OutputRow::with_capacity(
        region.extra().len() + 3 + fixed.len() + attributes.len(),
    );
    for (key, value) in region_columns(region) {
        let key = prefixed_until_free(INPUT_PREFIX, key, |k| {
            feature_keys.contains(k) || row.contains_key(k)
        });
        row.insert(key, value);
    }
    for (key, value) in fixed.iter().chain(attributes.iter()) {
        row.insert(key.clone(), value.clone());
    }
    row
}

fn region_columns(region: &QueryRegion) -> Columns {
    let interval = region.interval();
    let mut columns = vec![
        ("chromosome".to_string(), interval.chromosome().to_string()),
        ("region_start".to_string(), interval.start().to_string()),
        ("region_end".to_string(), interval.end().to_string()),
    ];
    columns.extend(
        region
            .extra()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );
    columns
}

fn qtl_columns(feature: &Feature) -> (Columns, Columns) {
    let fixed = vec![
        ("qtl_start".to_string(), feature.start().to_string()),
        ("qtl_end".to_string(), feature.end().to_string()),
    ];
    let attributes = [QTL_ID_KEY, QTL_NAME_KEY]
        .into_iter()
        .filter_map(|key| {
            feature
                .attribute(key)
                .map(|value| (key.to_string(), value.to_string()))
        })
        .collect();
    (fixed, attributes)
}

fn trait_columns(feature: &Feature) -> (Columns, Columns) {
    let fixed = vec![
        ("qtl_start".to_string(), feature.start().to_string()),
        ("qtl_end".to_string(), feature.end().to_string()),
    ];
    let attributes = feature
        .attributes()
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    (fixed, attributes)
}

fn gene_columns(feature: &Feature) -> (Columns, Columns) {
    let or_na = |key: &str| {
        feature
            .attribute(key)
            .filter(|v| !v.is_empty())
            .unwrap_or(NA)
            .to_string()
    };

    let fixed = vec![
        ("gene_chr".to_string(), feature.chromosome().to_string()),
        ("gene_start_pos".to_string(), feature.start().to_string()),
        ("gene_end_pos".to_string(), feature.end().to_string()),
        ("width".to_string(), feature.interval().width().to_string()),
        ("strand".to_string(), feature.strand().to_string()),
    ];

    const CANONICAL: [&str; 4] = [GENE_ID_KEY, GENE_NAME_KEY, GENE_BIOTYPE_KEY, FEATURE_TYPE_KEY];
    let mut attributes = vec![
        (GENE_ID_KEY.to_string(), or_na(GENE_ID_KEY)),
        (GENE_NAME_KEY.to_string(), or_na(GENE_NAME_KEY)),
        (GENE_BIOTYPE_KEY.to_string(), or_na(GENE_BIOTYPE_KEY)),
        (
            FEATURE_TYPE_KEY.to_string(),
            feature.attribute(FEATURE_TYPE_KEY).unwrap_or_default().to_string(),
        ),
    ];
    attributes.extend(
        feature
            .attributes()
            .iter()
            .filter(|(key, _)| !CANONICAL.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone())),
    );
    (fixed, attributes)
}
