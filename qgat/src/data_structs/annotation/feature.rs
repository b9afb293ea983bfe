use serde::Serialize;

use crate::data_structs::coords::GenomicInterval;
use crate::data_structs::enums::Strand;
use crate::data_structs::typedef::AttrMap;
use crate::with_field_fn;

pub const TRAIT_KEY: &str = "trait";
pub const P_VALUE_KEY: &str = "p_value";
pub const QTL_ID_KEY: &str = "qtl_id";
pub const QTL_NAME_KEY: &str = "qtl_name";
pub const GENE_ID_KEY: &str = "gene_id";
pub const GENE_NAME_KEY: &str = "gene_name";
pub const GENE_BIOTYPE_KEY: &str = "gene_biotype";
pub const FEATURE_TYPE_KEY: &str = "feature_type";

/// A reference record: an interval plus the attributes of its source line.
///
/// The attribute key set depends on the source format. BED QTL records
/// carry `qtl_id`/`qtl_name` at most, GFF trait records carry `trait`,
/// `p_value` and every raw GFF attribute, GTF gene records carry
/// `feature_type`, `gene_id` and the remaining GTF attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    interval:   GenomicInterval,
    strand:     Strand,
    attributes: AttrMap,
}

impl Feature {
    pub fn new(
        interval: GenomicInterval,
        strand: Strand,
        attributes: AttrMap,
    ) -> Self {
        Self {
            interval,
            strand,
            attributes,
        }
    }

    with_field_fn!(strand, Strand);

    with_field_fn!(attributes, AttrMap);

    /// Adds (or replaces) a single attribute.
    pub fn with_attribute<K: Into<String>, V: Into<String>>(
        mut self,
        key: K,
        value: V,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn interval(&self) -> &GenomicInterval {
        &self.interval
    }

    pub fn chromosome(&self) -> &str {
        self.interval.chromosome()
    }

    pub fn start(&self) -> u64 {
        self.interval.start()
    }

    pub fn end(&self) -> u64 {
        self.interval.end()
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn attributes(&self) -> &AttrMap {
        &self.attributes
    }

    pub fn attribute(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn trait_name(&self) -> Option<&str> {
        self.attribute(TRAIT_KEY)
    }

    pub fn qtl_id(&self) -> Option<&str> {
        self.attribute(QTL_ID_KEY)
    }

    pub fn gene_id(&self) -> Option<&str> {
        self.attribute(GENE_ID_KEY)
    }
}
