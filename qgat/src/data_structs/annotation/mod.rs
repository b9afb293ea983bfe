//! Reference features and the attribute parsers that produce them.

mod attributes;
mod feature;

pub use attributes::{
    derive_trait_attributes,
    normalize_gtf_attributes,
    parse_gff_attributes,
    parse_gtf_attributes,
};
pub use feature::*;

#[cfg(test)]
mod tests;
