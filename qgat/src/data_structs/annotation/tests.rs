use rstest::rstest;

use super::*;
use crate::data_structs::coords::GenomicInterval;
use crate::data_structs::enums::{
    GtfDialect,
    Strand,
};
use crate::data_structs::typedef::{
    AttrMap,
    SeqName,
};
use crate::error::RecordError;

fn keys(attributes: &AttrMap) -> Vec<&str> {
    attributes.keys().map(String::as_str).collect()
}

#[test]
fn test_gff_attributes_verbatim() {
    let attributes =
        parse_gff_attributes("ID=q1;Name=Milk fat;P-value=0.01;").unwrap();
    assert_eq!(keys(&attributes), vec!["ID", "Name", "P-value"]);
    assert_eq!(attributes["Name"], "Milk fat");
    assert_eq!(attributes["P-value"], "0.01");
}

#[rstest]
#[case::empty("")]
#[case::dot(".")]
#[case::separators(" ; ;")]
fn test_gff_attributes_empty(#[case] s: &str) {
    assert!(parse_gff_attributes(s).unwrap().is_empty());
}

#[rstest]
#[case::no_equals("ID=q1;broken")]
#[case::empty_key("=value")]
fn test_gff_attributes_invalid(#[case] s: &str) {
    let err = parse_gff_attributes(s).unwrap_err();
    assert!(matches!(err, RecordError::InvalidAttribute { .. }));
}

#[test]
fn test_gff_repeated_key_joined() {
    let attributes = parse_gff_attributes("Dbxref=a;Dbxref=b").unwrap();
    assert_eq!(attributes["Dbxref"], "a,b");
}

#[test]
fn test_ensembl_attributes() {
    let attributes = parse_gtf_attributes(
        r#"gene_id "ENSBTAG00000000005"; gene_name "GRK3"; exon_number 2; gene_biotype "protein_coding";"#,
        GtfDialect::Ensembl,
    )
    .unwrap();
    assert_eq!(
        keys(&attributes),
        vec!["gene_id", "gene_name", "exon_number", "gene_biotype"]
    );
    assert_eq!(attributes["gene_id"], "ENSBTAG00000000005");
    assert_eq!(attributes["exon_number"], "2");
}

#[test]
fn test_ensembl_value_with_semicolon() {
    let attributes = parse_gtf_attributes(
        r#"gene_id "g1"; note "a;b";"#,
        GtfDialect::Ensembl,
    )
    .unwrap();
    assert_eq!(attributes["note"], "a;b");
}

#[rstest]
#[case::key_equals_value(r#"gene_id=g1;"#)]
#[case::unterminated(r#"gene_id "g1; gene_name "x";"#)]
#[case::missing_value("gene_id")]
#[case::garbage_after_value(r#"gene_id "g1" junk;"#)]
fn test_ensembl_rejects_malformed(#[case] s: &str) {
    let err = parse_gtf_attributes(s, GtfDialect::Ensembl).unwrap_err();
    assert!(matches!(err, RecordError::InvalidAttribute { .. }));
}

#[test]
fn test_ncbi_mixed_syntax() {
    let attributes = parse_gtf_attributes(
        r#"gene_id "LOC100"; db_xref "GeneID:100"; gene=BRCA1; note "contains "inner" quotes";"#,
        GtfDialect::Ncbi,
    )
    .unwrap();
    assert_eq!(attributes["gene"], "BRCA1");
    assert_eq!(attributes["db_xref"], "GeneID:100");
    assert_eq!(attributes["note"], r#"contains "inner" quotes"#);
}

#[test]
fn test_ncbi_quoted_value_spans_semicolon() {
    let attributes = parse_gtf_attributes(
        r#"gene_id "g1"; product "alpha; beta"; gene "X";"#,
        GtfDialect::Ncbi,
    )
    .unwrap();
    assert_eq!(attributes["product"], "alpha; beta");
    assert_eq!(attributes["gene"], "X");
}

#[test]
fn test_normalize_ensembl_order() {
    let raw = parse_gtf_attributes(
        r#"gene_version "3"; gene_name "GRK3"; gene_id "G1";"#,
        GtfDialect::Ensembl,
    )
    .unwrap();
    let attributes =
        normalize_gtf_attributes(raw, "gene", GtfDialect::Ensembl).unwrap();
    assert_eq!(keys(&attributes), vec![
        FEATURE_TYPE_KEY,
        GENE_ID_KEY,
        GENE_NAME_KEY,
        "gene_version"
    ]);
    assert_eq!(attributes[FEATURE_TYPE_KEY], "gene");
}

#[test]
fn test_normalize_ncbi_fallbacks() {
    let raw = parse_gtf_attributes(
        r#"db_xref "GeneID:12345"; gene "BRCA1"; gene_biotype "protein_coding";"#,
        GtfDialect::Ncbi,
    )
    .unwrap();
    let attributes =
        normalize_gtf_attributes(raw, "gene", GtfDialect::Ncbi).unwrap();
    assert_eq!(attributes[GENE_ID_KEY], "12345");
    assert_eq!(attributes[GENE_NAME_KEY], "BRCA1");
    assert_eq!(attributes[GENE_BIOTYPE_KEY], "protein_coding");
}

#[test]
fn test_normalize_both_dialects_same_shape() {
    let ensembl = normalize_gtf_attributes(
        parse_gtf_attributes(
            r#"gene_id "7"; gene_name "A"; gene_biotype "lncRNA";"#,
            GtfDialect::Ensembl,
        )
        .unwrap(),
        "gene",
        GtfDialect::Ensembl,
    )
    .unwrap();
    let ncbi = normalize_gtf_attributes(
        parse_gtf_attributes(
            r#"db_xref "GeneID:7"; gene "A"; gene_biotype "lncRNA";"#,
            GtfDialect::Ncbi,
        )
        .unwrap(),
        "gene",
        GtfDialect::Ncbi,
    )
    .unwrap();

    for key in [FEATURE_TYPE_KEY, GENE_ID_KEY, GENE_NAME_KEY, GENE_BIOTYPE_KEY] {
        assert_eq!(ensembl.get(key), ncbi.get(key), "key {key}");
    }
}

#[test]
fn test_normalize_missing_gene_id() {
    // An NCBI-only record read as Ensembl has no gene_id.
    let raw = parse_gtf_attributes(
        r#"db_xref "GeneID:1"; gene "A";"#,
        GtfDialect::Ensembl,
    )
    .unwrap();
    let err =
        normalize_gtf_attributes(raw, "gene", GtfDialect::Ensembl).unwrap_err();
    assert_eq!(err, RecordError::MissingAttribute { key: GENE_ID_KEY });
}

#[test]
fn test_derive_trait_attributes() {
    let raw = parse_gff_attributes(
        "QTL_ID=2345;Name=Milk fat yield;P-value=0.001;Map_Type=Genome",
    )
    .unwrap();
    let attributes = derive_trait_attributes(raw, "Milk_fat_yield");

    assert_eq!(attributes[TRAIT_KEY], "Milk_fat_yield");
    assert_eq!(attributes[P_VALUE_KEY], "0.001");
    assert_eq!(attributes[QTL_ID_KEY], "2345");
    assert_eq!(attributes[QTL_NAME_KEY], "Milk fat yield");
    // Raw keys are kept as well
    assert_eq!(attributes["Map_Type"], "Genome");
    assert_eq!(attributes["P-value"], "0.001");
    assert_eq!(keys(&attributes)[0], TRAIT_KEY);
}

#[test]
fn test_derive_trait_keeps_raw_value() {
    let raw = parse_gff_attributes("trait=Explicit;p_value=1e-5;P-value=0.5")
        .unwrap();
    let attributes = derive_trait_attributes(raw, "FromColumn");
    assert_eq!(attributes[TRAIT_KEY], "Explicit");
    assert_eq!(attributes[P_VALUE_KEY], "1e-5");
}

#[test]
fn test_feature_accessors() {
    let interval = GenomicInterval::new(SeqName::from("1"), 101, 200);
    let feature = Feature::new(interval.clone(), Strand::None, AttrMap::new())
        .with_strand(Strand::Reverse)
        .with_attribute(QTL_ID_KEY, "42")
        .with_attribute(GENE_ID_KEY, "G");

    assert_eq!(feature.interval(), &interval);
    assert_eq!(feature.chromosome(), "1");
    assert_eq!((feature.start(), feature.end()), (101, 200));
    assert_eq!(feature.strand(), Strand::Reverse);
    assert_eq!(feature.qtl_id(), Some("42"));
    assert_eq!(feature.gene_id(), Some("G"));
    assert_eq!(feature.trait_name(), None);
}
