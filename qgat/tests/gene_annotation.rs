use qgat::prelude::*;
use qgat::tools::overlap::NA;
use rstest::*;
use tempfile::TempDir;

mod common;
use common::write_file;

const ENSEMBL_GTF: &str = "\
#!genome-build ARS-UCD1.2
1\tensembl\tgene\t1000\t5000\t.\t+\t.\tgene_id \"ENSBTAG01\"; gene_version \"3\"; gene_name \"GRK3\"; gene_biotype \"protein_coding\";
1\tensembl\ttranscript\t1000\t5000\t.\t+\t.\tgene_id \"ENSBTAG01\"; transcript_id \"ENSBTAT01\";
1\tensembl\tgene\t4000\t9000\t.\t-\t.\tgene_id \"ENSBTAG02\"; gene_biotype \"lncRNA\";
1\tensembl\tgene\t4500\t4800\t.\t+\t.\tgene_id \"ENSBTAG03\"; gene_name \"GRK3\"; gene_biotype \"protein_coding\";
2\tensembl\tgene\t100\t200\t.\t+\t.\tgene_id=broken;
";

const NCBI_GTF: &str = "\
1\tGnomon\tgene\t1000\t5000\t.\t+\t.\tgene_id \"GRK3\"; db_xref \"GeneID:100\"; gene \"GRK3\"; gene_biotype \"protein_coding\";
1\tGnomon\tgene\t4000\t9000\t.\t-\t.\tdb_xref \"GeneID:200\"; gene_biotype \"lncRNA\"; description \"uncharacterized \"LOC200\"\";
";

const REGIONS: &str = "\
chromosome\tstart\tend\tpeak
1\t4600\t4700\tp1
1\t8000\t8100\tp2
1\t20000\t20100\tp3
";

#[fixture]
fn regions_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "regions.tsv", REGIONS).unwrap();
    (dir, path)
}

#[rstest]
fn test_ensembl_annotation(regions_path: (TempDir, std::path::PathBuf)) -> anyhow::Result<()> {
    let (dir, input) = regions_path;
    let gtf = write_file(&dir, "genes.gtf", ENSEMBL_GTF)?;

    let config = ParseConfig::default();
    let (index, reference_report) =
        read_reference(&gtf, ReferenceFormat::Gtf(GtfDialect::Ensembl), &config)?;
    let (regions, _) = read_regions(&input, &config)?;
    assert_eq!(index.n_features(), 3);
    assert_eq!(reference_report.n_failures(), 1);
    assert_eq!(reference_report.failures[0].line, 6);

    let output = OverlapConfig::default()
        .with_mode(OverlapMode::Annotation)
        .run(&regions, &index)?;
    let genes = output
        .rows
        .iter()
        .map(|row| (row["peak"].as_str(), row["gene_id"].as_str()))
        .collect::<Vec<_>>();
    assert_eq!(genes, vec![
        ("p1", "ENSBTAG01"),
        ("p1", "ENSBTAG02"),
        ("p1", "ENSBTAG03"),
        ("p2", "ENSBTAG02")
    ]);
    assert_eq!(output.rows[1]["gene_name"], NA);
    assert_eq!(output.rows[1]["width"], "5001");
    assert_eq!(output.summary.n_unmatched_regions, 1);

    let summary = AnnotationSummary::new(&output.rows, regions.len());
    assert_eq!(summary.gene_names(), vec!["GRK3", NA]);
    Ok(())
}

#[rstest]
fn test_ncbi_annotation(regions_path: (TempDir, std::path::PathBuf)) -> anyhow::Result<()> {
    let (dir, input) = regions_path;
    let gtf = write_file(&dir, "genes.gtf", NCBI_GTF)?;

    let config = ParseConfig::default();
    let (index, report) =
        read_reference(&gtf, ReferenceFormat::Gtf(GtfDialect::Ncbi), &config)?;
    assert!(report.is_clean());
    let (regions, _) = read_regions(&input, &config)?;

    let rows = OverlapConfig::default()
        .with_mode(OverlapMode::Annotation)
        .run(&regions, &index)?
        .rows;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["gene_id"], "GRK3");
    assert_eq!(rows[1]["gene_id"], "200");
    assert_eq!(rows[1]["gene_name"], NA);
    assert_eq!(rows[1]["description"], "uncharacterized \"LOC200\"");
    Ok(())
}

/// Reading an NCBI file as Ensembl fails loudly instead of dropping ids.
#[test]
fn test_misdeclared_dialect() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let gtf = write_file(&dir, "genes.gtf", NCBI_GTF)?;
    let (features, report) = read_features(
        &gtf,
        ReferenceFormat::Gtf(GtfDialect::Ensembl),
        &ParseConfig::default(),
    )?;
    assert_eq!(features.len(), 1);
    assert_eq!(report.n_failures(), 1);
    assert_eq!(report.failures[0].error.class(), FailureClass::Format);
    Ok(())
}
