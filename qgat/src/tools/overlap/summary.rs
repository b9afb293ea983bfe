use std::collections::BTreeMap;
use std::io::Write;

use hashbrown::HashSet;
use itertools::Itertools;
use serde::Serialize;

use crate::data_structs::annotation::GENE_NAME_KEY;
use crate::data_structs::typedef::OutputRow;
use crate::io::ParseReport;

/// Diagnostics of one overlap run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub n_regions:           usize,
    pub n_rows:              usize,
    pub n_matches:           usize,
    /// Regions without any overlapping feature.
    pub n_unmatched_regions: usize,
    /// Chromosomes absent from the reference, with their region counts.
    pub unknown_chromosomes: BTreeMap<String, usize>,
    pub input_report:        Option<ParseReport>,
    pub reference_report:    Option<ParseReport>,
}

impl RunSummary {
    /// Regions whose chromosome is absent from the reference.
    pub fn mismatch_count(&self) -> usize {
        self.unknown_chromosomes.values().sum()
    }

    /// `false` when every region lies on a chromosome the reference does not
    /// know, which almost always means a naming mismatch.
    pub fn has_shared_chromosome(&self) -> bool {
        self.n_regions == 0 || self.mismatch_count() < self.n_regions
    }

    pub fn with_input_report(
        mut self,
        report: ParseReport,
    ) -> Self {
        self.input_report = Some(report);
        self
    }

    pub fn with_reference_report(
        mut self,
        report: ParseReport,
    ) -> Self {
        self.reference_report = Some(report);
        self
    }

    /// Pretty-printed JSON of the whole summary, parse failures included.
    pub fn write_json<W: Write>(
        &self,
        mut sink: W,
    ) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut sink, self)?;
        sink.flush()?;
        Ok(())
    }

    /// Malformed lines over both input files.
    pub fn n_parse_failures(&self) -> usize {
        [&self.input_report, &self.reference_report]
            .into_iter()
            .flatten()
            .map(ParseReport::n_failures)
            .sum()
    }
}

/// First row of every distinct `column` value; rows lacking the column are
/// dropped.
pub fn unique_by(
    rows: &[OutputRow],
    column: &str,
) -> Vec<OutputRow> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| {
            row.get(column)
                .map(|value| seen.insert(value.clone()))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Gene-level summary of an annotation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationSummary {
    pub input:        String,
    pub reference:    String,
    pub output:       String,
    pub n_regions:    usize,
    pub n_overlaps:   usize,
    pub unique_genes: Vec<OutputRow>,
}

impl AnnotationSummary {
    pub fn new(
        rows: &[OutputRow],
        n_regions: usize,
    ) -> Self {
        Self {
            n_regions,
            n_overlaps: rows.len(),
            unique_genes: unique_by(rows, GENE_NAME_KEY),
            ..Default::default()
        }
    }

    pub fn with_paths<S: ToString>(
        mut self,
        input: S,
        reference: S,
        output: S,
    ) -> Self {
        self.input = input.to_string();
        self.reference = reference.to_string();
        self.output = output.to_string();
        self
    }

    pub fn n_unique_genes(&self) -> usize {
        self.unique_genes.len()
    }

    /// Gene names in first-seen order.
    pub fn gene_names(&self) -> Vec<&str> {
        self.unique_genes
            .iter()
            .filter_map(|row| row.get(GENE_NAME_KEY).map(String::as_str))
            .collect_vec()
    }

    /// Plain-text report written next to the annotated table.
    pub fn write_text<W: Write>(
        &self,
        mut sink: W,
    ) -> std::io::Result<()> {
        writeln!(sink, "QGAT Annotation Summary")?;
        writeln!(sink, "=======================")?;
        writeln!(sink, "Input file: {}", self.input)?;
        writeln!(sink, "GTF file: {}", self.reference)?;
        writeln!(sink, "Output file: {}", self.output)?;
        writeln!(sink, "Total input regions: {}", self.n_regions)?;
        writeln!(sink, "Total overlapping genes: {}", self.n_overlaps)?;
        writeln!(sink, "Total unique genes: {}", self.n_unique_genes())?;
        Ok(())
    }
}
