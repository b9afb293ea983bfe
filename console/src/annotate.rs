use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use itertools::Itertools;
use qgat::prelude::*;

use crate::strings::{
    annotate as strings,
    common,
};
use crate::utils::{
    print_run_summary,
    sibling_path,
    OverlapArgs,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct AnnotateArgs {
    #[arg(short, long, required = true, help = common::INPUT)]
    input:         PathBuf,
    #[arg(short, long, required = true, help = common::OUTPUT)]
    output:        PathBuf,
    #[arg(short, long, required = true, help = strings::GTF)]
    gtf:           PathBuf,
    #[arg(long, default_value_t = false, help = strings::NCBI)]
    ncbi:          bool,
    #[arg(long = "feature-type", num_args = 1.., help = strings::FEATURE_TYPE)]
    feature_types: Vec<String>,
    #[clap(flatten)]
    overlap:       OverlapArgs,
}

impl AnnotateArgs {
    fn dialect(&self) -> GtfDialect {
        if self.ncbi {
            GtfDialect::Ncbi
        }
        else {
            GtfDialect::Ensembl
        }
    }

    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let summary_path = sibling_path(&self.output, "_summary", "txt");
        let unique_path = sibling_path(&self.output, "_unique", "tsv");
        for path in [&self.output, &summary_path, &unique_path] {
            utils.check_output(path)?;
        }

        let parse_config = self
            .overlap
            .parse_config()
            .with_feature_types(self.feature_types.clone());
        let (regions, output) = self.overlap.run(
            &self.input,
            &self.gtf,
            ReferenceFormat::Gtf(self.dialect()),
            parse_config,
        )?;

        let mut writer = TableWriter::from_path(&self.output)?;
        writer.write_rows(&output.rows)?;
        writer.finish()?;

        let mut summary = AnnotationSummary::new(&output.rows, regions.len()).with_paths(
            self.input.display(),
            self.gtf.display(),
            self.output.display(),
        );
        summary.n_overlaps = output.summary.n_matches;

        let file = File::create(&summary_path)
            .with_context(|| format!("cannot create {}", summary_path.display()))?;
        let mut sink = BufWriter::new(file);
        summary.write_text(&mut sink)?;
        sink.flush()?;

        let mut writer = TableWriter::from_path(&unique_path)?;
        writer.write_rows(&summary.unique_genes)?;
        writer.finish()?;
        self.overlap.write_summary_json(&output.summary)?;

        print_run_summary(&output.summary);
        println!(" Total unique genes: {}", summary.n_unique_genes());
        if !summary.unique_genes.is_empty() {
            println!(
                "{} {}",
                style("Genes:").bold(),
                summary.gene_names().iter().join(", ")
            );
        }
        println!(
            "Results written to {}, {} and {}",
            self.output.display(),
            summary_path.display(),
            unique_path.display()
        );
        Ok(())
    }
}
