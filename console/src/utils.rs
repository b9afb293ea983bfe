use std::fs::File;
use std::io::BufWriter;
use std::path::{
    Path,
    PathBuf,
};
use std::time::Duration;

use anyhow::{
    bail,
    Context,
};
use clap::Args;
use console::style;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use itertools::Itertools;
use log::LevelFilter;
use qgat::prelude::*;
use qgat::tools::overlap::ensure_shared_chromosome;
use qgat::utils::THREADS_ENV;

use crate::strings::common as strings;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v info, -vv debug). RUST_LOG takes precedence."
    )]
    pub verbose: u8,
    #[arg(long, global = true, help = "Number of threads to use.")]
    pub threads: Option<usize>,
    #[arg(short, long, global = true, default_value_t = false, help = strings::FORCE)]
    pub force:   bool,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        let mut builder = pretty_env_logger::formatted_builder();
        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        }
        else {
            builder.filter_level(match self.verbose {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Info,
                _ => LevelFilter::Debug,
            });
        }
        builder.try_init()?;

        if let Some(threads) = self.threads {
            // Read once, when the pool is first used
            std::env::set_var(THREADS_ENV, threads.to_string());
        }
        Ok(())
    }

    /// Refuses to overwrite `path` unless `--force` is given.
    pub fn check_output(
        &self,
        path: &Path,
    ) -> anyhow::Result<()> {
        if path.exists() && !self.force {
            bail!(
                "{} already exists, use --force to overwrite it",
                path.display()
            );
        }
        Ok(())
    }
}

/// Options shared by the overlap subcommands.
#[derive(Args, Debug, Clone)]
pub(crate) struct OverlapArgs {
    #[arg(long, default_value_t = false, help = strings::REPORT_MISSING)]
    pub report_missing:     bool,
    #[arg(long, help = strings::MAX_FAILURES)]
    pub max_failures:       Option<usize>,
    #[arg(long, default_value_t = false, help = strings::ZERO_BASED)]
    pub zero_based_input:   bool,
    #[arg(long, default_value_t = false, help = strings::STRICT_CHROMOSOMES)]
    pub strict_chromosomes: bool,
    #[arg(long, help = strings::SUMMARY_JSON)]
    pub summary_json:       Option<PathBuf>,
}

impl OverlapArgs {
    pub fn parse_config(&self) -> ParseConfig {
        let convention = if self.zero_based_input {
            CoordConvention::ZeroBasedHalfOpen
        }
        else {
            CoordConvention::OneBasedClosed
        };
        ParseConfig::default()
            .with_max_failures(self.max_failures)
            .with_input_convention(convention)
    }

    pub fn no_match(&self) -> NoMatchPolicy {
        if self.report_missing {
            NoMatchPolicy::Report
        }
        else {
            NoMatchPolicy::Skip
        }
    }

    /// Reads both files, runs the overlap and reports chromosome mismatches.
    pub fn run(
        &self,
        input: &Path,
        reference: &Path,
        format: ReferenceFormat,
        parse_config: ParseConfig,
    ) -> anyhow::Result<(Vec<QueryRegion>, OverlapOutput)> {
        let spinner = init_spinner(format!("Reading {}", reference.display()))?;
        let (index, reference_report) = read_reference(reference, format, &parse_config)?;
        spinner.set_message(format!("Reading {}", input.display()));
        let (regions, input_report) = read_regions(input, &parse_config)?;

        if let Err(mismatch) = ensure_shared_chromosome(&regions, &index) {
            if self.strict_chromosomes {
                spinner.finish_and_clear();
                return Err(mismatch.into());
            }
            spinner.suspend(|| {
                eprintln!("{} {}", style("Warning:").yellow().bold(), mismatch)
            });
        }

        spinner.set_message(format!("Matching {} regions", regions.len()));
        let mut output = OverlapConfig::default()
            .with_mode(format.mode())
            .with_no_match(self.no_match())
            .run(&regions, &index)?;
        spinner.finish_and_clear();

        output.summary = std::mem::take(&mut output.summary)
            .with_input_report(input_report)
            .with_reference_report(reference_report);

        Ok((regions, output))
    }

    pub fn write_summary_json(
        &self,
        summary: &RunSummary,
    ) -> anyhow::Result<()> {
        if let Some(path) = self.summary_json.as_ref() {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            summary.write_json(BufWriter::new(file))?;
        }
        Ok(())
    }
}

pub fn init_spinner(message: String) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// `out.tsv` with suffix `_summary` and extension `txt` becomes
/// `out_summary.txt`.
pub fn sibling_path(
    path: &Path,
    suffix: &str,
    extension: &str,
) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    let stem = Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}{suffix}.{extension}"))
}

pub fn print_run_summary(summary: &RunSummary) {
    println!("{}", style("Summary Report:").bold());
    println!(" Total input regions: {}", summary.n_regions);
    println!(" Total overlaps: {}", summary.n_matches);
    println!(" Regions without overlap: {}", summary.n_unmatched_regions);
    if summary.mismatch_count() > 0 {
        println!(
            " Regions on chromosomes absent from the reference: {} ({})",
            summary.mismatch_count(),
            summary.unknown_chromosomes.keys().join(", ")
        );
    }
    if summary.n_parse_failures() > 0 {
        println!(
            " {}",
            style(format!(
                "Skipped malformed lines: {}",
                summary.n_parse_failures()
            ))
            .yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_path() {
        assert_eq!(
            sibling_path(Path::new("out/genes.tsv"), "_summary", "txt"),
            PathBuf::from("out/genes_summary.txt")
        );
        assert_eq!(
            sibling_path(Path::new("genes.tsv.gz"), "_unique", "tsv"),
            PathBuf::from("genes_unique.tsv")
        );
        assert_eq!(
            sibling_path(Path::new("genes"), "_unique", "tsv"),
            PathBuf::from("genes_unique.tsv")
        );
    }
}
