use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use console::style;
use log::info;
use qgat::prelude::*;

use crate::species::{
    qtldb_dir,
    Species,
};
use crate::strings::{
    common,
    qtl as strings,
};
use crate::utils::{
    print_run_summary,
    OverlapArgs,
    UtilsArgs,
};

const TOP_N: usize = 10;

#[derive(Args, Debug, Clone)]
pub(crate) struct QtlArgs {
    #[arg(short, long, required = true, help = common::INPUT)]
    input:       PathBuf,
    #[arg(short, long, required = true, help = common::OUTPUT)]
    output:      PathBuf,
    #[arg(short, long, value_enum, required_unless_present = "reference", help = strings::SPECIES)]
    species:     Option<Species>,
    #[arg(long, help = strings::QTLDB)]
    qtldb:       Option<PathBuf>,
    #[arg(short, long, conflicts_with_all = ["species", "qtldb"], help = strings::REFERENCE)]
    reference:   Option<PathBuf>,
    #[arg(long = "trait", default_value_t = false, help = strings::TRAIT)]
    trait_level: bool,
    #[clap(flatten)]
    overlap:     OverlapArgs,
}

impl QtlArgs {
    /// Reference file and its format.
    fn reference(&self) -> anyhow::Result<(PathBuf, ReferenceFormat)> {
        let path = match (&self.reference, self.species) {
            (Some(path), _) => path.clone(),
            (None, Some(species)) => {
                let dir = qtldb_dir(self.qtldb.as_deref())?;
                species.reference_path(&dir, self.trait_level)
            },
            (None, None) => bail!("either --species or --reference is required"),
        };
        let format = if self.trait_level {
            ReferenceFormat::Gff
        }
        else if is_bed(&path) {
            ReferenceFormat::Bed
        }
        else {
            ReferenceFormat::Gff
        };
        Ok((path, format))
    }

    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        utils.check_output(&self.output)?;
        let (reference, format) = self.reference()?;
        info!("QTL reference {} ({format})", reference.display());

        let (_, output) = self.overlap.run(
            &self.input,
            &reference,
            format,
            self.overlap.parse_config(),
        )?;

        let mut writer = TableWriter::from_path(&self.output)?;
        writer.write_rows(&output.rows)?;
        writer.finish()?;
        self.overlap.write_summary_json(&output.summary)?;

        print_run_summary(&output.summary);
        let (title, frequency) = match format.mode() {
            OverlapMode::Trait => ("Top traits:", output.trait_frequency()),
            _ => ("Top QTL names:", output.qtl_names()),
        };
        if !frequency.is_empty() {
            println!("{}", style(title).bold());
            for (name, count) in frequency.top_n(TOP_N) {
                println!(" {name}: {count}");
            }
        }
        println!("Results written to {}", self.output.display());
        Ok(())
    }
}

fn is_bed(path: &std::path::Path) -> bool {
    let name = path.to_string_lossy().to_lowercase();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    name.ends_with(".bed")
}
