use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use log::info;
use qgat::prelude::*;

use crate::strings::freq as strings;
use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct FreqArgs {
    #[arg(short, long, required = true, help = strings::INPUT)]
    input:  PathBuf,
    #[arg(short, long, required = true, help = strings::OUTPUT)]
    output: PathBuf,
    #[arg(short, long, default_value = "trait", help = strings::COLUMN)]
    column: String,
}

impl FreqArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        utils.check_output(&self.output)?;

        let rows = read_table(&self.input)?;
        if rows.is_empty() {
            bail!("{} contains no rows", self.input.display());
        }
        let frequency = TraitFrequency::from_column(&rows, &self.column);
        if frequency.is_empty() {
            bail!(
                "column '{}' not found in {}",
                self.column,
                self.input.display()
            );
        }
        info!(
            "Counted {} values of '{}' ({} distinct)",
            frequency.total(),
            self.column,
            frequency.len()
        );

        let mut writer = TableWriter::from_path(&self.output)?;
        writer.write_counts([self.column.as_str(), "count"], frequency.sorted())?;
        writer.finish()?;
        println!(
            "{} distinct values of '{}' written to {}",
            frequency.len(),
            self.column,
            self.output.display()
        );
        Ok(())
    }
}
