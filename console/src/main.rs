mod annotate;
mod freq;
mod qtl;
mod species;
mod strings;
mod utils;

use annotate::AnnotateArgs;
use clap::{
    Parser,
    Subcommand,
};
use freq::FreqArgs;
use qtl::QtlArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Find QTLs overlapping the input regions.
    Qtl {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  QtlArgs,
    },

    /// Annotate the input regions with overlapping genes from a GTF file.
    Annotate {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  AnnotateArgs,
    },

    /// Count trait occurrences in a trait-level QTL table.
    Freq {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  FreqArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Qtl { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Annotate { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Freq { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}
