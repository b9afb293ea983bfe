use std::path::{
    Path,
    PathBuf,
};

use anyhow::anyhow;
use clap::ValueEnum;

/// Environment variable naming the QTLdb directory.
pub const QTLDB_ENV: &str = "QGAT_QTLDB_DIR";

/// Species with bundled QTLdb releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Species {
    Cattle,
    Chicken,
    Goat,
    Sheep,
    Horse,
    Pig,
}

impl Species {
    /// QTLdb file name without extension.
    pub fn release(&self) -> &'static str {
        match self {
            Species::Cattle => "QTLdb_cattleARS_UCD1",
            Species::Chicken => "QTLdb_chickenGG4",
            Species::Goat => "QTLdb_goatCHIR_1",
            Species::Sheep => "QTLdb_sheepOAR3",
            Species::Horse => "QTLdb_horseEC2",
            Species::Pig => "QTLdb_pigMARC1",
        }
    }

    pub fn bed_file(&self) -> String {
        format!("{}.bed", self.release())
    }

    pub fn gff_file(&self) -> String {
        format!("{}.gff", self.release())
    }

    /// Reference path inside `qtldb`. The reader falls back to `<path>.gz`.
    pub fn reference_path(
        &self,
        qtldb: &Path,
        trait_level: bool,
    ) -> PathBuf {
        if trait_level {
            qtldb.join(self.gff_file())
        }
        else {
            qtldb.join(self.bed_file())
        }
    }
}

/// QTLdb directory from the command line or the environment.
pub fn qtldb_dir(arg: Option<&Path>) -> anyhow::Result<PathBuf> {
    arg.map(Path::to_path_buf)
        .or_else(|| std::env::var_os(QTLDB_ENV).map(PathBuf::from))
        .ok_or_else(|| {
            anyhow!("QTLdb directory is not set: pass --qtldb or set {QTLDB_ENV}")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_path() {
        let dir = Path::new("/data/qtldb");
        assert_eq!(
            Species::Cattle.reference_path(dir, false),
            dir.join("QTLdb_cattleARS_UCD1.bed")
        );
        assert_eq!(
            Species::Pig.reference_path(dir, true),
            dir.join("QTLdb_pigMARC1.gff")
        );
    }

    #[test]
    fn test_qtldb_dir_argument_wins() {
        let dir = qtldb_dir(Some(Path::new("/explicit"))).unwrap();
        assert_eq!(dir, PathBuf::from("/explicit"));
    }
}
