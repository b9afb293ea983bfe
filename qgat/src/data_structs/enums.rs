use std::convert::Infallible;
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Default)]
pub enum Strand {
    /// Forward strand.
    Forward,
    /// Reverse strand.
    Reverse,
    /// No strand.
    #[default]
    None,
}

impl FromStr for Strand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Ok(Strand::None),
        }
    }
}

impl From<Strand> for char {
    fn from(value: Strand) -> Self {
        match value {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::None => '.',
        }
    }
}

impl Display for Strand {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Serialize for Strand {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Strand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        std::str::FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Coordinate convention of a source format.
///
/// Internally every interval is closed and 1-based, so the shift from
/// [`CoordConvention::ZeroBasedHalfOpen`] is applied once, at parse time.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub enum CoordConvention {
    /// BED convention: `[start, end)` counted from zero.
    ZeroBasedHalfOpen,
    /// GFF/GTF convention: `[start, end]` counted from one.
    #[default]
    OneBasedClosed,
}

impl CoordConvention {
    /// Offset added to the source start coordinate on ingestion.
    pub fn start_shift(&self) -> u64 {
        match self {
            CoordConvention::ZeroBasedHalfOpen => 1,
            CoordConvention::OneBasedClosed => 0,
        }
    }
}

/// Attribute-column conventions of GTF files.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "console", derive(clap::ValueEnum))]
pub enum GtfDialect {
    /// `key "value";` pairs, strictly quoted.
    #[default]
    Ensembl,
    /// NCBI flavour: `key "value";` or `key=value;`, tolerant to stray
    /// quotes inside values.
    Ncbi,
}

impl Display for GtfDialect {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            GtfDialect::Ensembl => write!(f, "Ensembl"),
            GtfDialect::Ncbi => write!(f, "NCBI"),
        }
    }
}

/// Column delimiter of plain region files.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "console", derive(clap::ValueEnum))]
pub enum Delimiter {
    #[default]
    Tab,
    Comma,
    /// Any run of spaces or tabs.
    Whitespace,
}

impl Delimiter {
    /// Picks the delimiter conventionally used by a file extension:
    /// `.csv` is comma separated, `.tsv` tab separated, anything else is
    /// split on whitespace.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let stem_path = match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => path.with_extension(""),
            _ => path.to_path_buf(),
        };
        match stem_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Delimiter::Comma,
            Some("tsv") => Delimiter::Tab,
            _ => Delimiter::Whitespace,
        }
    }

    pub fn split<'a>(
        &self,
        line: &'a str,
    ) -> Vec<&'a str> {
        match self {
            Delimiter::Tab => line.split('\t').collect(),
            Delimiter::Comma => line.split(',').collect(),
            Delimiter::Whitespace => line.split_whitespace().collect(),
        }
    }
}

/// Which reference path the overlap run follows. Selects the output
/// columns of the result assembler.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub enum OverlapMode {
    /// QTLdb BED references, minimal QTL identity.
    #[default]
    Qtl,
    /// QTLdb GFF references, all trait metadata.
    Trait,
    /// GTF gene references.
    Annotation,
}

impl Display for OverlapMode {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            OverlapMode::Qtl => write!(f, "qtl"),
            OverlapMode::Trait => write!(f, "trait"),
            OverlapMode::Annotation => write!(f, "annotation"),
        }
    }
}

/// What the assembler emits for a region without matches.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub enum NoMatchPolicy {
    /// Emit nothing.
    #[default]
    Skip,
    /// Emit a single row with the region columns and a `no overlap` note.
    Report,
}

/// Format of a reference annotation file.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum ReferenceFormat {
    Bed,
    Gff,
    Gtf(GtfDialect),
}

impl ReferenceFormat {
    /// Overlap mode naturally paired with this reference format.
    pub fn mode(&self) -> OverlapMode {
        match self {
            ReferenceFormat::Bed => OverlapMode::Qtl,
            ReferenceFormat::Gff => OverlapMode::Trait,
            ReferenceFormat::Gtf(_) => OverlapMode::Annotation,
        }
    }
}

impl Display for ReferenceFormat {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ReferenceFormat::Bed => write!(f, "BED"),
            ReferenceFormat::Gff => write!(f, "GFF"),
            ReferenceFormat::Gtf(dialect) => write!(f, "GTF ({dialect})"),
        }
    }
}
