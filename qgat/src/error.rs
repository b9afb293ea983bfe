//! Error taxonomy of the overlap engine.
//!
//! Line-scoped problems ([`RecordError`]) never abort a run on their own:
//! they are wrapped into a [`ParseFailure`] carrying the file and line, and
//! accumulated into a [`ParseReport`](crate::io::ParseReport). Only
//! [`FatalError`]s stop a run; they travel inside `anyhow::Error` and can be
//! recovered with `downcast_ref`.

use std::fmt;
use std::path::PathBuf;

use itertools::Itertools;
use serde::Serialize;

use crate::data_structs::typedef::PosType;

/// Broad class of a line-scoped failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureClass {
    /// The line does not follow its declared format.
    Format,
    /// The line parsed, but `start >= end`.
    Invariant,
}

impl fmt::Display for FailureClass {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            FailureClass::Format => write!(f, "FormatError"),
            FailureClass::Invariant => write!(f, "InvariantError"),
        }
    }
}

/// Why a single record line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum RecordError {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("{field} is not a non-negative integer: '{value}'")]
    InvalidCoordinate { field: &'static str, value: String },
    #[error("invalid attribute syntax: '{piece}'")]
    InvalidAttribute { piece: String },
    #[error("missing attribute {key}")]
    MissingAttribute { key: &'static str },
    #[error("start ({start}) must be less than end ({end})")]
    InvertedInterval { start: PosType, end: PosType },
}

impl RecordError {
    pub fn class(&self) -> FailureClass {
        match self {
            RecordError::InvertedInterval { .. } => FailureClass::Invariant,
            _ => FailureClass::Format,
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            RecordError::ColumnCount { .. } => "columns",
            RecordError::InvalidCoordinate { field, .. } => *field,
            RecordError::InvalidAttribute { .. } => "attributes",
            RecordError::MissingAttribute { key } => *key,
            RecordError::InvertedInterval { .. } => "start/end",
        }
    }
}

/// A rejected line with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub path:  Option<PathBuf>,
    pub line:  usize,
    pub error: RecordError,
}

impl fmt::Display for ParseFailure {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let path = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<stream>".to_string());
        write!(
            f,
            "{}:{}: {} in {}: {}",
            path,
            self.line,
            self.error.class(),
            self.error.field(),
            self.error
        )
    }
}

fn join_names(names: &[String]) -> String { names.iter().join(", ") }

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("neither {} nor {} found", .path.display(), .gz_path.display())]
    NotFound { path: PathBuf, gz_path: PathBuf },
    #[error("{source_name} has {count} malformed lines, more than the allowed {threshold}")]
    TooManyFailures {
        source_name: String,
        count:       usize,
        threshold:   usize,
    },
    #[error(
        "no input chromosome is present in the reference.\n  input chromosomes: {}\n  reference chromosomes: {}\n  \
         Possible cause: input uses plain numbers (1,2,3) while the reference uses other names (e.g. NC_037328.1 or Chr.1).",
        join_names(.input),
        join_names(.reference)
    )]
    NoSharedChromosome {
        input:     Vec<String>,
        reference: Vec<String>,
    },
}
