use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
};
use std::path::{
    Path,
    PathBuf,
};

use hashbrown::HashMap;
use itertools::Itertools;
use log::{
    debug,
    info,
    warn,
};
use serde::Serialize;

use crate::data_structs::annotation::Feature;
use crate::data_structs::coords::ChromosomeIndex;
use crate::data_structs::{
    CoordConvention,
    Delimiter,
    QueryRegion,
    ReferenceFormat,
};
use crate::error::{
    FailureClass,
    FatalError,
    ParseFailure,
};
use crate::io::compression::Compression;
use crate::io::records::{
    FeatureParser,
    GtfParser,
    RecordParser,
    RegionParser,
};
use crate::utils::decode_line;
use crate::with_field_fn;

/// Outcome of reading one file: how many lines became records, how many
/// were skipped and every rejected line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub source:    Option<PathBuf>,
    pub n_lines:   usize,
    pub n_records: usize,
    pub n_skipped: usize,
    pub failures:  Vec<ParseFailure>,
}

impl ParseReport {
    pub fn n_failures(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn count_by_class(&self) -> HashMap<FailureClass, usize> {
        self.failures
            .iter()
            .map(|f| f.error.class())
            .counts()
            .into_iter()
            .collect()
    }

    fn source_name(&self) -> String {
        self.source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<stream>".to_string())
    }
}

/// Reading options shared by reference and region files.
#[derive(Debug, Clone, Default)]
pub struct ParseConfig {
    /// Abort a file once it has more malformed lines than this.
    pub max_failures:     Option<usize>,
    /// Region file delimiter. Picked from the extension when unset.
    pub delimiter:        Option<Delimiter>,
    pub input_convention: CoordConvention,
    /// GTF feature types to index. Empty means `gene`.
    pub feature_types:    Vec<String>,
}

impl ParseConfig {
    with_field_fn!(max_failures, Option<usize>);

    with_field_fn!(delimiter, Option<Delimiter>);

    with_field_fn!(input_convention, CoordConvention);

    with_field_fn!(feature_types, Vec<String>);
}

/// Line reader driving a [`RecordParser`] and accounting for failures.
///
/// Malformed lines are recorded in the [`ParseReport`] and skipped. When a
/// failure threshold is set and exceeded, reading stops with
/// [`FatalError::TooManyFailures`].
pub struct RecordReader<R: BufRead, P: RecordParser> {
    reader:       R,
    parser:       P,
    max_failures: Option<usize>,
    buf:          Vec<u8>,
    report:       ParseReport,
    failed:       bool,
}

impl<R: BufRead, P: RecordParser> RecordReader<R, P> {
    pub fn new(
        reader: R,
        parser: P,
    ) -> Self {
        Self {
            reader,
            parser,
            max_failures: None,
            buf: Vec::new(),
            report: ParseReport::default(),
            failed: false,
        }
    }

    /// Path reported in failures.
    pub fn with_source<S: Into<PathBuf>>(
        mut self,
        source: S,
    ) -> Self {
        self.report.source = Some(source.into());
        self
    }

    with_field_fn!(max_failures, Option<usize>);

    pub fn report(&self) -> &ParseReport {
        &self.report
    }

    fn read_record(&mut self) -> anyhow::Result<Option<P::Record>> {
        loop {
            self.buf.clear();
            let n_read = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .map_err(|source| {
                    FatalError::Io {
                        path: self.report.source.clone().unwrap_or_default(),
                        source,
                    }
                })?;
            if n_read == 0 {
                return Ok(None);
            }
            self.report.n_lines += 1;
            let line_no = self.report.n_lines;
            let line = decode_line(&self.buf);

            match self.parser.parse_line(&line, line_no) {
                Ok(Some(record)) => {
                    self.report.n_records += 1;
                    return Ok(Some(record));
                },
                Ok(None) => self.report.n_skipped += 1,
                Err(error) => {
                    let failure = ParseFailure {
                        path: self.report.source.clone(),
                        line: line_no,
                        error,
                    };
                    debug!("{failure}");
                    self.report.failures.push(failure);

                    if let Some(threshold) = self.max_failures {
                        if self.report.n_failures() > threshold {
                            return Err(FatalError::TooManyFailures {
                                source_name: self.report.source_name(),
                                count: self.report.n_failures(),
                                threshold,
                            }
                            .into());
                        }
                    }
                },
            }
        }
    }

    /// Reads every remaining record.
    pub fn read_all(mut self) -> anyhow::Result<(Vec<P::Record>, ParseReport)> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record()? {
            records.push(record);
        }
        if !self.report.is_clean() {
            warn!(
                "{}: skipped {} malformed lines out of {}",
                self.report.source_name(),
                self.report.n_failures(),
                self.report.n_lines
            );
        }
        Ok((records, self.report))
    }
}

impl<R: BufRead, P: RecordParser> Iterator for RecordReader<R, P> {
    type Item = anyhow::Result<P::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            },
        }
    }
}

/// Finds the file to read: `path` itself or, failing that, `path.gz`.
pub fn resolve_path<P: AsRef<Path>>(path: P) -> Result<PathBuf, FatalError> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    let mut gz_path = path.as_os_str().to_owned();
    gz_path.push(".gz");
    let gz_path = PathBuf::from(gz_path);
    if gz_path.is_file() {
        info!("{} not found, reading {}", path.display(), gz_path.display());
        return Ok(gz_path);
    }
    Err(FatalError::NotFound {
        path: path.to_path_buf(),
        gz_path,
    })
}

/// Opens a (possibly gzip-compressed) text file for line reading. Returns
/// the path actually opened.
pub fn open_reader<P: AsRef<Path>>(
    path: P
) -> anyhow::Result<(PathBuf, Box<dyn BufRead>)> {
    let path = resolve_path(path)?;
    let file = File::open(&path).map_err(|source| {
        FatalError::Io {
            path: path.clone(),
            source,
        }
    })?;
    let compression = Compression::from_path(&path);
    debug!("Opening {} (compression: {})", path.display(), compression.name());
    let decoder = compression.get_decoder(file)?;
    Ok((path, Box::new(BufReader::new(decoder))))
}

/// Reads reference features. GTF features come back stable-sorted by
/// chromosome and start.
pub fn read_features<P: AsRef<Path>>(
    path: P,
    format: ReferenceFormat,
    config: &ParseConfig,
) -> anyhow::Result<(Vec<Feature>, ParseReport)> {
    let (path, handle) = open_reader(path)?;
    let parser = match format {
        ReferenceFormat::Gtf(dialect) => {
            FeatureParser::Gtf(
                GtfParser::new(dialect)
                    .with_feature_types(config.feature_types.iter().cloned()),
            )
        },
        other => FeatureParser::new(other),
    };

    let (mut features, report) = RecordReader::new(handle, parser)
        .with_source(path.clone())
        .with_max_failures(config.max_failures)
        .read_all()?;
    if matches!(format, ReferenceFormat::Gtf(_)) {
        features.sort_by(|a, b| {
            (a.chromosome(), a.start()).cmp(&(b.chromosome(), b.start()))
        });
    }
    info!(
        "Read {} {} features from {}",
        features.len(),
        format,
        path.display()
    );
    Ok((features, report))
}

/// Reads a reference file straight into a [`ChromosomeIndex`].
pub fn read_reference<P: AsRef<Path>>(
    path: P,
    format: ReferenceFormat,
    config: &ParseConfig,
) -> anyhow::Result<(ChromosomeIndex, ParseReport)> {
    let (features, report) = read_features(path, format, config)?;
    Ok((ChromosomeIndex::build(features), report))
}

/// Reads user regions. The delimiter is taken from `config` or, when unset,
/// from the file extension.
pub fn read_regions<P: AsRef<Path>>(
    path: P,
    config: &ParseConfig,
) -> anyhow::Result<(Vec<QueryRegion>, ParseReport)> {
    let (path, handle) = open_reader(path)?;
    let delimiter = config
        .delimiter
        .unwrap_or_else(|| Delimiter::from_path(&path));
    let parser = RegionParser::new(delimiter, config.input_convention);

    let (regions, report) = RecordReader::new(handle, parser)
        .with_source(path.clone())
        .with_max_failures(config.max_failures)
        .read_all()?;
    info!("Read {} regions from {}", regions.len(), path.display());
    Ok((regions, report))
}
