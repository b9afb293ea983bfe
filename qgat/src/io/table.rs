use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::Path;

use anyhow::Context;
use itertools::Itertools;

use crate::data_structs::typedef::OutputRow;
use crate::io::compression::{
    Compression,
    Encoder,
};
use crate::io::reader::open_reader;

const GZ_LEVEL: u32 = 6;

/// Columns of `rows` in first-seen order.
pub fn column_union<'a, I>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a OutputRow>, {
    rows.into_iter()
        .flat_map(|row| row.keys())
        .unique()
        .cloned()
        .collect()
}

/// Tab-separated writer of assembled rows. Rows may have different key
/// sets; the header is the union of all columns and missing cells are
/// written empty.
pub struct TableWriter<W: Write> {
    inner: csv::Writer<Encoder<W>>,
}

impl TableWriter<BufWriter<File>> {
    /// Creates the file at `path`; a `.gz` extension compresses the output.
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        let sink = Compression::from_path(path)
            .get_encoder(BufWriter::new(file), GZ_LEVEL)?;
        Ok(Self::from_encoder(sink))
    }
}

impl<W: Write> TableWriter<W> {
    /// Uncompressed writer over `sink`.
    pub fn new(sink: W) -> Self {
        Self::from_encoder(Encoder::Plain(sink))
    }

    pub fn from_encoder(sink: Encoder<W>) -> Self {
        let inner = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(sink);
        Self { inner }
    }

    /// Writes the header and every row. Nothing is written for an empty
    /// row set.
    pub fn write_rows(
        &mut self,
        rows: &[OutputRow],
    ) -> anyhow::Result<()> {
        let columns = column_union(rows);
        if columns.is_empty() {
            return Ok(());
        }
        self.inner.write_record(&columns)?;
        for row in rows {
            self.inner.write_record(
                columns
                    .iter()
                    .map(|c| row.get(c).map(String::as_str).unwrap_or("")),
            )?;
        }
        Ok(())
    }

    /// Writes a two-column `name<TAB>count` table.
    pub fn write_counts<'a, I>(
        &mut self,
        header: [&str; 2],
        counts: I,
    ) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = (&'a str, usize)>, {
        self.inner.write_record(header)?;
        for (name, count) in counts {
            self.inner.write_record([name, count.to_string().as_str()])?;
        }
        Ok(())
    }

    /// Flushes every buffered row and completes compression. Returns the
    /// underlying handle.
    pub fn finish(self) -> anyhow::Result<W> {
        let encoder = self.inner.into_inner().map_err(|e| e.into_error())?;
        Ok(encoder.finish()?)
    }
}

/// Reads a table written by [`TableWriter`] (or any headed TSV) back into
/// rows, skipping empty cells.
pub fn read_table<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<OutputRow>> {
    let (path, handle) = open_reader(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(handle);
    let header = reader
        .headers()
        .with_context(|| format!("cannot read header of {}", path.display()))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("malformed row in {}", path.display()))?;
        rows.push(
            header
                .iter()
                .zip(record.iter())
                .filter(|(_, value)| !value.is_empty())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        );
    }
    Ok(rows)
}
