use std::io::{
    Read,
    Write,
};
use std::path::Path;

#[cfg(not(feature = "compression"))]
use anyhow::bail;

/// Compression of an input or output file, picked from its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Gz,
}

impl Compression {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gz,
            _ => Compression::None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Compression::None => "none",
            Compression::Gz => "gzip",
        }
    }

    pub fn get_decoder<R: Read + 'static>(
        &self,
        handle: R,
    ) -> anyhow::Result<Box<dyn Read>> {
        match self {
            Compression::None => Ok(Box::new(handle)),
            #[cfg(feature = "compression")]
            Compression::Gz => Ok(Box::new(flate2::read::MultiGzDecoder::new(handle))),
            #[cfg(not(feature = "compression"))]
            Compression::Gz => {
                bail!("reading gzip input requires the `compression` feature")
            },
        }
    }

    pub fn get_encoder<W: Write>(
        &self,
        handle: W,
        compression_level: u32,
    ) -> anyhow::Result<Encoder<W>> {
        match self {
            Compression::None => Ok(Encoder::Plain(handle)),
            #[cfg(feature = "compression")]
            Compression::Gz => {
                Ok(Encoder::Gz(flate2::write::GzEncoder::new(
                    handle,
                    flate2::Compression::new(compression_level),
                )))
            },
            #[cfg(not(feature = "compression"))]
            Compression::Gz => {
                let _ = compression_level;
                bail!("writing gzip output requires the `compression` feature")
            },
        }
    }
}

/// Output sink that may compress. Call [`Encoder::finish`] to write the
/// gzip trailer and see its errors; dropping only finishes on a best-effort
/// basis.
pub enum Encoder<W: Write> {
    Plain(W),
    #[cfg(feature = "compression")]
    Gz(flate2::write::GzEncoder<W>),
}

impl<W: Write> Encoder<W> {
    /// Completes the stream, flushes the underlying handle and returns it.
    pub fn finish(self) -> std::io::Result<W> {
        let mut handle = match self {
            Encoder::Plain(handle) => handle,
            #[cfg(feature = "compression")]
            Encoder::Gz(encoder) => encoder.finish()?,
        };
        handle.flush()?;
        Ok(handle)
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> std::io::Result<usize> {
        match self {
            Encoder::Plain(handle) => handle.write(buf),
            #[cfg(feature = "compression")]
            Encoder::Gz(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Encoder::Plain(handle) => handle.flush(),
            #[cfg(feature = "compression")]
            Encoder::Gz(encoder) => encoder.flush(),
        }
    }
}
