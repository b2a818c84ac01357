use flate2::read;
use flate2::write;
use flate2::Compression;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const BUFFER_SIZE: usize = 128 * 1024;

fn is_gz(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

/// A buffered output file, gzip compressed or not.
///
/// Call [`Writer::finish`] when done; dropping a gzip writer writes the
/// trailer but throws away any error doing so.
pub enum Writer {
    Plain(BufWriter<File>),
    Gz(BufWriter<write::GzEncoder<File>>),
}

impl Writer {
    /// Flush the buffer and, for gzip, write the trailer.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Writer::Plain(mut w) => w.flush(),
            Writer::Gz(w) => {
                w.into_inner()
                    .map_err(|e| e.into_error())?
                    .finish()?
                    .flush()
            }
        }
    }
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Writer::Plain(w) => w.write(buf),
            Writer::Gz(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Writer::Plain(w) => w.flush(),
            Writer::Gz(w) => w.flush(),
        }
    }
}

/// Write normal or compressed files seamlessly
/// Uses the presence of a `.gz` extension to decide.
/// The file is created, or truncated if it exists.
pub fn writer(path: &Path) -> io::Result<Writer> {
    let file = File::create(path)?;
    if is_gz(path) {
        Ok(Writer::Gz(BufWriter::with_capacity(
            BUFFER_SIZE,
            write::GzEncoder::new(file, Compression::default()),
        )))
    } else {
        Ok(Writer::Plain(BufWriter::with_capacity(BUFFER_SIZE, file)))
    }
}

/// Read normal or compressed files seamlessly
/// Uses the presence of a `.gz` extension to decide
pub fn reader(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if is_gz(path) {
        Ok(Box::new(BufReader::with_capacity(
            BUFFER_SIZE,
            read::MultiGzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
}
