use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Stdout, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<Box<dyn BufRead>> {
    if file_path_str == "-" {
        Ok(Box::new(BufReader::new(std::io::stdin())))
    } else {
        Ok(Box::new(get_dynamic_reader(Path::new(file_path_str))?))
    }
}

///
/// Output stream returned by [get_dynamic_writer].
///
/// Gzip output is only complete once [FinishWrite::finish_write] has written the trailer.
///
pub enum DynamicWriter {
    Stdout(BufWriter<Stdout>),
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Write for DynamicWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            DynamicWriter::Stdout(w) => w.write(buf),
            DynamicWriter::Plain(w) => w.write(buf),
            DynamicWriter::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            DynamicWriter::Stdout(w) => w.flush(),
            DynamicWriter::Plain(w) => w.flush(),
            DynamicWriter::Gzip(w) => w.flush(),
        }
    }
}

///
/// Writers with an end-of-stream step that can fail, beyond a plain flush.
///
pub trait FinishWrite: Write {
    fn finish_write(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl FinishWrite for DynamicWriter {
    fn finish_write(&mut self) -> io::Result<()> {
        match self {
            DynamicWriter::Gzip(encoder) => {
                encoder.try_finish()?;
                encoder.get_mut().flush()
            }
            DynamicWriter::Stdout(w) => w.flush(),
            DynamicWriter::Plain(w) => w.flush(),
        }
    }
}

impl FinishWrite for Vec<u8> {}

impl FinishWrite for io::Sink {}

///
/// Get a buffered writer for a plain file, a gzip'd file (`.gz`), or stdout (`-`).
///
/// Parent directories are created as needed.
///
pub fn get_dynamic_writer(file_path_str: &str) -> Result<DynamicWriter> {
    if file_path_str == "-" {
        return Ok(DynamicWriter::Stdout(BufWriter::new(io::stdout())));
    }

    let path = Path::new(file_path_str);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    let writer = match path.extension() == Some(OsStr::new("gz")) {
        true => DynamicWriter::Gzip(GzEncoder::new(BufWriter::new(file), Compression::default())),
        false => DynamicWriter::Plain(BufWriter::new(file)),
    };

    Ok(writer)
}
