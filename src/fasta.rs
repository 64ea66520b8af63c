use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{Error, Result};
use crate::types::SequenceRecord;

/// Residues per line when writing sequences.
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// Opens `path` for line reading, transparently decompressing `.gz` files.
pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| Error::io(path, e))?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Parses every record from a FASTA stream.
///
/// Text before the first header and blank lines are ignored. Sequence lines
/// are concatenated with all whitespace removed; they are not validated.
pub fn parse_fasta<R: BufRead>(mut reader: R) -> io::Result<Vec<SequenceRecord>> {
    let mut records = Vec::new();
    let mut current: Option<SequenceRecord> = None;
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let trimmed = line.trim();
        if let Some(header) = trimmed.strip_prefix('>') {
            if let Some(done) = current.take() {
                records.push(done);
            }
            current = Some(SequenceRecord::new(header, String::new()));
        } else if let Some(rec) = current.as_mut() {
            rec.seq.extend(trimmed.split_whitespace());
        }
    }
    if let Some(done) = current {
        records.push(done);
    }

    Ok(records)
}

/// Reads all records of the FASTA file at `path`.
pub fn read_fasta_records<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let records = parse_fasta(reader).map_err(|e| Error::io(path, e))?;
    log::debug!("Read {} FASTA records from {}", records.len(), path.display());
    Ok(records)
}

/// Calls `f` with the identifier of every header line, skipping sequence data.
///
/// The identifier is the whole header with the `>` and surrounding
/// whitespace removed. Returns the number of headers seen.
pub fn for_each_header<R, F>(mut reader: R, mut f: F) -> io::Result<usize>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut headers = 0;
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if let Some(header) = line.trim().strip_prefix('>') {
            f(header.trim());
            headers += 1;
        }
    }
    Ok(headers)
}

/// Writes records in FASTA format, wrapping sequence lines.
pub struct FastaWriter<W: Write> {
    inner: W,
    line_width: usize,
}

impl<W: Write> FastaWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    /// Sets the wrap width; `0` writes each sequence on a single line.
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn write_record(&mut self, record: &SequenceRecord) -> io::Result<()> {
        writeln!(self.inner, ">{}", record.description)?;
        let seq = record.seq.as_str();
        if seq.is_empty() {
            return Ok(());
        }
        if self.line_width == 0 {
            return writeln!(self.inner, "{seq}");
        }
        // Cut on char boundaries so multi-byte residues stay intact.
        let mut start = 0;
        for (n, (idx, _)) in seq.char_indices().enumerate() {
            if n > 0 && n % self.line_width == 0 {
                writeln!(self.inner, "{}", &seq[start..idx])?;
                start = idx;
            }
        }
        writeln!(self.inner, "{}", &seq[start..])
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Creates (or truncates) `path` and writes `records` to it.
pub fn write_fasta_records<P: AsRef<Path>>(
    path: P,
    records: &[SequenceRecord],
    line_width: usize,
) -> Result<()> {
    let path = path.as_ref();
    let write_all = || -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = FastaWriter::new(BufWriter::new(file)).with_line_width(line_width);
        for record in records {
            writer.write_record(record)?;
        }
        writer.finish()?;
        Ok(())
    };
    write_all().map_err(|e| Error::io(path, e))
}
