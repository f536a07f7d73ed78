//! Tab-separated record reader and writer.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use crate::error::SndResult;
use crate::types::Record;

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Streaming reader yielding one [`Record`] per input line.
///
/// Fields are split on tabs only: no quoting, no comment handling and no fixed field count, so
/// every field reaches the caller exactly as written. Lines end at `\n`; one trailing `\r` is
/// dropped so CRLF input reads the same. A blank line yields a record with a single empty field,
/// keeping output in step with input line for line.
pub struct SndReader<R: Read> {
    inner: csv::Reader<TailTracker<R>>,
    buf: csv::StringRecord,
    pending: VecDeque<Record>,
    lines_done: u64,
    done: bool,
}

impl<R: Read> SndReader<R> {
    /// Wrap any byte source.
    pub fn from_reader(rdr: R) -> Self {
        let inner = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .terminator(csv::Terminator::Any(b'\n'))
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(None)
            .from_reader(TailTracker::new(rdr));
        Self {
            inner,
            buf: csv::StringRecord::new(),
            pending: VecDeque::new(),
            lines_done: 0,
            done: false,
        }
    }

    /// Read the next record, or `None` at end of input.
    pub fn read_record(&mut self) -> SndResult<Option<Record>> {
        if self.pending.is_empty() && !self.done {
            self.fill()?;
        }
        Ok(self.pending.pop_front())
    }

    // csv skips empty lines; its `\n` count tells how many were passed over.
    fn fill(&mut self) -> SndResult<()> {
        let got = self.inner.read_record(&mut self.buf)?;
        let pos = self.inner.position();
        let newlines = pos.line().saturating_sub(1);

        let line = if got {
            let src = self.inner.get_ref();
            let unterminated = src.eof && pos.byte() == src.bytes && src.last != Some(b'\n');
            if unterminated { newlines + 1 } else { newlines }
        } else {
            self.done = true;
            newlines + 1
        };

        while self.lines_done + 1 < line {
            self.lines_done += 1;
            self.pending
                .push_back(Record::new(vec![String::new()]).with_line(self.lines_done));
        }

        if got {
            let mut fields: Vec<String> = self.buf.iter().map(str::to_owned).collect();
            if let Some(last) = fields.last_mut() {
                if last.ends_with('\r') {
                    last.pop();
                }
            }
            self.lines_done = line;
            self.pending.push_back(Record::new(fields).with_line(line));
        }
        Ok(())
    }
}

impl<R: Read> Iterator for SndReader<R> {
    type Item = SndResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Byte source wrapper remembering how much was read and the last byte seen.
///
/// Distinguishes a final line without `\n` from a terminated one, which the csv line count
/// alone cannot.
struct TailTracker<R> {
    inner: R,
    bytes: u64,
    last: Option<u8>,
    eof: bool,
}

impl<R> TailTracker<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            bytes: 0,
            last: None,
            eof: false,
        }
    }
}

impl<R: Read> Read for TailTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.bytes += n as u64;
            self.last = Some(buf[n - 1]);
        } else if !buf.is_empty() {
            self.eof = true;
        }
        Ok(n)
    }
}

/// Open `path` for reading; [`STDIN_PATH`] reads standard input.
pub fn open_path(path: impl AsRef<Path>) -> SndResult<SndReader<Box<dyn Read>>> {
    let path = path.as_ref();
    let input: Box<dyn Read> = if path == Path::new(STDIN_PATH) {
        Box::new(io::stdin())
    } else {
        Box::new(File::open(path)?)
    };
    Ok(SndReader::from_reader(input))
}

/// Buffered writer emitting tab-joined records terminated by `\n`.
pub struct SndWriter<W: Write> {
    inner: BufWriter<W>,
}

impl<W: Write> SndWriter<W> {
    /// Wrap any byte sink.
    pub fn new(out: W) -> Self {
        Self {
            inner: BufWriter::new(out),
        }
    }

    /// Write one record.
    pub fn write_record(&mut self, record: &Record) -> SndResult<()> {
        let mut first = true;
        for field in &record.fields {
            if !first {
                self.inner.write_all(b"\t")?;
            }
            self.inner.write_all(field.as_bytes())?;
            first = false;
        }
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> SndResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(self) -> SndResult<W> {
        self.inner.into_inner().map_err(|e| e.into_error().into())
    }
}
