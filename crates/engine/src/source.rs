//! Line sources: where the scan gets its bytes from.
//!
//! A [`LineSource`] opens one input at a time; the reader it returns is
//! dropped (and the underlying handle closed) before the next one is opened.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

const READ_BUFFER_SIZE: usize = 64 * 1024;

pub trait LineSource {
    type Reader: BufRead;

    fn open(&self, path: &Path) -> io::Result<Self::Reader>;
}

/// Reads from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl LineSource for FileSource {
    type Reader = BufReader<File>;

    fn open(&self, path: &Path) -> io::Result<Self::Reader> {
        let file = File::open(path)?;
        Ok(BufReader::with_capacity(READ_BUFFER_SIZE, file))
    }
}

/// In-memory inputs keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl LineSource for MemorySource {
    type Reader = Cursor<Vec<u8>>;

    fn open(&self, path: &Path) -> io::Result<Self::Reader> {
        self.files
            .get(path)
            .cloned()
            .map(Cursor::new)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such input: {}", path.display()),
                )
            })
    }
}

/// Newline-delimited reader that reuses a single line buffer.
///
/// Lines are split on `\n` only; a `\r` before it is kept. A final line
/// without a terminator is still produced.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        Ok(Some(&self.buf))
    }
}
