//! Line-based text search in local files.

use crate::error::{Error, Result};
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Bytes read per step when scanning a file from the end.
const REVERSE_CHUNK: usize = 64 * 1024;

/// Options for [`text_file_search_all`] and [`text_file_search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Treat the pattern as a regular expression instead of literal text.
    pub use_regex: bool,
    /// Scan from the first line to the last. Default scans from the end, which
    /// finds the most recent entry of an appended log first.
    pub front_to_back: bool,
    /// Stop after this many matches (0 = no limit).
    pub max_matches: usize,
}

enum Matcher<'a> {
    Literal(&'a str),
    Pattern(Regex),
}

impl Matcher<'_> {
    fn find(&self, line: &str) -> Option<String> {
        match self {
            Matcher::Literal(s) => line.contains(*s).then(|| s.to_string()),
            Matcher::Pattern(re) => re.find(line).map(|m| m.as_str().to_string()),
        }
    }
}

/// Searches the UTF-8 text file at `path` line by line.
///
/// Literal mode yields `pattern` once per matching line; regex mode yields the
/// first match in each matching line. Lines are scanned back-to-front unless
/// `front_to_back` is set; either way memory use is bounded by the longest
/// line, not the file size. An empty pattern matches nothing.
pub fn text_file_search_all(
    path: impl AsRef<Path>,
    pattern: &str,
    options: &SearchOptions,
) -> Result<Vec<String>> {
    let path = path.as_ref();
    if pattern.is_empty() {
        return Ok(Vec::new());
    }
    let matcher = if options.use_regex {
        Matcher::Pattern(Regex::new(pattern)?)
    } else {
        Matcher::Literal(pattern)
    };
    let limit = match options.max_matches {
        0 => usize::MAX,
        n => n,
    };

    let file = File::open(path).map_err(|e| Error::from_io(path, e))?;
    let lines: Box<dyn Iterator<Item = io::Result<String>>> = if options.front_to_back {
        Box::new(BufReader::new(file).lines())
    } else {
        Box::new(ReverseLines::new(file, REVERSE_CHUNK).map_err(|e| Error::from_io(path, e))?)
    };

    let mut found = Vec::new();
    for line in lines {
        let line = line.map_err(|e| Error::from_io(path, e))?;
        if let Some(m) = matcher.find(&line) {
            found.push(m);
            if found.len() >= limit {
                break;
            }
        }
    }

    tracing::trace!("{}: {} match(es) for {:?}", path.display(), found.len(), pattern);
    Ok(found)
}

/// First match according to `options` (`max_matches` is ignored).
pub fn text_file_search(
    path: impl AsRef<Path>,
    pattern: &str,
    options: &SearchOptions,
) -> Result<Option<String>> {
    let options = SearchOptions {
        max_matches: 1,
        ..*options
    };
    Ok(text_file_search_all(path, pattern, &options)?.into_iter().next())
}

/// Lines of a file from last to first, read in fixed-size chunks from the end.
///
/// Line endings match [`BufRead::lines`]: `\n` or `\r\n` is stripped and a
/// final newline does not produce a trailing empty line.
struct ReverseLines {
    file: File,
    /// Offset of the first byte of `pending` in the file.
    pos: u64,
    /// Bytes read but not yet yielded; may start mid-line.
    pending: Vec<u8>,
    chunk: usize,
    non_empty: bool,
    started: bool,
    done: bool,
}

impl ReverseLines {
    fn new(file: File, chunk: usize) -> io::Result<Self> {
        let len = file.metadata()?.len();
        Ok(Self {
            file,
            pos: len,
            pending: Vec::new(),
            chunk: chunk.max(1),
            non_empty: len > 0,
            started: false,
            done: false,
        })
    }

    /// Prepends the previous chunk of the file to `pending`.
    fn read_back(&mut self) -> io::Result<()> {
        let n = self.pos.min(self.chunk as u64);
        self.pos -= n;
        let mut block = vec![0u8; n as usize];
        self.file.seek(SeekFrom::Start(self.pos))?;
        self.file.read_exact(&mut block)?;
        block.append(&mut self.pending);
        self.pending = block;

        if !self.started {
            self.started = true;
            if self.pending.last() == Some(&b'\n') {
                self.pending.pop();
            }
        }
        Ok(())
    }

    fn to_line(mut bytes: Vec<u8>) -> io::Result<String> {
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl Iterator for ReverseLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(i) = self.pending.iter().rposition(|&b| b == b'\n') {
                let line = self.pending.split_off(i + 1);
                self.pending.truncate(i);
                return Some(Self::to_line(line));
            }
            if self.pos == 0 {
                self.done = true;
                if !self.non_empty {
                    return None;
                }
                return Some(Self::to_line(std::mem::take(&mut self.pending)));
            }
            if let Err(e) = self.read_back() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}
