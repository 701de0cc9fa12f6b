use rayon::prelude::*;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use super::matcher::TermMatcher;
use crate::errors::{SearchError, SearchResult};
use crate::request::{EncodingMode, UnreadablePolicy};
use crate::results::LineHit;

const BUFFER_CAPACITY: usize = 65536;
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads matched files line by line and reports every line containing the
/// search term.
#[derive(Debug)]
pub struct Scanner {
    matcher: TermMatcher,
    encoding_mode: EncodingMode,
    policy: UnreadablePolicy,
    thread_count: NonZeroUsize,
}

impl Scanner {
    /// Creates a sequential scanner with lossy decoding
    pub fn new(matcher: TermMatcher) -> Self {
        Self {
            matcher,
            encoding_mode: EncodingMode::default(),
            policy: UnreadablePolicy::default(),
            thread_count: NonZeroUsize::MIN,
        }
    }

    pub fn with_encoding_mode(mut self, mode: EncodingMode) -> Self {
        self.encoding_mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: UnreadablePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_thread_count(mut self, count: NonZeroUsize) -> Self {
        self.thread_count = count;
        self
    }

    /// Scans `files` in order, returning one hit per matching line.
    ///
    /// With more than one thread the files are scanned on a dedicated rayon
    /// pool, but results are still folded in input order: the hit sequence and
    /// the reported error (the first failing file) match the sequential run.
    pub fn scan(&self, files: &[PathBuf]) -> SearchResult<Vec<LineHit>> {
        debug!(
            "Scanning {} files for '{}' on {} thread(s)",
            files.len(),
            self.matcher.term(),
            self.thread_count
        );

        if self.thread_count.get() == 1 || files.len() < 2 {
            let mut hits = Vec::new();
            for path in files {
                self.collect(path, self.scan_file(path), &mut hits)?;
            }
            return Ok(hits);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.thread_count.get())
            .build()
            .map_err(|e| SearchError::ThreadPool(e.to_string()))?;

        let per_file: Vec<SearchResult<Vec<LineHit>>> =
            pool.install(|| files.par_iter().map(|path| self.scan_file(path)).collect());

        let mut hits = Vec::new();
        for (path, result) in files.iter().zip(per_file) {
            self.collect(path, result, &mut hits)?;
        }
        Ok(hits)
    }

    fn collect(
        &self,
        path: &Path,
        result: SearchResult<Vec<LineHit>>,
        hits: &mut Vec<LineHit>,
    ) -> SearchResult<()> {
        match result {
            Ok(file_hits) => {
                hits.extend(file_hits);
                Ok(())
            }
            Err(e) => match self.policy {
                UnreadablePolicy::Abort => Err(e),
                UnreadablePolicy::Skip => {
                    warn!("Skipping {}: {}", path.display(), e);
                    Ok(())
                }
            },
        }
    }

    /// Scans a single file.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`. Line numbers count every
    /// terminator, so a classic Mac file numbers its lines like any other.
    pub fn scan_file(&self, path: &Path) -> SearchResult<Vec<LineHit>> {
        trace!("Scanning file: {}", path.display());
        let file = File::open(path).map_err(|e| SearchError::from_io(path, e))?;
        let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);

        let mut hits = Vec::new();
        let mut buffer = Vec::with_capacity(256);
        let mut line_number = 0;
        let mut replaced = false;

        loop {
            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|e| SearchError::from_io(path, e))?;
            if read == 0 {
                break;
            }

            let mut chunk = strip_line_ending(&buffer);
            if line_number == 0 {
                chunk = chunk.strip_prefix(UTF8_BOM).unwrap_or(chunk);
            }

            for bytes in chunk.split(|&b| b == b'\r') {
                line_number += 1;
                if self.line_matches(path, line_number, bytes, &mut replaced)? {
                    hits.push(LineHit {
                        path: path.to_path_buf(),
                        line_number,
                    });
                }
            }
        }

        if replaced {
            warn!("Invalid UTF-8 replaced while reading {}", path.display());
        }
        trace!("Found {} hits in {}", hits.len(), path.display());
        Ok(hits)
    }

    fn line_matches(
        &self,
        path: &Path,
        line_number: usize,
        bytes: &[u8],
        replaced: &mut bool,
    ) -> SearchResult<bool> {
        match self.encoding_mode {
            EncodingMode::FailFast => {
                let line = std::str::from_utf8(bytes)
                    .map_err(|e| SearchError::encoding_error(path, line_number, e))?;
                Ok(self.matcher.is_match(line))
            }
            EncodingMode::Lossy => {
                let line = String::from_utf8_lossy(bytes);
                if let Cow::Owned(_) = line {
                    *replaced = true;
                }
                Ok(self.matcher.is_match(&line))
            }
        }
    }
}

/// Drops a trailing `\n` or `\r\n`, and a trailing `\r` at end of file
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
