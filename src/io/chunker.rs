//! Sequential pass over a log file, one mapped window at a time.

use std::iter::FusedIterator;
use std::path::Path;

use serde::Serialize;

use crate::criteria::Criterion;
use crate::error::{OplogError, Result};
use crate::types::ScanOptions;

use super::carry::PartialCarry;
use super::chunk::{Chunk, ChunkRecords};
use super::filtered::FilteredRecords;
use super::source::ByteSource;

/// A fragment left pending when the scan reached end of file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruncatedTrailingRecord {
    /// File offset where the fragment starts.
    pub offset: u64,
    pub len: usize,
    pub fragment: String,
}

/// Counters for one pass over a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub windows: u64,
    pub records: u64,
    pub bytes_scanned: u64,
    pub truncated: Option<TruncatedTrailingRecord>,
}

impl ScanReport {
    /// Turn a dropped trailing fragment into an error.
    pub fn ensure_complete(&self) -> Result<()> {
        match &self.truncated {
            Some(truncated) => Err(OplogError::TruncatedTrailingRecord {
                offset: truncated.offset,
                len: truncated.len,
            }),
            None => Ok(()),
        }
    }
}

/// Yields every record of a file in order, carrying records that straddle a
/// window boundary over to the next window.
///
/// The file length is captured when the chunker is created; bytes appended
/// afterwards are not part of the pass. A decode error is yielded once and
/// ends the pass.
#[derive(Debug)]
pub struct Chunker<S = fs_err::File> {
    source: S,
    options: ScanOptions,
    file_len: u64,
    offset: u64,
    // Lent to `current` while a window is being iterated.
    carry: Option<PartialCarry>,
    current: Option<ChunkRecords<PartialCarry>>,
    report: ScanReport,
    finished: bool,
}

impl Chunker<fs_err::File> {
    pub fn open<P: AsRef<Path>>(path: P, options: ScanOptions) -> Result<Self> {
        let file = fs_err::File::open(path.as_ref())?;
        Self::new(file, options)
    }
}

impl<S: ByteSource> Chunker<S> {
    pub fn new(source: S, options: ScanOptions) -> Result<Self> {
        options.validate()?;
        let file_len = source.byte_len()?;
        Ok(Self {
            source,
            options,
            file_len,
            offset: 0,
            carry: Some(PartialCarry::new()),
            current: None,
            report: ScanReport::default(),
            finished: false,
        })
    }

    #[must_use]
    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    /// Offset of the next window to be mapped.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn report(&self) -> &ScanReport {
        &self.report
    }

    #[must_use]
    pub fn finish(self) -> ScanReport {
        self.report
    }

    /// Only yield records accepted by `criterion`.
    #[must_use]
    pub fn filter_with<C: Criterion>(self, criterion: C) -> FilteredRecords<S, C> {
        FilteredRecords::new(self, criterion)
    }

    fn open_window(&mut self) -> Result<()> {
        let chunk = Chunk::new(
            &self.source,
            self.offset,
            self.file_len,
            self.options.window_size,
        )?;
        self.report.windows += 1;
        let carry = self.carry.take().unwrap_or_default();
        self.current = Some(chunk.records(carry));
        Ok(())
    }

    fn close_window(&mut self, records: ChunkRecords<PartialCarry>) {
        let consumed = records.consumed() as u64;
        self.offset += consumed;
        self.report.bytes_scanned += consumed;
        self.carry = Some(records.into_handler());
    }

    fn finish_pass(&mut self) {
        self.finished = true;
        let Some(fragment) = self.carry.as_mut().and_then(PartialCarry::take) else {
            return;
        };
        if fragment.trim().is_empty() {
            return;
        }
        let len = fragment.len();
        let offset = self.file_len - len as u64;
        tracing::warn!(
            scan.offset = offset,
            scan.fragment_len = len,
            "log ends with a truncated record"
        );
        if self.options.report_truncated {
            self.report.truncated = Some(TruncatedTrailingRecord {
                offset,
                len,
                fragment,
            });
        }
    }
}

impl<S: ByteSource> Iterator for Chunker<S> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(records) = self.current.as_mut() {
                if let Some(record) = records.next() {
                    self.report.records += 1;
                    return Some(Ok(record));
                }
            }
            if let Some(records) = self.current.take() {
                self.close_window(records);
                continue;
            }
            if self.finished {
                return None;
            }
            if self.offset >= self.file_len {
                self.finish_pass();
                return None;
            }
            if let Err(err) = self.open_window() {
                self.finished = true;
                return Some(Err(err));
            }
        }
    }
}

impl<S: ByteSource> FusedIterator for Chunker<S> {}
