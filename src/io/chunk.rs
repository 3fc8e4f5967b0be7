//! One memory-mapped window of a log file and the records it yields.

use std::borrow::Cow;
use std::iter::FusedIterator;
use std::ops::Range;

use memchr::memchr_iter;
use memmap2::Mmap;

use crate::constants::MIN_WINDOW_SIZE;
use crate::error::{OplogError, Result};

use super::carry::PartialRecordHandler;
use super::source::ByteSource;

/// Cheap completeness check for the last line of a window.
///
/// A line is complete when it contains both `{` and `}}`. This is not brace
/// matching: a complete record whose last value is not an object (no `}}`)
/// is judged partial, and a record cut just after an inner `}}` is judged
/// complete.
#[must_use]
pub fn is_partial(line: &str) -> bool {
    !(line.contains('{') && line.contains("}}"))
}

/// A read-only mapping of `[offset, offset + read_size)`.
///
/// The bytes are validated as UTF-8 when the window is created. If a
/// multi-byte character is cut by the end of a non-final window, only the
/// bytes up to the last whole character are consumed.
#[derive(Debug)]
pub struct Chunk {
    offset: u64,
    read_size: usize,
    consumed: usize,
    mmap: Mmap,
}

impl Chunk {
    pub fn new<S: ByteSource + ?Sized>(
        source: &S,
        offset: u64,
        file_len: u64,
        window_size: usize,
    ) -> Result<Self> {
        if window_size < MIN_WINDOW_SIZE {
            return Err(OplogError::InvalidConfig {
                reason: format!("window_size {window_size} is below {MIN_WINDOW_SIZE} bytes").into(),
            });
        }
        let remaining = file_len.saturating_sub(offset);
        if remaining == 0 {
            return Err(OplogError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("window offset {offset} is at or past end of file ({file_len} bytes)"),
            )));
        }
        let read_size = usize::try_from(remaining).map_or(window_size, |r| r.min(window_size));
        let is_final = offset + read_size as u64 >= file_len;

        let mmap = source.map_window(offset, read_size)?;
        let consumed = decoded_len(&mmap, offset, is_final)?;
        tracing::debug!(
            window.offset = offset,
            window.read_size = read_size,
            window.consumed = consumed,
            "mapped window"
        );
        Ok(Self {
            offset,
            read_size,
            consumed,
            mmap,
        })
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of bytes mapped.
    #[must_use]
    pub fn read_size(&self) -> usize {
        self.read_size
    }

    /// Number of bytes this window decodes; the next window starts here.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Split the window into lines and stitch any fragment held by `handler`
    /// onto the first one. The returned sequence is single-pass.
    ///
    /// When the previous window ended on a yielded record whose newline fell
    /// into this window, the whitespace before that newline is dropped rather
    /// than yielded as a blank line.
    #[must_use]
    pub fn records<H: PartialRecordHandler>(self, mut handler: H) -> ChunkRecords<H> {
        let text = &self.mmap[..self.consumed];
        let mut lines = Vec::new();
        let mut start = 0;
        for newline in memchr_iter(b'\n', text) {
            lines.push(start..newline);
            start = newline + 1;
        }
        lines.push(start..text.len());

        let mut index = 0;
        let mut first = String::new();
        let head = String::from_utf8_lossy(&text[lines[0].clone()]);
        if handler.take_unterminated() && head.trim().is_empty() {
            if lines.len() == 1 {
                handler.mark_unterminated();
                lines.clear();
            } else {
                index = 1;
            }
        } else {
            first = handler.prepend_partial_record_to(&head);
        }

        ChunkRecords {
            mmap: self.mmap,
            consumed: self.consumed,
            lines,
            first,
            index,
            handler,
        }
    }
}

fn decoded_len(bytes: &[u8], offset: u64, is_final: bool) -> Result<usize> {
    match std::str::from_utf8(bytes) {
        Ok(_) => Ok(bytes.len()),
        Err(err)
            if err.error_len().is_none()
                && !is_final
                && err.valid_up_to() > 0
                && bytes.len() - err.valid_up_to() < MIN_WINDOW_SIZE =>
        {
            Ok(err.valid_up_to())
        }
        Err(err) => Err(OplogError::Decode {
            offset: offset + err.valid_up_to() as u64,
            valid_up_to: err.valid_up_to(),
        }),
    }
}

/// Trimmed records of one window, in order.
///
/// When the last line fails [`is_partial`], it is handed to the
/// [`PartialRecordHandler`] instead of being yielded and the sequence ends.
/// Blank lines inside the window are yielded as empty records.
/// The mapping is released when this value is dropped.
#[derive(Debug)]
pub struct ChunkRecords<H> {
    mmap: Mmap,
    consumed: usize,
    lines: Vec<Range<usize>>,
    first: String,
    index: usize,
    handler: H,
}

impl<H: PartialRecordHandler> ChunkRecords<H> {
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Give back the handler, e.g. to pass it on to the next window.
    #[must_use]
    pub fn into_handler(self) -> H {
        self.handler
    }
}

impl<H: PartialRecordHandler> Iterator for ChunkRecords<H> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let index = self.index;
        if index >= self.lines.len() {
            return None;
        }
        let line: Cow<'_, str> = if index == 0 {
            Cow::Owned(std::mem::take(&mut self.first))
        } else {
            // Validated in `Chunk::new`, and line ranges never split a character.
            String::from_utf8_lossy(&self.mmap[self.lines[index].clone()])
        };

        let last = index == self.lines.len() - 1;
        if last && is_partial(&line) {
            self.index = self.lines.len();
            self.handler.handle_partial_record(line.into_owned());
            return None;
        }
        self.index += 1;
        if last {
            self.handler.mark_unterminated();
        }
        Some(line.trim().to_owned())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.lines.len() - self.index.min(self.lines.len())))
    }
}

impl<H: PartialRecordHandler> FusedIterator for ChunkRecords<H> {}
