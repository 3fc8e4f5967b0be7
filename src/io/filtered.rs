use std::iter::FusedIterator;

use crate::criteria::Criterion;
use crate::error::Result;

use super::chunker::{Chunker, ScanReport};
use super::source::ByteSource;

/// Records of a [`Chunker`] pass accepted by a [`Criterion`], in file order.
#[derive(Debug)]
pub struct FilteredRecords<S, C> {
    chunker: Chunker<S>,
    criterion: C,
    rejected: u64,
}

impl<S: ByteSource, C: Criterion> FilteredRecords<S, C> {
    #[must_use]
    pub fn new(chunker: Chunker<S>, criterion: C) -> Self {
        Self {
            chunker,
            criterion,
            rejected: 0,
        }
    }

    /// Records read so far that the criterion turned down.
    #[must_use]
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    #[must_use]
    pub fn report(&self) -> &ScanReport {
        self.chunker.report()
    }

    #[must_use]
    pub fn finish(self) -> ScanReport {
        self.chunker.finish()
    }
}

impl<S: ByteSource, C: Criterion> Iterator for FilteredRecords<S, C> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.chunker.next()? {
                Ok(record) if self.criterion.is_satisfied_by(&record) => return Some(Ok(record)),
                Ok(_) => self.rejected += 1,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<S: ByteSource, C: Criterion> FusedIterator for FilteredRecords<S, C> {}
