use std::fs::File;

use memmap2::{Mmap, MmapOptions};

use crate::error::Result;

/// Supplier of read-only byte ranges for a log file of known length.
pub trait ByteSource {
    fn byte_len(&self) -> Result<u64>;

    /// Map `len` bytes starting at `offset`. The mapping is released when the
    /// returned [`Mmap`] is dropped.
    fn map_window(&self, offset: u64, len: usize) -> Result<Mmap>;
}

impl ByteSource for File {
    fn byte_len(&self) -> Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn map_window(&self, offset: u64, len: usize) -> Result<Mmap> {
        // Safety: read-only mapping; an append-only log never rewrites bytes
        // below the length captured when the scan started.
        let mmap = unsafe { MmapOptions::new().offset(offset).len(len).map(self)? };
        Ok(mmap)
    }
}

impl ByteSource for fs_err::File {
    fn byte_len(&self) -> Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn map_window(&self, offset: u64, len: usize) -> Result<Mmap> {
        self.file().map_window(offset, len)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &S {
    fn byte_len(&self) -> Result<u64> {
        (**self).byte_len()
    }

    fn map_window(&self, offset: u64, len: usize) -> Result<Mmap> {
        (**self).map_window(offset, len)
    }
}
