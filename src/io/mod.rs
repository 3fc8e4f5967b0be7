//! Windowed, memory-mapped reading of line-delimited logs.

pub mod carry;
pub mod chunk;
pub mod chunker;
pub mod filtered;
pub mod source;

pub use carry::{PartialCarry, PartialRecordHandler};
pub use chunk::{Chunk, ChunkRecords, is_partial};
pub use chunker::{Chunker, ScanReport, TruncatedTrailingRecord};
pub use filtered::FilteredRecords;
pub use source::ByteSource;
