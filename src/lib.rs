#![deny(clippy::all, clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![cfg_attr(
    test,
    allow(
        clippy::uninlined_format_args,
        clippy::cast_possible_truncation,
        clippy::needless_raw_string_hashes
    )
)]
#![allow(clippy::module_name_repetitions)]
//
// Documentation lints: internal helpers are self-describing; public entry
// points carry their own docs.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
//
// Casts: offsets are u64 file positions and window sizes are usize byte
// counts, both bounded by the file being scanned.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
//
#![allow(clippy::manual_let_else)]

//! Stream append-only, one-record-per-line operation logs through fixed-size
//! memory-mapped windows and filter the records by namespace.
//!
//! ```no_run
//! use oplog_core::{Chunker, NamespaceCriteria, ScanOptions};
//!
//! # fn main() -> oplog_core::Result<()> {
//! let chunker = Chunker::open("oplog.jsonl", ScanOptions::default())?;
//! let mut records = chunker.filter_with(NamespaceCriteria::new("app.orders.insert", false));
//! for record in records.by_ref() {
//!     println!("{}", record?);
//! }
//! records.finish().ensure_complete()?;
//! # Ok(())
//! # }
//! ```

/// The oplog-core crate version (matches `Cargo.toml`).
pub const OPLOG_CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod constants;
pub mod criteria;
pub mod error;
pub mod io;
pub mod types;

pub use constants::*;
pub use criteria::{
    AllCriteria, Criterion, NamespaceCriteria, Opcode, OperationType, classify_namespace,
    record_opcode,
};
pub use error::{OplogError, Result};
pub use io::{
    ByteSource, Chunk, ChunkRecords, Chunker, FilteredRecords, PartialCarry,
    PartialRecordHandler, ScanReport, TruncatedTrailingRecord, is_partial,
};
pub use types::{FilterConfig, NamespaceFilterSpec, ScanOptions, ScanOptionsBuilder};
