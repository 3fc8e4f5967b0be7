//! Public configuration types exposed by the `oplog-core` crate.

pub mod options;

pub use options::{FilterConfig, NamespaceFilterSpec, ScanOptions, ScanOptionsBuilder};
