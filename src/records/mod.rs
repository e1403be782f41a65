//! Scan-record storage and querying.
//!
//! `ScanRepository` owns persistence: create/read/update/delete with the
//! ownership rule on mutation, plus the aggregate reads (regions, stats,
//! patient roster). `ScanQueryEngine` sits on top of it and turns an
//! authenticated identity plus filter/pagination inputs into a scoped page
//! of records with pagination metadata. Handlers never build SQL themselves.

pub mod query;
pub mod repo;

pub use query::{PageRequest, ScanQueryEngine};
pub use repo::{RecordScope, ScanFilter, ScanRepository};
