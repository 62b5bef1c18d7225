//! Report Store: load and save growth-plan reports by identifier.

/// In-process store used by tests and dry runs.
pub mod memory;
/// The store contract and the JSON-file backend.
pub mod store;

pub use memory::MemoryReportStore;
pub use store::{FileReportStore, ReportStore};
