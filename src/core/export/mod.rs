//! Export orchestration
//!
//! Writes a generated dataset to the configured sink, table by table, and
//! reports the outcome as an [`ExportSummary`].

pub mod coordinator;
pub mod summary;

// Re-export commonly used items
pub use coordinator::ExportCoordinator;
pub use summary::{ExportError, ExportErrorType, ExportSummary};
