//! Sink abstraction traits
//!
//! This module defines the trait that output sinks must implement to
//! receive generated tables.

use crate::domain::tables::TableKind;
use crate::domain::Result;
use async_trait::async_trait;

/// Result of writing one table to a sink
#[derive(Debug, Clone)]
pub struct WriteReport {
    /// Table that was written
    pub table: TableKind,

    /// Number of rows successfully written
    pub rows_written: usize,

    /// Number of rows that failed to write
    pub rows_failed: usize,

    /// Details of failed rows
    pub failures: Vec<WriteFailure>,
}

/// Details of a failed row
#[derive(Debug, Clone)]
pub struct WriteFailure {
    /// Zero-based row index within the table
    pub row_index: usize,

    /// Error message
    pub error: String,
}

impl WriteReport {
    /// Create a report for a fully successful table write
    pub fn success(table: TableKind, rows_written: usize) -> Self {
        Self {
            table,
            rows_written,
            rows_failed: 0,
            failures: Vec::new(),
        }
    }

    /// Whether every row landed
    pub fn is_complete(&self) -> bool {
        self.rows_failed == 0
    }
}

/// Table sink trait
///
/// A sink persists generated tables idempotently: writing a table fully
/// replaces any prior contents stored under that table name, so re-running
/// the generator against the same destination converges on the latest run.
#[async_trait]
pub trait TableSink: Send + Sync {
    /// Short sink name for logs and summaries
    fn name(&self) -> &str;

    /// Prepare the destination before any table is written
    ///
    /// Creates the output directory, dataset or schema as needed. Called
    /// exactly once per run, before the first `write_table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be reached or created.
    async fn prepare(&self) -> Result<()>;

    /// Write one table, replacing any prior contents
    ///
    /// # Arguments
    ///
    /// * `kind` - Table to write
    /// * `rows` - Serialized rows, one JSON object per row, keyed by column name
    ///
    /// # Returns
    ///
    /// Returns a `WriteReport` with per-row failure details. Row-level
    /// failures are reported, not propagated; an `Err` means the table as a
    /// whole could not be written.
    async fn write_table(&self, kind: TableKind, rows: &[serde_json::Value])
        -> Result<WriteReport>;

    /// Finish the run after the last table is written
    ///
    /// Sinks that produce run-level artifacts (the files sink writes its
    /// data dictionary here) override this; the default is a no-op.
    async fn finalize(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_report_success() {
        let report = WriteReport::success(TableKind::Facility, 25);
        assert_eq!(report.rows_written, 25);
        assert_eq!(report.rows_failed, 0);
        assert!(report.failures.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn test_write_report_with_failures() {
        let report = WriteReport {
            table: TableKind::Visit,
            rows_written: 98,
            rows_failed: 2,
            failures: vec![
                WriteFailure {
                    row_index: 3,
                    error: "invalid value".to_string(),
                },
                WriteFailure {
                    row_index: 17,
                    error: "invalid value".to_string(),
                },
            ],
        };
        assert!(!report.is_complete());
        assert_eq!(report.failures.len(), 2);
    }
}
