//! Export summary and error reporting
//!
//! This module provides summary statistics for sink writes, accumulated
//! across tables and reported at the end of a run.

use crate::adapters::sink::traits::WriteReport;
use crate::domain::tables::TableKind;
use std::time::Duration;

/// Category of an export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Sink connection or authentication problem
    Connection,
    /// A table could not be written at all
    TableWrite,
    /// The sink accepted the table but rejected individual rows
    RowsRejected,
    /// The final sink step failed (for example the data dictionary)
    Finalize,
}

/// One problem recorded during an export
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Error category
    pub error_type: ExportErrorType,

    /// Table the error relates to, when applicable
    pub table: Option<TableKind>,

    /// Error message
    pub message: String,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            table: None,
            message: message.into(),
        }
    }

    /// Attach the table this error relates to
    pub fn for_table(mut self, table: TableKind) -> Self {
        self.table = Some(table);
        self
    }
}

/// Summary of one export run
///
/// Accumulated by the coordinator as tables are written; row and table
/// failures are recorded here instead of aborting the run.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Sink the run wrote to
    pub sink: String,

    /// Tables written without any row failures
    pub tables_written: usize,

    /// Tables that failed entirely or had rows rejected
    pub tables_failed: usize,

    /// Total rows written across all tables
    pub rows_written: usize,

    /// Total rows that failed to write
    pub rows_failed: usize,

    /// Whether the run was interrupted by a shutdown signal
    pub interrupted: bool,

    /// Errors encountered during the run
    pub errors: Vec<ExportError>,

    /// Total run duration
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new, empty summary
    pub fn new(sink: impl Into<String>) -> Self {
        Self {
            sink: sink.into(),
            tables_written: 0,
            tables_failed: 0,
            rows_written: 0,
            rows_failed: 0,
            interrupted: false,
            errors: Vec::new(),
            duration: Duration::default(),
        }
    }

    /// Record the outcome of one table write
    pub fn record_report(&mut self, report: &WriteReport) {
        self.rows_written += report.rows_written;
        self.rows_failed += report.rows_failed;

        if report.is_complete() {
            self.tables_written += 1;
        } else {
            self.tables_failed += 1;
            let sample = report
                .failures
                .first()
                .map(|f| f.error.clone())
                .unwrap_or_default();
            self.errors.push(
                ExportError::new(
                    ExportErrorType::RowsRejected,
                    format!("{} rows rejected, first: {}", report.rows_failed, sample),
                )
                .for_table(report.table),
            );
        }
    }

    /// Record a table that could not be written at all
    pub fn record_table_error(&mut self, table: TableKind, rows: usize, message: String) {
        self.tables_failed += 1;
        self.rows_failed += rows;
        self.errors
            .push(ExportError::new(ExportErrorType::TableWrite, message).for_table(table));
    }

    /// Add an error that is not tied to a single table
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Set the run duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the export completed without any failure
    pub fn is_successful(&self) -> bool {
        !self.interrupted && self.tables_failed == 0 && self.errors.is_empty()
    }

    /// Percentage of rows that landed
    pub fn success_rate(&self) -> f64 {
        let total = self.rows_written + self.rows_failed;
        if total == 0 {
            100.0
        } else {
            self.rows_written as f64 / total as f64 * 100.0
        }
    }

    /// Log the summary at appropriate levels
    pub fn log_summary(&self) {
        tracing::info!(
            sink = %self.sink,
            tables_written = self.tables_written,
            tables_failed = self.tables_failed,
            rows_written = self.rows_written,
            rows_failed = self.rows_failed,
            duration_secs = self.duration.as_secs_f64(),
            success_rate = self.success_rate(),
            interrupted = self.interrupted,
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(error_count = self.errors.len(), "Export had errors");
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    table = error.table.map(|t| t.table_name()),
                    message = %error.message,
                    "Export error"
                );
            }
        }
    }
}
