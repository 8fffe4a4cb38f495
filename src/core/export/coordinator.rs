//! Export coordination
//!
//! This module orchestrates writing a generated dataset to the configured
//! sink: it walks the tables in write order (dimensions before facts),
//! accumulates per-table outcomes into an [`ExportSummary`], and honors the
//! shutdown signal between table writes.

use crate::adapters::sink::factory::create_sink;
use crate::adapters::sink::traits::TableSink;
use crate::config::KarooConfig;
use crate::core::export::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::domain::dataset::Dataset;
use crate::domain::tables::TableKind;
use crate::domain::Result;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use uuid::Uuid;

/// Coordinates the export of a dataset to one sink
pub struct ExportCoordinator {
    sink: Arc<dyn TableSink + Send + Sync>,
    shutdown_signal: watch::Receiver<bool>,
}

impl fmt::Debug for ExportCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportCoordinator")
            .field("sink", &self.sink.name())
            .finish_non_exhaustive()
    }
}

impl ExportCoordinator {
    /// Create a new export coordinator
    ///
    /// Builds the configured sink and prepares the destination (directory,
    /// dataset or schema). Failures here are connection or authentication
    /// problems, not write failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be created or prepared.
    pub async fn new(
        config: &KarooConfig,
        run_id: Uuid,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let sink = create_sink(config, run_id).await?;

        tracing::info!(sink = sink.name(), "Preparing sink");
        sink.prepare().await?;

        Ok(Self {
            sink,
            shutdown_signal,
        })
    }

    /// Create a coordinator around an already prepared sink
    ///
    /// Used by tests that build a sink directly.
    pub fn with_sink(
        sink: Arc<dyn TableSink + Send + Sync>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            sink,
            shutdown_signal,
        }
    }

    /// Check if shutdown has been requested
    fn is_shutdown_requested(&self) -> bool {
        *self.shutdown_signal.borrow()
    }

    /// Write every table of the dataset to the sink
    ///
    /// Tables are written in the fixed order, dimensions first. A failed
    /// table is recorded in the summary and the export moves on; only
    /// serialization bugs abort the run.
    ///
    /// # Errors
    ///
    /// Returns an error if a table cannot be serialized. Sink-side failures
    /// are accumulated into the returned summary instead.
    pub async fn execute_export(&self, dataset: &Dataset) -> Result<ExportSummary> {
        let start = Instant::now();
        let mut summary = ExportSummary::new(self.sink.name());

        tracing::info!(
            sink = %summary.sink,
            total_rows = dataset.total_rows(),
            "Starting export"
        );

        for kind in TableKind::ALL {
            if self.is_shutdown_requested() {
                tracing::warn!(table = %kind, "Shutdown requested, stopping export");
                summary.interrupted = true;
                break;
            }

            let rows = dataset.rows_json(kind)?;
            tracing::info!(table = %kind, rows = rows.len(), "Writing table");

            match self.sink.write_table(kind, &rows).await {
                Ok(report) => summary.record_report(&report),
                Err(e) => {
                    tracing::error!(table = %kind, error = %e, "Failed to write table");
                    summary.record_table_error(kind, rows.len(), e.to_string());
                }
            }
        }

        if !summary.interrupted {
            if let Err(e) = self.sink.finalize().await {
                tracing::error!(error = %e, "Failed to finalize sink");
                summary.add_error(ExportError::new(ExportErrorType::Finalize, e.to_string()));
            }
        }

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();

        Ok(summary)
    }
}
