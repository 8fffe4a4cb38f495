//! Warehouse sink adapter
//!
//! Implements [`TableSink`] on top of [`WarehouseClient`]: each table is
//! dropped and recreated with an explicit schema, then loaded in bounded
//! concurrent insert-all batches.

use crate::adapters::sink::traits::{TableSink, WriteFailure, WriteReport};
use crate::adapters::warehouse::client::WarehouseClient;
use crate::domain::tables::TableKind;
use crate::domain::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use uuid::Uuid;

/// Warehouse implementation of the table sink
pub struct WarehouseSink {
    client: WarehouseClient,
    run_id: Uuid,
}

impl WarehouseSink {
    /// Create a new warehouse sink
    ///
    /// The run id seeds the per-row insert ids, so a re-run of the same
    /// dataset deduplicates server-side while a fresh run does not.
    pub fn new(client: WarehouseClient, run_id: Uuid) -> Self {
        Self { client, run_id }
    }
}

#[async_trait]
impl TableSink for WarehouseSink {
    fn name(&self) -> &str {
        "warehouse"
    }

    async fn prepare(&self) -> Result<()> {
        self.client.ensure_dataset_exists().await
    }

    async fn write_table(&self, kind: TableKind, rows: &[Value]) -> Result<WriteReport> {
        self.client.recreate_table(kind).await?;

        if rows.is_empty() {
            return Ok(WriteReport::success(kind, 0));
        }

        let batch_size = self.client.batch_size();

        // Batches are independent: failures are collected per batch instead
        // of aborting the rest of the table.
        let batches: Vec<_> = rows
            .chunks(batch_size)
            .enumerate()
            .map(|(index, chunk)| {
                let offset = index * batch_size;
                async move {
                    let outcome = self
                        .client
                        .insert_rows(kind, chunk, &self.run_id, offset)
                        .await;
                    (offset, chunk.len(), outcome)
                }
            })
            .collect();
        let results: Vec<(usize, usize, Result<Vec<WriteFailure>>)> = stream::iter(batches)
            .buffer_unordered(self.client.max_concurrency())
            .collect()
            .await;

        let mut failures = Vec::new();
        for (offset, len, outcome) in results {
            match outcome {
                Ok(mut rejected) => failures.append(&mut rejected),
                Err(e) => {
                    tracing::warn!(
                        table = %kind,
                        offset,
                        rows = len,
                        error = %e,
                        "Insert batch failed"
                    );
                    let message = e.to_string();
                    failures.extend((offset..offset + len).map(|row_index| WriteFailure {
                        row_index,
                        error: message.clone(),
                    }));
                }
            }
        }
        failures.sort_by_key(|f| f.row_index);

        let rows_failed = failures.len();
        Ok(WriteReport {
            table: kind,
            rows_written: rows.len() - rows_failed,
            rows_failed,
            failures,
        })
    }
}
