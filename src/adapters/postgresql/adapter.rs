//! PostgreSQL sink adapter
//!
//! Implements [`TableSink`] on top of [`PostgreSQLClient`]: the bundled DDL
//! runs once during prepare, then each table is truncated and reloaded with
//! batched multi-row inserts.

use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{bind_rows, build_insert_statement};
use crate::adapters::sink::traits::{TableSink, WriteReport};
use crate::domain::errors::RelationalError;
use crate::domain::tables::TableKind;
use crate::domain::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio_postgres::types::ToSql;

/// PostgreSQL implementation of the table sink
pub struct PostgreSQLSink {
    client: PostgreSQLClient,
}

impl PostgreSQLSink {
    /// Create a new PostgreSQL sink
    pub fn new(client: PostgreSQLClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableSink for PostgreSQLSink {
    fn name(&self) -> &str {
        "relational"
    }

    async fn prepare(&self) -> Result<()> {
        self.client.test_connection().await?;
        self.client.ensure_schema().await
    }

    async fn write_table(&self, kind: TableKind, rows: &[Value]) -> Result<WriteReport> {
        let connection = self.client.get_connection().await?;

        connection
            .execute(&format!("TRUNCATE TABLE {}", kind.table_name()), &[])
            .await
            .map_err(|e| {
                RelationalError::TruncateFailed(format!("{}: {}", kind.table_name(), e))
            })?;

        if rows.is_empty() {
            return Ok(WriteReport::success(kind, 0));
        }

        // PostgreSQL caps bind parameters at u16::MAX per statement, so wide
        // tables may need smaller chunks than the configured batch size.
        let max_rows = usize::from(u16::MAX) / kind.columns().len();
        let chunk_rows = self.client.batch_size().min(max_rows);

        let mut written = 0usize;
        for chunk in rows.chunks(chunk_rows) {
            let statement = build_insert_statement(kind, chunk.len());
            let bindings = bind_rows(kind, chunk)?;
            let params: Vec<&(dyn ToSql + Sync)> =
                bindings.iter().map(|value| value.as_sql()).collect();

            connection.execute(&statement, &params).await.map_err(|e| {
                RelationalError::InsertFailed(format!("{}: {}", kind.table_name(), e))
            })?;

            written += chunk.len();
            tracing::debug!(
                table = %kind,
                written,
                total = rows.len(),
                "Insert batch completed"
            );
        }

        Ok(WriteReport::success(kind, rows.len()))
    }
}
