//! Sink factory
//!
//! This module provides the factory function that creates the configured
//! output sink.

use crate::adapters::files::writer::FileSink;
use crate::adapters::postgresql::adapter::PostgreSQLSink;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::sink::traits::TableSink;
use crate::adapters::warehouse::adapter::WarehouseSink;
use crate::adapters::warehouse::client::WarehouseClient;
use crate::config::schema::{KarooConfig, OutputTarget};
use crate::domain::Result;
use std::sync::Arc;
use uuid::Uuid;

/// Create an output sink based on the configuration
///
/// This factory function examines `output.target` in the configuration and
/// creates the matching sink implementation.
///
/// # Arguments
///
/// * `config` - The Karoo configuration
/// * `run_id` - Run identifier, used by the warehouse sink to derive insert ids
///
/// # Returns
///
/// Returns an Arc-wrapped trait object that implements TableSink
///
/// # Errors
///
/// Returns an error if the sink cannot be created, for example when the
/// warehouse credentials file cannot be read.
pub async fn create_sink(
    config: &KarooConfig,
    run_id: Uuid,
) -> Result<Arc<dyn TableSink + Send + Sync>> {
    match config.output.target {
        OutputTarget::Files => {
            tracing::info!(output_dir = %config.output.files.output_dir, "Creating file sink");
            let sink = FileSink::new(config.output.files.clone());

            Ok(Arc::new(sink) as Arc<dyn TableSink + Send + Sync>)
        }
        OutputTarget::Warehouse => {
            let warehouse_config = config
                .output
                .warehouse
                .as_ref()
                .expect("Warehouse config should be validated");

            tracing::info!(
                project_id = %warehouse_config.project_id,
                dataset_id = %warehouse_config.dataset_id,
                "Creating warehouse sink"
            );
            let client = WarehouseClient::new(warehouse_config.clone()).await?;
            let sink = WarehouseSink::new(client, run_id);

            Ok(Arc::new(sink) as Arc<dyn TableSink + Send + Sync>)
        }
        OutputTarget::Relational => {
            let relational_config = config
                .output
                .relational
                .as_ref()
                .expect("Relational config should be validated");

            tracing::info!(
                connection = %relational_config.connection_string_safe(),
                "Creating relational sink"
            );
            let client = PostgreSQLClient::new(relational_config.clone()).await?;
            let sink = PostgreSQLSink::new(client);

            Ok(Arc::new(sink) as Arc<dyn TableSink + Send + Sync>)
        }
    }
}
