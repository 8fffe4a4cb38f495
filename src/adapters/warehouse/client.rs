//! Warehouse REST client
//!
//! This module implements the HTTP client for the BigQuery-style warehouse
//! API: dataset lookup/creation, table drop/recreate with an explicit schema,
//! and streaming inserts through the insert-all endpoint.
//!
//! The endpoint is configurable so tests can point the client at a local
//! mock server.

use crate::adapters::sink::traits::WriteFailure;
use crate::adapters::warehouse::models::{
    CreateDatasetRequest, CreateTableRequest, DatasetReference, InsertAllRequest,
    InsertAllResponse, InsertRow, TableFieldSchema, TableReference, TableSchema,
};
use crate::config::schema::WarehouseConfig;
use crate::config::{secret_string, SecretString};
use crate::domain::errors::WarehouseError;
use crate::domain::tables::TableKind;
use crate::domain::Result;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

/// HTTP client for the warehouse bulk-load API
#[derive(Debug)]
pub struct WarehouseClient {
    http: Client,
    config: WarehouseConfig,
    token: SecretString,
}

impl WarehouseClient {
    /// Create a new warehouse client
    ///
    /// Reads the bearer token from the configured credentials file and
    /// builds the HTTP client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns `WarehouseError::AuthenticationFailed` if the credentials
    /// file cannot be read or is empty.
    pub async fn new(config: WarehouseConfig) -> Result<Self> {
        let token = load_token(&config.credentials_path).await?;

        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        tracing::debug!(
            endpoint = %config.endpoint,
            project_id = %config.project_id,
            "Warehouse client created"
        );

        Ok(Self {
            http,
            config,
            token,
        })
    }

    /// Rows per insert-all request
    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    /// Maximum in-flight insert batches
    pub fn max_concurrency(&self) -> usize {
        self.config.max_concurrency
    }

    /// Ensure the target dataset exists, creating it on 404
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset lookup fails for any reason other
    /// than "not found", or if creation fails.
    pub async fn ensure_dataset_exists(&self) -> Result<()> {
        let response = self
            .http
            .get(self.dataset_url())
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await
            .map_err(request_error)?;

        match response.status() {
            status if status.is_success() => {
                tracing::info!(dataset_id = %self.config.dataset_id, "Dataset already exists");
                Ok(())
            }
            StatusCode::NOT_FOUND => self.create_dataset().await,
            _ => Err(error_from_response("Dataset lookup failed", response)
                .await
                .into()),
        }
    }

    async fn create_dataset(&self) -> Result<()> {
        tracing::info!(dataset_id = %self.config.dataset_id, "Creating dataset");

        let body = CreateDatasetRequest {
            dataset_reference: DatasetReference {
                project_id: self.config.project_id.clone(),
                dataset_id: self.config.dataset_id.clone(),
            },
        };

        let response = self
            .http
            .post(self.datasets_url())
            .header(AUTHORIZATION, self.bearer())
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        if response.status().is_success() {
            tracing::info!(dataset_id = %self.config.dataset_id, "Dataset created successfully");
            Ok(())
        } else {
            let error = error_from_response("Dataset creation failed", response).await;
            Err(match error {
                auth @ WarehouseError::AuthenticationFailed(_) => auth,
                other => WarehouseError::DatasetCreationFailed(other.to_string()),
            }
            .into())
        }
    }

    /// Drop and recreate a table with an explicit schema
    ///
    /// The schema is derived from the table's column metadata. A 404 on the
    /// delete means the table did not exist yet, which is fine.
    ///
    /// # Errors
    ///
    /// Returns `WarehouseError::TableCreationFailed` if either step fails.
    pub async fn recreate_table(&self, kind: TableKind) -> Result<()> {
        let response = self
            .http
            .delete(self.table_url(kind))
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            let error = error_from_response("Table delete failed", response).await;
            return Err(WarehouseError::TableCreationFailed(error.to_string()).into());
        }

        let fields = kind
            .columns()
            .iter()
            .map(|column| TableFieldSchema {
                name: column.name.to_string(),
                field_type: column.ty.warehouse_type().to_string(),
                mode: if column.nullable {
                    "NULLABLE".to_string()
                } else {
                    "REQUIRED".to_string()
                },
            })
            .collect();

        let body = CreateTableRequest {
            table_reference: TableReference {
                project_id: self.config.project_id.clone(),
                dataset_id: self.config.dataset_id.clone(),
                table_id: kind.table_name().to_string(),
            },
            schema: TableSchema { fields },
        };

        let response = self
            .http
            .post(self.tables_url())
            .header(AUTHORIZATION, self.bearer())
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        if response.status().is_success() {
            tracing::debug!(table = %kind, "Table recreated");
            Ok(())
        } else {
            let error = error_from_response("Table creation failed", response).await;
            Err(WarehouseError::TableCreationFailed(error.to_string()).into())
        }
    }

    /// Stream one batch of rows into a table
    ///
    /// Insert ids are derived from the run id, table name and absolute row
    /// offset, so retried requests deduplicate server-side.
    ///
    /// # Returns
    ///
    /// Per-row rejections reported by the server, with indices shifted to
    /// absolute row positions. An empty vector means the whole batch landed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request itself fails; row-level rejections
    /// are returned in the `Ok` variant.
    pub async fn insert_rows(
        &self,
        kind: TableKind,
        rows: &[Value],
        run_id: &Uuid,
        offset: usize,
    ) -> Result<Vec<WriteFailure>> {
        let request = InsertAllRequest::new(
            rows.iter()
                .enumerate()
                .map(|(i, row)| InsertRow {
                    insert_id: format!("{}-{}-{}", run_id, kind.table_name(), offset + i),
                    json: row.clone(),
                })
                .collect(),
        );

        let response = self
            .http
            .post(self.insert_all_url(kind))
            .header(AUTHORIZATION, self.bearer())
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            let error = error_from_response("Insert failed", response).await;
            return Err(match error {
                auth @ WarehouseError::AuthenticationFailed(_) => auth,
                other => WarehouseError::InsertFailed(other.to_string()),
            }
            .into());
        }

        let body: InsertAllResponse = response
            .json()
            .await
            .map_err(|e| WarehouseError::InvalidResponse(e.to_string()))?;

        let failures: Vec<WriteFailure> = body
            .insert_errors
            .into_iter()
            .map(|entry| WriteFailure {
                row_index: offset + entry.index,
                error: entry
                    .errors
                    .first()
                    .map(|e| format!("{}: {}", e.reason, e.message))
                    .unwrap_or_else(|| "rejected".to_string()),
            })
            .collect();

        tracing::debug!(
            table = %kind,
            offset,
            rows = rows.len(),
            rejected = failures.len(),
            "Insert batch completed"
        );

        Ok(failures)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret().as_ref())
    }

    fn datasets_url(&self) -> String {
        format!(
            "{}/bigquery/v2/projects/{}/datasets",
            self.config.endpoint, self.config.project_id
        )
    }

    fn dataset_url(&self) -> String {
        format!("{}/{}", self.datasets_url(), self.config.dataset_id)
    }

    fn tables_url(&self) -> String {
        format!("{}/tables", self.dataset_url())
    }

    fn table_url(&self, kind: TableKind) -> String {
        format!("{}/{}", self.tables_url(), kind.table_name())
    }

    fn insert_all_url(&self, kind: TableKind) -> String {
        format!("{}/insertAll", self.table_url(kind))
    }
}

async fn load_token(path: &str) -> Result<SecretString> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        WarehouseError::AuthenticationFailed(format!("Cannot read credentials file {path}: {e}"))
    })?;

    let token = raw.trim().to_string();
    if token.is_empty() {
        return Err(WarehouseError::AuthenticationFailed(format!(
            "Credentials file {path} is empty"
        ))
        .into());
    }

    Ok(secret_string(token))
}

fn request_error(e: reqwest::Error) -> WarehouseError {
    if e.is_timeout() {
        WarehouseError::Timeout(e.to_string())
    } else {
        WarehouseError::ConnectionFailed(e.to_string())
    }
}

async fn error_from_response(context: &str, response: reqwest::Response) -> WarehouseError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match status.as_u16() {
        401 | 403 => WarehouseError::AuthenticationFailed(format!("{context}: status {status}")),
        s if s >= 500 => WarehouseError::ServerError {
            status: s,
            message: format!("{context}: {body}"),
        },
        s => WarehouseError::ClientError {
            status: s,
            message: format!("{context}: {body}"),
        },
    }
}
