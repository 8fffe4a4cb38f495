//! Warehouse API request and response models
//!
//! Serde models for the BigQuery-style REST surface the warehouse sink
//! talks to: dataset/table creation and the streaming insert-all endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reference to a dataset within a project
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetReference {
    pub project_id: String,
    pub dataset_id: String,
}

/// Body for dataset creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDatasetRequest {
    pub dataset_reference: DatasetReference,
}

/// Reference to a table within a dataset
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

/// One field of an explicit table schema
#[derive(Debug, Serialize)]
pub struct TableFieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub mode: String,
}

/// Explicit table schema
#[derive(Debug, Serialize)]
pub struct TableSchema {
    pub fields: Vec<TableFieldSchema>,
}

/// Body for table creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub table_reference: TableReference,
    pub schema: TableSchema,
}

/// One row of an insert-all request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertRow {
    /// Deduplication id, derived from the run id and row offset
    pub insert_id: String,
    pub json: Value,
}

/// Body for the insert-all endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAllRequest {
    pub kind: String,
    /// Load the valid rows and report the invalid ones instead of
    /// rejecting the whole batch
    pub skip_invalid_rows: bool,
    pub rows: Vec<InsertRow>,
}

impl InsertAllRequest {
    pub fn new(rows: Vec<InsertRow>) -> Self {
        Self {
            kind: "bigquery#tableDataInsertAllRequest".to_string(),
            skip_invalid_rows: true,
            rows,
        }
    }
}

/// Response from the insert-all endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAllResponse {
    #[serde(default)]
    pub insert_errors: Vec<InsertErrorEntry>,
}

/// Per-row rejection within an otherwise accepted batch
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertErrorEntry {
    /// Zero-based index of the rejected row within the request
    pub index: usize,
    #[serde(default)]
    pub errors: Vec<ErrorProto>,
}

/// Error detail attached to a rejected row
#[derive(Debug, Deserialize)]
pub struct ErrorProto {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_all_request_serializes_camel_case() {
        let request = InsertAllRequest::new(vec![InsertRow {
            insert_id: "run-dim_drug-0".to_string(),
            json: json!({"drug_id": "DRG001"}),
        }]);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["kind"], "bigquery#tableDataInsertAllRequest");
        assert_eq!(value["skipInvalidRows"], true);
        assert_eq!(value["rows"][0]["insertId"], "run-dim_drug-0");
        assert_eq!(value["rows"][0]["json"]["drug_id"], "DRG001");
    }

    #[test]
    fn test_insert_all_response_parses_errors() {
        let body = r#"{
            "kind": "bigquery#tableDataInsertAllResponse",
            "insertErrors": [
                {"index": 2, "errors": [{"reason": "invalid", "message": "bad value"}]}
            ]
        }"#;

        let response: InsertAllResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.insert_errors.len(), 1);
        assert_eq!(response.insert_errors[0].index, 2);
        assert_eq!(response.insert_errors[0].errors[0].message, "bad value");
    }

    #[test]
    fn test_insert_all_response_without_errors() {
        let response: InsertAllResponse =
            serde_json::from_str(r#"{"kind": "bigquery#tableDataInsertAllResponse"}"#).unwrap();
        assert!(response.insert_errors.is_empty());
    }

    #[test]
    fn test_table_field_schema_uses_type_key() {
        let field = TableFieldSchema {
            name: "facility_id".to_string(),
            field_type: "STRING".to_string(),
            mode: "REQUIRED".to_string(),
        };
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "STRING");
        assert_eq!(value["mode"], "REQUIRED");
    }
}
