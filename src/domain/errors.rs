//! Domain error types
//!
//! This module defines the error hierarchy for Karoo. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Karoo error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum KarooError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Data generation errors
    #[error("Generation error: {0}")]
    Generation(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Warehouse sink errors
    #[error("Warehouse error: {0}")]
    Warehouse(#[from] WarehouseError),

    /// Relational sink errors
    #[error("Relational error: {0}")]
    Relational(#[from] RelationalError),

    /// Sink errors (generic)
    #[error("Sink error: {0}")]
    Sink(String),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Warehouse-sink-specific errors
///
/// Errors that occur when bulk-loading tables into the warehouse REST API.
/// These errors don't expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// Failed to reach the warehouse endpoint
    #[error("Failed to connect to warehouse: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Failed to create the dataset
    #[error("Failed to create dataset: {0}")]
    DatasetCreationFailed(String),

    /// Failed to create or replace a table
    #[error("Failed to create table: {0}")]
    TableCreationFailed(String),

    /// Failed to insert rows
    #[error("Failed to insert rows: {0}")]
    InsertFailed(String),

    /// Server rejected individual rows during a batch insert
    #[error("Batch insert rejected rows: {rejected}/{total}")]
    RowsRejected { rejected: usize, total: usize },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Invalid response from the warehouse
    #[error("Invalid response from warehouse: {0}")]
    InvalidResponse(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Relational-sink-specific errors
///
/// Errors that occur when writing tables into PostgreSQL.
/// These errors don't expose driver or pool types.
#[derive(Debug, Error)]
pub enum RelationalError {
    /// Failed to connect to the database
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to build the connection pool
    #[error("Failed to create connection pool: {0}")]
    PoolCreationFailed(String),

    /// Failed to apply the bundled schema
    #[error("Failed to create schema: {0}")]
    SchemaCreationFailed(String),

    /// Failed to truncate a table before reload
    #[error("Failed to truncate table: {0}")]
    TruncateFailed(String),

    /// Failed to insert rows
    #[error("Failed to insert rows: {0}")]
    InsertFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for KarooError {
    fn from(err: std::io::Error) -> Self {
        KarooError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for KarooError {
    fn from(err: serde_json::Error) -> Self {
        KarooError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for KarooError {
    fn from(err: toml::de::Error) -> Self {
        KarooError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_karoo_error_display() {
        let err = KarooError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_warehouse_error_conversion() {
        let warehouse_err = WarehouseError::ConnectionFailed("Network error".to_string());
        let karoo_err: KarooError = warehouse_err.into();
        assert!(matches!(karoo_err, KarooError::Warehouse(_)));
    }

    #[test]
    fn test_relational_error_conversion() {
        let relational_err = RelationalError::TruncateFailed("dim_drug".to_string());
        let karoo_err: KarooError = relational_err.into();
        assert!(matches!(karoo_err, KarooError::Relational(_)));
    }

    #[test]
    fn test_rows_rejected_display() {
        let err = WarehouseError::RowsRejected {
            rejected: 3,
            total: 500,
        };
        assert_eq!(err.to_string(), "Batch insert rejected rows: 3/500");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let karoo_err: KarooError = io_err.into();
        assert!(matches!(karoo_err, KarooError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let karoo_err: KarooError = json_err.into();
        assert!(matches!(karoo_err, KarooError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let karoo_err: KarooError = toml_err.into();
        assert!(matches!(karoo_err, KarooError::Configuration(_)));
        assert!(karoo_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_karoo_error_implements_std_error() {
        let err = KarooError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_warehouse_error_implements_std_error() {
        let err = WarehouseError::AuthenticationFailed("expired token".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_relational_error_implements_std_error() {
        let err = RelationalError::ConnectionFailed("refused".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
