//! PostgreSQL client implementation
//!
//! This module provides the pooled client used by the relational sink.

use crate::config::schema::RelationalConfig;
use crate::domain::errors::RelationalError;
use crate::domain::{KarooError, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::NoTls;

/// Pooled PostgreSQL client
#[derive(Debug)]
pub struct PostgreSQLClient {
    pool: Pool,
    config: RelationalConfig,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// Parses the connection string and builds the connection pool. No
    /// connection is opened until the pool is first used.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the pool
    /// cannot be built.
    pub async fn new(config: RelationalConfig) -> Result<Self> {
        let pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .as_ref()
            .parse()
            .map_err(|e| {
                KarooError::Configuration(format!("Invalid PostgreSQL connection string: {e}"))
            })?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let timeout = Duration::from_secs(config.connection_timeout_seconds);
        let pool = Pool::builder(manager)
            .runtime(Runtime::Tokio1)
            .max_size(config.max_connections)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .build()
            .map_err(|e| RelationalError::PoolCreationFailed(e.to_string()))?;

        tracing::debug!(
            connection = %config.connection_string_safe(),
            max_connections = config.max_connections,
            "PostgreSQL pool created"
        );

        Ok(Self { pool, config })
    }

    /// Test the connection to PostgreSQL
    ///
    /// Gets a connection from the pool and executes a trivial query.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be established.
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| RelationalError::ConnectionFailed(format!("Connection test failed: {e}")))?;

        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    /// Ensure the database schema exists
    ///
    /// Runs the bundled migration to create the twelve output tables if
    /// they don't exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.get_connection().await?;

        let migration_sql = include_str!("../../../migrations/001_schema.sql");

        client
            .batch_execute(migration_sql)
            .await
            .map_err(|e| RelationalError::SchemaCreationFailed(e.to_string()))?;

        tracing::info!("PostgreSQL schema initialized successfully");
        Ok(())
    }

    /// Get a connection from the pool
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            RelationalError::ConnectionFailed(format!("Failed to get connection from pool: {e}"))
                .into()
        })
    }

    /// Rows per insert statement
    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    /// Connection string with credentials masked, safe for logs
    pub fn connection_string_safe(&self) -> String {
        self.config.connection_string_safe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config(connection_string: &str) -> RelationalConfig {
        RelationalConfig {
            connection_string: secret_string(connection_string.to_string()),
            max_connections: 4,
            connection_timeout_seconds: 5,
            batch_size: 500,
        }
    }

    #[tokio::test]
    async fn test_new_rejects_malformed_connection_string() {
        let result = PostgreSQLClient::new(config("not a connection string")).await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid PostgreSQL connection string"));
    }

    #[tokio::test]
    async fn test_new_builds_pool_without_connecting() {
        // Pool construction is lazy, so an unreachable host is fine here.
        let client =
            PostgreSQLClient::new(config("postgresql://karoo:pw@localhost:1/none")).await;
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_connection_string_safe_redacts_password() {
        let client = PostgreSQLClient::new(config("postgresql://karoo:pw@dbhost:5432/erp"))
            .await
            .unwrap();
        let safe = client.connection_string_safe();
        assert_eq!(safe, "postgresql://***@dbhost:5432/erp");
        assert!(!safe.contains("pw"));
    }
}
