//! PostgreSQL output adapter
//!
//! Connection-pooled relational sink: bundled DDL, truncate-then-reload,
//! typed multi-row inserts.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLSink;
pub use client::PostgreSQLClient;
