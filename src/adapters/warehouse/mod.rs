//! Warehouse output adapter
//!
//! BigQuery-style REST bulk loading: dataset create-if-absent, explicit
//! table schemas derived from the column metadata, and streaming insert-all
//! batches with run-scoped insert ids.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::WarehouseSink;
pub use client::WarehouseClient;
