//! Output sink integrations for Karoo.
//!
//! This module provides adapters for the output backends:
//!
//! - [`files`] - CSV files plus a generated data dictionary
//! - [`warehouse`] - BigQuery-style REST bulk loading
//! - [`postgresql`] - PostgreSQL truncate-and-reload
//! - [`sink`] - The shared [`sink::TableSink`] trait and factory
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies
//! and enable testing with mock implementations. The sink layer uses
//! trait-based abstraction so the export coordinator never knows which
//! backend it is writing to.
//!
//! # Selecting a sink
//!
//! ```rust,no_run
//! use karoo::adapters::sink::create_sink;
//! use karoo::config::KarooConfig;
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = KarooConfig::default();
//! let sink = create_sink(&config, Uuid::new_v4()).await?;
//! sink.prepare().await?;
//! # Ok(())
//! # }
//! ```

pub mod files;
pub mod postgresql;
pub mod sink;
pub mod warehouse;
