// Karoo - Synthetic Healthcare ERP Data Generator
// Copyright (c) 2025 Karoo Contributors
// Licensed under the MIT License

//! # Karoo - Synthetic Healthcare ERP Data
//!
//! Karoo generates a reproducible synthetic healthcare ERP dataset, modeled
//! on a South African public-health network of clinics and hospitals, and
//! writes it to local CSV files, a warehouse bulk-load API or PostgreSQL.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Generating** five dimension and seven fact tables with referential
//!   integrity and seeded, reproducible sampling
//! - **Rolling forward** daily pharmacy inventory so stock levels reconcile
//!   day over day
//! - **Writing** every table through one of three interchangeable sinks
//!
//! ## Architecture
//!
//! Karoo follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (generation, export coordination)
//! - [`catalog`] - Curated reference data the samplers draw from
//! - [`adapters`] - Sink integrations (files, warehouse, PostgreSQL)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use karoo::config::KarooConfig;
//! use karoo::core::export::ExportCoordinator;
//! use karoo::core::generate::{GenerationParams, Generator};
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration (defaults write CSV files to ./data)
//!     let config = KarooConfig::default();
//!
//!     // Generate the dataset in memory
//!     let params = GenerationParams::from_config(&config.generator, Utc::now().date_naive());
//!     let generator = Generator::new(params)?;
//!     let (dataset, summary) = generator.run(Utc::now())?;
//!
//!     // Write every table to the configured sink
//!     let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//!     let coordinator = ExportCoordinator::new(&config, summary.run_id, shutdown_rx).await?;
//!     let report = coordinator.execute_export(&dataset).await?;
//!
//!     println!("Wrote {} rows", report.rows_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Reproducibility
//!
//! Every random draw comes from a named stream derived from the master seed,
//! so the same seed and shape always produce byte-identical data:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use karoo::core::generate::{GenerationParams, Generator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = GenerationParams {
//!     facilities: 1,
//!     patients: 10,
//!     drugs: 5,
//!     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     end_date: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
//!     seed: 42,
//!     patient_salt: "patient".to_string(),
//!     visits_per_facility: (5, 10),
//! };
//!
//! let load_ts = "2024-06-01T08:00:00Z".parse().unwrap();
//! let (first, _) = Generator::new(params.clone())?.run(load_ts)?;
//! let (second, _) = Generator::new(params)?.run(load_ts)?;
//! assert_eq!(first.visits, second.visits);
//! # Ok(())
//! # }
//! ```
//!
//! ### Table Metadata
//!
//! All twelve tables share one metadata surface, which every sink renders
//! from. Column order in CSV headers, warehouse schemas and SQL DDL is
//! identical:
//!
//! ```rust
//! use karoo::domain::TableKind;
//!
//! assert_eq!(TableKind::ALL.len(), 12);
//! assert_eq!(TableKind::Visit.table_name(), "fact_visit");
//! assert!(TableKind::Drug.is_dimension());
//! ```
//!
//! ## Error Handling
//!
//! Karoo uses the [`domain::KarooError`] type for all errors:
//!
//! ```rust
//! use karoo::domain::{KarooError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(KarooError::Generation("empty drug pool".to_string()))
//! }
//! assert!(example().is_err());
//! ```
//!
//! ## Logging
//!
//! Karoo uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(table = "fact_visit", rows = 48_210, "Table written");
//! warn!(rows_failed = 3, "Rows rejected by the sink");
//! ```

pub mod adapters;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
