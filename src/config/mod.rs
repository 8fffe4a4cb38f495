//! Configuration management for Karoo.
//!
//! This module provides TOML-based configuration loading, parsing and
//! validation.
//!
//! # Overview
//!
//! Karoo uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `KAROO_*` environment overrides on top of the file
//! - Default values for every setting (no file is required at all)
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use karoo::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from file
//! let config = load_config("karoo.toml")?;
//!
//! // Access configuration sections
//! println!("Facilities: {}", config.generator.facilities);
//! println!("Output target: {}", config.output.target);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! The configuration is organized into sections:
//!
//! - [`GeneratorConfig`] - Dataset shape (facilities, patients, drugs, date
//!   range) and the master seed
//! - [`OutputConfig`] - Active sink plus [`FilesConfig`], [`WarehouseConfig`]
//!   and [`RelationalConfig`] sections
//! - [`LoggingConfig`] - Log level, optional JSON file output
//!
//! # Example Configuration
//!
//! ```toml
//! [generator]
//! facilities = 25
//! patients = 5000
//! drugs = 30
//! seed = 42
//! start_date = "2024-01-01"
//! end_date = "2024-12-31"
//!
//! [output]
//! target = "relational"
//!
//! [output.relational]
//! connection_string = "${KAROO_CONNECTION_STRING}"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax inside the file for substitution, or set
//! `KAROO_<SECTION>_<KEY>` variables to override individual settings:
//!
//! ```bash
//! export KAROO_GENERATOR_SEED=1234
//! export KAROO_RELATIONAL_CONNECTION_STRING="postgresql://karoo@localhost/erp"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    FilesConfig, GeneratorConfig, KarooConfig, LoggingConfig, OutputConfig, OutputTarget,
    RelationalConfig, WarehouseConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
