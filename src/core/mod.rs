//! Core business logic for Karoo.
//!
//! This module contains the generation pipeline and its supporting
//! machinery.
//!
//! # Modules
//!
//! - [`generate`] - Table generators, orchestration and run summaries
//! - [`export`] - Sink write coordination and export summaries
//! - [`rng`] - Deterministic named random streams derived from the seed
//!
//! # Generation Workflow
//!
//! The typical generation workflow:
//!
//! 1. **Validate**: Check the generation parameters
//! 2. **Dimensions**: Generate suppliers, drugs, facilities, patients, calendar
//! 3. **Visit Chain**: Generate visits, then diagnoses, orders and dispenses
//! 4. **Rollforward**: Fold daily inventory snapshots over the calendar
//! 5. **ERP Facts**: Generate financial transactions and procurement orders
//! 6. **Report**: Build a generation summary
//!
//! # Example
//!
//! ```rust,no_run
//! use karoo::core::generate::{GenerationParams, Generator};
//! use chrono::{NaiveDate, Utc};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = GenerationParams {
//!     facilities: 25,
//!     patients: 5000,
//!     drugs: 30,
//!     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
//!     seed: 42,
//!     patient_salt: "patient".to_string(),
//!     visits_per_facility: (200, 600),
//! };
//!
//! let generator = Generator::new(params)?;
//! let (dataset, summary) = generator.run(Utc::now())?;
//!
//! println!("Total rows: {}", summary.total_rows);
//! println!("Visits: {}", dataset.visits.len());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod generate;
pub mod rng;
