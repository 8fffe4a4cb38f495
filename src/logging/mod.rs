//! Logging infrastructure for karoo
//!
//! This module provides structured logging built on the `tracing`
//! ecosystem:
//!
//! - [`structured`] - Logging initialization with console and optional
//!   JSON file output

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
