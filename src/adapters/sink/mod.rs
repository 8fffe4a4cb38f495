//! Output sink abstraction
//!
//! This module defines the [`TableSink`] trait implemented by every output
//! backend (files, warehouse, relational) and the factory that selects one
//! from the configuration.

pub mod factory;
pub mod traits;

// Re-export commonly used items
pub use factory::create_sink;
pub use traits::{TableSink, WriteFailure, WriteReport};
