//! File output adapter
//!
//! CSV files plus a generated data dictionary, one file per table.

pub mod dictionary;
pub mod writer;

pub use writer::FileSink;
