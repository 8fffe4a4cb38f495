//! Domain models and types for Karoo.
//!
//! This module contains the core domain models, types, and business rules
//! for the generated star schema.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`FacilityId`], [`PatientId`], [`DrugId`],
//!   [`SupplierId`], [`VisitId`], [`OrderId`])
//! - **Table metadata** ([`TableKind`], [`Column`], [`ColumnType`]) shared by
//!   every sink
//! - **Row models** for the five dimension and seven fact tables
//! - **Error types** ([`KarooError`], [`WarehouseError`], [`RelationalError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Karoo uses the newtype pattern for cross-referenced identifiers to prevent
//! mixing different ID types:
//!
//! ```rust
//! use karoo::domain::{DrugId, FacilityId};
//!
//! let facility = FacilityId::from_seq(7);
//! let drug = DrugId::from_seq(4);
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: FacilityId = drug;  // Compile error!
//! assert_eq!(facility.as_str(), "FAC0007");
//! assert_eq!(drug.as_str(), "DRUG0004");
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, KarooError>`]:
//!
//! ```rust
//! use karoo::domain::{KarooError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(KarooError::Generation("empty calendar".to_string()))
//! }
//! assert!(example().is_err());
//! ```

pub mod dataset;
pub mod dimension;
pub mod errors;
pub mod fact;
pub mod ids;
pub mod result;
pub mod tables;

// Re-export commonly used types for convenience
pub use dataset::Dataset;
pub use dimension::{CalendarRow, DrugRow, FacilityRow, PatientRow, SupplierRow};
pub use errors::{KarooError, RelationalError, WarehouseError};
pub use fact::{
    DiagnosisRow, DispenseRow, FinancialRow, InventoryRow, MedOrderRow, ProcurementRow, VisitRow,
};
pub use ids::{DrugId, FacilityId, OrderId, PatientId, SupplierId, VisitId};
pub use result::Result;
pub use tables::{Column, ColumnType, TableKind};
