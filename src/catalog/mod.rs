//! Reference catalogues for the South African healthcare domain
//!
//! Fixed lookup data the generators draw from: provinces and towns,
//! the drug formulary, ICD-10 diagnoses with treatment links, the
//! supplier registry and public holidays. Everything here is constant
//! and seed-independent; randomness lives in [`crate::core::generate`].

pub mod diagnoses;
pub mod drugs;
pub mod geography;
pub mod holidays;
pub mod suppliers;

pub use diagnoses::{DiagnosisEntry, DIAGNOSES};
pub use drugs::{DrugEntry, FORMULARY};
pub use geography::{Province, ProvinceBounds, PROVINCES};
pub use holidays::PUBLIC_HOLIDAYS;
pub use suppliers::{SupplierEntry, SUPPLIERS};
