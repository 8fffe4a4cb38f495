//! Dimension table rows
//!
//! Typed rows for the five dimension tables. Field order matches the column
//! metadata in [`super::tables`]; catalog-sourced values keep their
//! `&'static str` lifetime so dimension generation allocates only where a
//! value is actually constructed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::ids::{DrugId, FacilityId, PatientId, SupplierId};

/// One healthcare facility (`dim_facility`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityRow {
    pub facility_id: FacilityId,
    pub facility_name: String,
    pub province: &'static str,
    pub district: String,
    pub latitude: f64,
    pub longitude: f64,
    pub level: &'static str,
    pub is_active: bool,
    pub opened_date: NaiveDate,
    pub closed_date: Option<NaiveDate>,
    pub bed_capacity: Option<i64>,
    pub staff_count: i64,
    pub load_ts: DateTime<Utc>,
}

/// One pseudonymized patient (`dim_patient_pseudo`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRow {
    pub patient_id: PatientId,
    pub birth_year: i64,
    pub sex: &'static str,
    pub home_province: &'static str,
    pub chronic_program_enrolled: bool,
    pub enrollment_date: Option<NaiveDate>,
    pub medical_aid: &'static str,
    pub load_ts: DateTime<Utc>,
}

/// One formulary entry (`dim_drug`)
///
/// Curated entries carry catalog values verbatim; backfilled entries are
/// synthesized, which is why the string fields are owned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrugRow {
    pub drug_id: DrugId,
    pub atc_code: String,
    pub generic_name: String,
    pub strength: String,
    pub form: &'static str,
    pub pack_size: i64,
    pub cold_chain_required: bool,
    pub is_essential_list: bool,
    pub unit_cost_zar: f64,
    pub supplier_id: SupplierId,
    pub load_ts: DateTime<Utc>,
}

/// One supplier (`dim_supplier`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierRow {
    pub supplier_id: SupplierId,
    pub supplier_name: &'static str,
    pub country: &'static str,
    pub supplier_type: &'static str,
    pub size_category: &'static str,
    pub contact_email: String,
    pub contact_phone: String,
    pub is_active: bool,
    pub load_ts: DateTime<Utc>,
}

/// One calendar day (`dim_calendar`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarRow {
    pub dt: NaiveDate,
    pub dow: i64,
    pub week: i64,
    pub month: i64,
    pub quarter: i64,
    pub year: i64,
    pub is_weekend: bool,
    pub is_public_holiday: bool,
    pub is_payday: bool,
    pub school_term: i64,
    pub season: &'static str,
}
