//! Fact table rows
//!
//! Typed rows for the seven fact tables. Field order matches the column
//! metadata in [`super::tables`]. Rows are created once by their generator
//! and never mutated afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::ids::{DrugId, FacilityId, OrderId, PatientId, SupplierId, VisitId};

/// One patient encounter (`fact_visit`)
///
/// Carries the provider-assigned diagnosis next to a simulated AI
/// classification that may diverge from it, plus an optional secondary
/// diagnosis with the same structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitRow {
    pub visit_id: VisitId,
    pub patient_id: PatientId,
    pub facility_id: FacilityId,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub arrival_time: DateTime<Utc>,
    pub arrival_delay_minutes: Option<i64>,
    pub triage_level: i64,
    pub visit_start_time: DateTime<Utc>,
    pub visit_end_time: DateTime<Utc>,
    pub visit_duration_minutes: i64,
    pub visit_type: &'static str,
    pub primary_icd10_code: &'static str,
    pub primary_icd10_description: &'static str,
    pub primary_category_code: &'static str,
    pub primary_category_name: &'static str,
    pub primary_condition_type: &'static str,
    pub primary_ai_icd10_code: &'static str,
    pub primary_ai_icd10_description: &'static str,
    pub primary_classification_accuracy: f64,
    pub primary_ai_provider_match: bool,
    pub secondary_icd10_code: Option<&'static str>,
    pub secondary_icd10_description: Option<&'static str>,
    pub secondary_category_code: Option<&'static str>,
    pub secondary_category_name: Option<&'static str>,
    pub secondary_condition_type: Option<&'static str>,
    pub secondary_ai_icd10_code: Option<&'static str>,
    pub secondary_ai_icd10_description: Option<&'static str>,
    pub secondary_classification_accuracy: Option<f64>,
    pub secondary_ai_provider_match: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub partition_dt: NaiveDate,
}

/// One diagnosis assigned during a visit (`fact_diagnosis`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisRow {
    pub visit_id: VisitId,
    pub icd10_code: &'static str,
    pub icd10_description: &'static str,
    pub category_code: &'static str,
    pub category_name: &'static str,
    pub condition_type: &'static str,
    pub is_primary: bool,
    pub diagnosis_seq: i64,
    pub created_at: DateTime<Utc>,
}

/// One medication prescription (`fact_med_order`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedOrderRow {
    pub order_id: OrderId,
    pub visit_id: VisitId,
    pub patient_id: PatientId,
    pub facility_id: FacilityId,
    pub drug_id: DrugId,
    pub quantity_units: i64,
    pub days_supply: i64,
    pub repeats: i64,
    pub order_time: DateTime<Utc>,
    pub chronic_refill_flag: bool,
    pub created_at: DateTime<Utc>,
    pub partition_dt: NaiveDate,
}

/// One dispensing event (`fact_dispense`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispenseRow {
    pub dispense_id: String,
    pub order_id: OrderId,
    pub patient_id: PatientId,
    pub facility_id: FacilityId,
    pub drug_id: DrugId,
    pub quantity_units: i64,
    pub dispense_time: DateTime<Utc>,
    pub stock_source: &'static str,
    pub created_at: DateTime<Utc>,
    pub partition_dt: NaiveDate,
}

/// One daily stock snapshot (`fact_inventory_daily`)
///
/// `closing_stock_units` for a (facility, drug) pair becomes the next day's
/// `opening_stock_units`; the rollforward clamps negative stock to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryRow {
    pub facility_id: FacilityId,
    pub drug_id: DrugId,
    pub dt: NaiveDate,
    pub opening_stock_units: i64,
    pub receipts_units: i64,
    pub issues_units: i64,
    pub dispensed_units: i64,
    pub adjustments_units: i64,
    pub closing_stock_units: i64,
    pub stockout_flag: bool,
    pub days_of_cover: f64,
    pub on_order_units: i64,
    pub backorder_units: i64,
    pub created_at: DateTime<Utc>,
}

/// One financial movement (`fact_financial_transaction`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialRow {
    pub transaction_id: String,
    pub facility_id: FacilityId,
    pub drug_id: DrugId,
    pub transaction_type: &'static str,
    pub quantity: i64,
    pub unit_cost_zar: f64,
    pub total_amount_zar: f64,
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub partition_dt: NaiveDate,
}

/// One purchase order to a supplier (`fact_procurement_order`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcurementRow {
    pub procurement_order_id: String,
    pub supplier_id: SupplierId,
    pub drug_id: DrugId,
    pub quantity: i64,
    pub unit_cost_zar: f64,
    pub total_amount_zar: f64,
    pub order_date: NaiveDate,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub partition_dt: NaiveDate,
}
