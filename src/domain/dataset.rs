//! In-memory generated dataset
//!
//! Holds all twelve tables produced by one generation run and exposes them
//! uniformly to the sinks as JSON rows keyed by [`TableKind`].

use serde::Serialize;
use serde_json::Value;

use super::dimension::{CalendarRow, DrugRow, FacilityRow, PatientRow, SupplierRow};
use super::fact::{
    DiagnosisRow, DispenseRow, FinancialRow, InventoryRow, MedOrderRow, ProcurementRow, VisitRow,
};
use super::tables::TableKind;
use super::Result;

/// Everything one run generates, in generation order
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub facilities: Vec<FacilityRow>,
    pub patients: Vec<PatientRow>,
    pub drugs: Vec<DrugRow>,
    pub suppliers: Vec<SupplierRow>,
    pub calendar: Vec<CalendarRow>,
    pub visits: Vec<VisitRow>,
    pub diagnoses: Vec<DiagnosisRow>,
    pub med_orders: Vec<MedOrderRow>,
    pub dispenses: Vec<DispenseRow>,
    pub inventory: Vec<InventoryRow>,
    pub financial: Vec<FinancialRow>,
    pub procurement: Vec<ProcurementRow>,
}

fn to_json_rows<T: Serialize>(rows: &[T]) -> Result<Vec<Value>> {
    rows.iter()
        .map(|row| serde_json::to_value(row).map_err(Into::into))
        .collect()
}

impl Dataset {
    /// Number of rows in the given table
    pub fn row_count(&self, kind: TableKind) -> usize {
        match kind {
            TableKind::Facility => self.facilities.len(),
            TableKind::PatientPseudo => self.patients.len(),
            TableKind::Drug => self.drugs.len(),
            TableKind::Supplier => self.suppliers.len(),
            TableKind::Calendar => self.calendar.len(),
            TableKind::Visit => self.visits.len(),
            TableKind::Diagnosis => self.diagnoses.len(),
            TableKind::MedOrder => self.med_orders.len(),
            TableKind::Dispense => self.dispenses.len(),
            TableKind::InventoryDaily => self.inventory.len(),
            TableKind::FinancialTransaction => self.financial.len(),
            TableKind::ProcurementOrder => self.procurement.len(),
        }
    }

    /// Total row count across all tables
    pub fn total_rows(&self) -> usize {
        TableKind::ALL.iter().map(|k| self.row_count(*k)).sum()
    }

    /// Serializes one table's rows as JSON objects for a sink
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a row cannot be converted
    pub fn rows_json(&self, kind: TableKind) -> Result<Vec<Value>> {
        match kind {
            TableKind::Facility => to_json_rows(&self.facilities),
            TableKind::PatientPseudo => to_json_rows(&self.patients),
            TableKind::Drug => to_json_rows(&self.drugs),
            TableKind::Supplier => to_json_rows(&self.suppliers),
            TableKind::Calendar => to_json_rows(&self.calendar),
            TableKind::Visit => to_json_rows(&self.visits),
            TableKind::Diagnosis => to_json_rows(&self.diagnoses),
            TableKind::MedOrder => to_json_rows(&self.med_orders),
            TableKind::Dispense => to_json_rows(&self.dispenses),
            TableKind::InventoryDaily => to_json_rows(&self.inventory),
            TableKind::FinancialTransaction => to_json_rows(&self.financial),
            TableKind::ProcurementOrder => to_json_rows(&self.procurement),
        }
    }
}
