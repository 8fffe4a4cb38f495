//! Output table definitions
//!
//! One authoritative description of the twelve output tables: name, write
//! order, and the ordered column set with logical types. Every sink derives
//! its own representation from this metadata. CSV headers, PostgreSQL DDL
//! bindings, warehouse table schemas and the generated data dictionary all
//! read from here, so the wire formats can never drift apart.

use std::fmt;

/// Logical column type, mapped per sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Int,
    Float,
    Bool,
    Date,
    Timestamp,
}

impl ColumnType {
    /// PostgreSQL type used by the bundled DDL and insert bindings
    pub fn postgres_type(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Int => "BIGINT",
            ColumnType::Float => "DOUBLE PRECISION",
            ColumnType::Bool => "BOOLEAN",
            ColumnType::Date => "DATE",
            ColumnType::Timestamp => "TIMESTAMPTZ",
        }
    }

    /// Warehouse (BigQuery-style) schema type
    pub fn warehouse_type(&self) -> &'static str {
        match self {
            ColumnType::Text => "STRING",
            ColumnType::Int => "INT64",
            ColumnType::Float => "FLOAT64",
            ColumnType::Bool => "BOOL",
            ColumnType::Date => "DATE",
            ColumnType::Timestamp => "TIMESTAMP",
        }
    }

    /// Human-readable label for the data dictionary
    pub fn dictionary_label(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Int => "integer",
            ColumnType::Float => "float",
            ColumnType::Bool => "boolean",
            ColumnType::Date => "date",
            ColumnType::Timestamp => "timestamp (UTC)",
        }
    }
}

/// A single output column: name, logical type, nullability and a
/// one-line description for the data dictionary
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub description: &'static str,
}

const fn col(name: &'static str, ty: ColumnType, description: &'static str) -> Column {
    Column {
        name,
        ty,
        nullable: false,
        description,
    }
}

const fn opt(name: &'static str, ty: ColumnType, description: &'static str) -> Column {
    Column {
        name,
        ty,
        nullable: true,
        description,
    }
}

use ColumnType::{Bool, Date, Float, Int, Text, Timestamp};

const FACILITY_COLUMNS: &[Column] = &[
    col("facility_id", Text, "Facility identifier (FAC + sequence)"),
    col("facility_name", Text, "Facility name derived from town and level"),
    col("province", Text, "One of the nine South African provinces"),
    col("district", Text, "Health district the facility belongs to"),
    col("latitude", Float, "Latitude inside the province bounding box"),
    col("longitude", Float, "Longitude inside the province bounding box"),
    col("level", Text, "clinic | CHC | district/regional/tertiary hospital"),
    col("is_active", Bool, "Whether the facility is operational"),
    col("opened_date", Date, "Date the facility opened"),
    opt("closed_date", Date, "Date the facility closed, if ever"),
    opt("bed_capacity", Int, "Bed count (hospital levels only)"),
    col("staff_count", Int, "Total staff headcount"),
    col("load_ts", Timestamp, "Run load timestamp"),
];

const PATIENT_COLUMNS: &[Column] = &[
    col("patient_id", Text, "Pseudonymous id (12 uppercase hex chars)"),
    col("birth_year", Int, "Year of birth"),
    col("sex", Text, "M | F | Other | Unknown"),
    col("home_province", Text, "Home province weighted by population share"),
    col("chronic_program_enrolled", Bool, "Chronic disease programme flag"),
    opt("enrollment_date", Date, "Programme enrollment date, if enrolled"),
    col("medical_aid", Text, "Medical aid scheme or None"),
    col("load_ts", Timestamp, "Run load timestamp"),
];

const DRUG_COLUMNS: &[Column] = &[
    col("drug_id", Text, "Drug identifier (DRUG + sequence)"),
    col("atc_code", Text, "WHO ATC classification code"),
    col("generic_name", Text, "Generic (INN) drug name"),
    col("strength", Text, "Dose strength, e.g. 500 mg"),
    col("form", Text, "Dosage form, e.g. tablet, vial"),
    col("pack_size", Int, "Units per pack"),
    col("cold_chain_required", Bool, "Requires refrigerated storage"),
    col("is_essential_list", Bool, "On the essential medicines list"),
    col("unit_cost_zar", Float, "Unit cost in South African rand"),
    col("supplier_id", Text, "Primary supplier reference"),
    col("load_ts", Timestamp, "Run load timestamp"),
];

const SUPPLIER_COLUMNS: &[Column] = &[
    col("supplier_id", Text, "Supplier identifier (SUP + sequence)"),
    col("supplier_name", Text, "Registered supplier name"),
    col("country", Text, "Country of origin"),
    col("supplier_type", Text, "Public or private ownership"),
    col("size_category", Text, "Small | Medium | Large"),
    col("contact_email", Text, "Derived contact address"),
    col("contact_phone", Text, "Contact phone number"),
    col("is_active", Bool, "Whether the supplier is active"),
    col("load_ts", Timestamp, "Run load timestamp"),
];

const CALENDAR_COLUMNS: &[Column] = &[
    col("dt", Date, "Calendar date"),
    col("dow", Int, "ISO day of week (Monday = 1)"),
    col("week", Int, "ISO week number"),
    col("month", Int, "Month (1-12)"),
    col("quarter", Int, "Quarter (1-4)"),
    col("year", Int, "Calendar year"),
    col("is_weekend", Bool, "Saturday or Sunday"),
    col("is_public_holiday", Bool, "South African public holiday"),
    col("is_payday", Bool, "15th or last day of the month"),
    col("school_term", Int, "School term index (1-4)"),
    col("season", Text, "Southern-hemisphere season"),
];

const VISIT_COLUMNS: &[Column] = &[
    col("visit_id", Text, "Visit identifier (VISIT + sequence)"),
    col("patient_id", Text, "Patient reference"),
    col("facility_id", Text, "Facility reference"),
    opt("scheduled_time", Timestamp, "Booked time (scheduled visits only)"),
    col("arrival_time", Timestamp, "Actual arrival, always on the visit date"),
    opt("arrival_delay_minutes", Int, "Arrival minus scheduled, in minutes"),
    col("triage_level", Int, "Triage level 1 (critical) to 5 (minor)"),
    col("visit_start_time", Timestamp, "Consultation start"),
    col("visit_end_time", Timestamp, "Consultation end"),
    col("visit_duration_minutes", Int, "Consultation duration in minutes"),
    col("visit_type", Text, "acute | chronic | follow-up | emergency | routine"),
    col("primary_icd10_code", Text, "Provider-assigned primary ICD-10 code"),
    col("primary_icd10_description", Text, "Primary diagnosis description"),
    col("primary_category_code", Text, "Primary diagnosis category code"),
    col("primary_category_name", Text, "Primary diagnosis category name"),
    col("primary_condition_type", Text, "Acute or Chronic"),
    col("primary_ai_icd10_code", Text, "AI-classified primary ICD-10 code"),
    col("primary_ai_icd10_description", Text, "AI-classified primary description"),
    col("primary_classification_accuracy", Float, "AI confidence score"),
    col("primary_ai_provider_match", Bool, "AI code equals provider code"),
    opt("secondary_icd10_code", Text, "Provider-assigned secondary ICD-10 code"),
    opt("secondary_icd10_description", Text, "Secondary diagnosis description"),
    opt("secondary_category_code", Text, "Secondary diagnosis category code"),
    opt("secondary_category_name", Text, "Secondary diagnosis category name"),
    opt("secondary_condition_type", Text, "Acute or Chronic"),
    opt("secondary_ai_icd10_code", Text, "AI-classified secondary ICD-10 code"),
    opt("secondary_ai_icd10_description", Text, "AI-classified secondary description"),
    opt("secondary_classification_accuracy", Float, "AI confidence score"),
    opt("secondary_ai_provider_match", Bool, "AI code equals provider code"),
    col("created_at", Timestamp, "Run load timestamp"),
    col("partition_dt", Date, "Assigned calendar date"),
];

const DIAGNOSIS_COLUMNS: &[Column] = &[
    col("visit_id", Text, "Visit reference"),
    col("icd10_code", Text, "ICD-10 diagnosis code"),
    col("icd10_description", Text, "Diagnosis description"),
    col("category_code", Text, "Diagnosis category code"),
    col("category_name", Text, "Diagnosis category name"),
    col("condition_type", Text, "Acute or Chronic"),
    col("is_primary", Bool, "True for the first diagnosis of a visit"),
    col("diagnosis_seq", Int, "1-based position within the visit"),
    col("created_at", Timestamp, "Visit arrival time"),
];

const MED_ORDER_COLUMNS: &[Column] = &[
    col("order_id", Text, "Order identifier (ORD + sequence)"),
    col("visit_id", Text, "Visit reference"),
    col("patient_id", Text, "Patient reference"),
    col("facility_id", Text, "Facility reference"),
    col("drug_id", Text, "Ordered drug reference"),
    col("quantity_units", Int, "Ordered quantity in units"),
    col("days_supply", Int, "Days the quantity should last"),
    col("repeats", Int, "Authorised repeat count"),
    col("order_time", Timestamp, "Placed inside the visit window"),
    col("chronic_refill_flag", Bool, "Visit type was chronic"),
    col("created_at", Timestamp, "Run load timestamp"),
    col("partition_dt", Date, "Order date"),
];

const DISPENSE_COLUMNS: &[Column] = &[
    col("dispense_id", Text, "Dispense identifier (DISP + sequence)"),
    col("order_id", Text, "Order reference"),
    col("patient_id", Text, "Patient reference"),
    col("facility_id", Text, "Facility reference"),
    col("drug_id", Text, "Dispensed drug reference"),
    col("quantity_units", Int, "Dispensed quantity (80-100% of ordered)"),
    col("dispense_time", Timestamp, "Order time plus pharmacy delay"),
    col("stock_source", Text, "pharmacy | main_store | cabinet | CCMDD | ward_stock"),
    col("created_at", Timestamp, "Run load timestamp"),
    col("partition_dt", Date, "Dispense date"),
];

const INVENTORY_COLUMNS: &[Column] = &[
    col("facility_id", Text, "Facility reference"),
    col("drug_id", Text, "Drug reference"),
    col("dt", Date, "Snapshot date"),
    col("opening_stock_units", Int, "Stock at start of day"),
    col("receipts_units", Int, "Units received during the day"),
    col("issues_units", Int, "Units issued to wards"),
    col("dispensed_units", Int, "Units dispensed to patients"),
    col("adjustments_units", Int, "Stock-take adjustment (may be negative)"),
    col("closing_stock_units", Int, "Stock at end of day, floored at zero"),
    col("stockout_flag", Bool, "Closing stock reached zero"),
    col("days_of_cover", Float, "Closing stock over daily dispensed demand"),
    col("on_order_units", Int, "Replenishment on order when stock is low"),
    col("backorder_units", Int, "Unmet demand during a stockout"),
    col("created_at", Timestamp, "Run load timestamp"),
];

const FINANCIAL_COLUMNS: &[Column] = &[
    col("transaction_id", Text, "Transaction identifier (TXN + sequence)"),
    col("facility_id", Text, "Facility reference"),
    col("drug_id", Text, "Drug reference"),
    col("transaction_type", Text, "purchase | sale | adjustment | transfer | return"),
    col("quantity", Int, "Transacted quantity in units"),
    col("unit_cost_zar", Float, "Drug unit cost in rand"),
    col("total_amount_zar", Float, "Signed total amount in rand"),
    col("transaction_date", Date, "Transaction date"),
    col("created_at", Timestamp, "Run load timestamp"),
    col("partition_dt", Date, "Transaction date"),
];

const PROCUREMENT_COLUMNS: &[Column] = &[
    col("procurement_order_id", Text, "Procurement identifier (PROC + sequence)"),
    col("supplier_id", Text, "Supplier reference"),
    col("drug_id", Text, "Drug reference"),
    col("quantity", Int, "Ordered quantity in units"),
    col("unit_cost_zar", Float, "Drug unit cost in rand"),
    col("total_amount_zar", Float, "Order total in rand"),
    col("order_date", Date, "Order placement date"),
    col("status", Text, "pending | approved | ordered | shipped | delivered | cancelled"),
    col("created_at", Timestamp, "Run load timestamp"),
    col("partition_dt", Date, "Order date"),
];

/// The twelve output tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Facility,
    PatientPseudo,
    Drug,
    Supplier,
    Calendar,
    Visit,
    Diagnosis,
    MedOrder,
    Dispense,
    InventoryDaily,
    FinancialTransaction,
    ProcurementOrder,
}

impl TableKind {
    /// All tables in write order (dimensions first, then facts)
    pub const ALL: [TableKind; 12] = [
        TableKind::Facility,
        TableKind::PatientPseudo,
        TableKind::Drug,
        TableKind::Supplier,
        TableKind::Calendar,
        TableKind::Visit,
        TableKind::Diagnosis,
        TableKind::MedOrder,
        TableKind::Dispense,
        TableKind::InventoryDaily,
        TableKind::FinancialTransaction,
        TableKind::ProcurementOrder,
    ];

    /// Destination table name
    pub fn table_name(&self) -> &'static str {
        match self {
            TableKind::Facility => "dim_facility",
            TableKind::PatientPseudo => "dim_patient_pseudo",
            TableKind::Drug => "dim_drug",
            TableKind::Supplier => "dim_supplier",
            TableKind::Calendar => "dim_calendar",
            TableKind::Visit => "fact_visit",
            TableKind::Diagnosis => "fact_diagnosis",
            TableKind::MedOrder => "fact_med_order",
            TableKind::Dispense => "fact_dispense",
            TableKind::InventoryDaily => "fact_inventory_daily",
            TableKind::FinancialTransaction => "fact_financial_transaction",
            TableKind::ProcurementOrder => "fact_procurement_order",
        }
    }

    /// File name used by the files sink
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.table_name())
    }

    /// Whether this is a dimension table
    pub fn is_dimension(&self) -> bool {
        matches!(
            self,
            TableKind::Facility
                | TableKind::PatientPseudo
                | TableKind::Drug
                | TableKind::Supplier
                | TableKind::Calendar
        )
    }

    /// Ordered column metadata
    pub fn columns(&self) -> &'static [Column] {
        match self {
            TableKind::Facility => FACILITY_COLUMNS,
            TableKind::PatientPseudo => PATIENT_COLUMNS,
            TableKind::Drug => DRUG_COLUMNS,
            TableKind::Supplier => SUPPLIER_COLUMNS,
            TableKind::Calendar => CALENDAR_COLUMNS,
            TableKind::Visit => VISIT_COLUMNS,
            TableKind::Diagnosis => DIAGNOSIS_COLUMNS,
            TableKind::MedOrder => MED_ORDER_COLUMNS,
            TableKind::Dispense => DISPENSE_COLUMNS,
            TableKind::InventoryDaily => INVENTORY_COLUMNS,
            TableKind::FinancialTransaction => FINANCIAL_COLUMNS,
            TableKind::ProcurementOrder => PROCUREMENT_COLUMNS,
        }
    }

    /// One-line table description for the data dictionary
    pub fn description(&self) -> &'static str {
        match self {
            TableKind::Facility => "Healthcare facilities across the nine provinces",
            TableKind::PatientPseudo => "Pseudonymized patients with medical aid info",
            TableKind::Drug => "Drug formulary with ZAR costs and suppliers",
            TableKind::Supplier => "Pharmaceutical suppliers, local and international",
            TableKind::Calendar => "Date dimension with SA holidays and seasons",
            TableKind::Visit => "Patient encounters with dual diagnosis classification",
            TableKind::Diagnosis => "ICD-10 diagnoses per visit",
            TableKind::MedOrder => "Medication prescriptions with quantities",
            TableKind::Dispense => "Medication dispensing events",
            TableKind::InventoryDaily => "Daily stock snapshots per facility and drug",
            TableKind::FinancialTransaction => "Drug-related financial movements",
            TableKind::ProcurementOrder => "Purchase orders placed with suppliers",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_lists_twelve_tables() {
        assert_eq!(TableKind::ALL.len(), 12);
        let names: HashSet<&str> = TableKind::ALL.iter().map(|t| t.table_name()).collect();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn test_dimensions_precede_facts() {
        let first_fact = TableKind::ALL
            .iter()
            .position(|t| !t.is_dimension())
            .unwrap();
        assert!(TableKind::ALL[..first_fact].iter().all(|t| t.is_dimension()));
        assert!(TableKind::ALL[first_fact..].iter().all(|t| !t.is_dimension()));
    }

    #[test]
    fn test_table_names_follow_warehouse_convention() {
        for kind in TableKind::ALL {
            let name = kind.table_name();
            if kind.is_dimension() {
                assert!(name.starts_with("dim_"), "{name}");
            } else {
                assert!(name.starts_with("fact_"), "{name}");
            }
            assert_eq!(kind.file_name(), format!("{name}.csv"));
        }
    }

    #[test]
    fn test_column_names_unique_per_table() {
        for kind in TableKind::ALL {
            let mut seen = HashSet::new();
            for column in kind.columns() {
                assert!(
                    seen.insert(column.name),
                    "duplicate column {} in {}",
                    column.name,
                    kind
                );
            }
            assert!(!kind.columns().is_empty());
        }
    }

    #[test]
    fn test_visit_secondary_columns_are_nullable() {
        let nullable: Vec<&str> = TableKind::Visit
            .columns()
            .iter()
            .filter(|c| c.nullable)
            .map(|c| c.name)
            .collect();
        assert!(nullable.contains(&"scheduled_time"));
        assert!(nullable.contains(&"arrival_delay_minutes"));
        assert_eq!(
            nullable
                .iter()
                .filter(|n| n.starts_with("secondary_"))
                .count(),
            9
        );
    }

    #[test]
    fn test_type_mappings() {
        assert_eq!(ColumnType::Int.postgres_type(), "BIGINT");
        assert_eq!(ColumnType::Timestamp.postgres_type(), "TIMESTAMPTZ");
        assert_eq!(ColumnType::Float.warehouse_type(), "FLOAT64");
        assert_eq!(ColumnType::Bool.dictionary_label(), "boolean");
    }
}
