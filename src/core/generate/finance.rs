//! Financial transaction and procurement order generators
//!
//! Stateless per-day ERP facts: a handful of stock movements priced off
//! the drug's unit cost, and purchase orders placed with suppliers in
//! an independent lifecycle status.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::{pick, round2, GenerationParams};
use crate::core::rng;
use crate::domain::{
    DrugRow, FacilityRow, FinancialRow, ProcurementRow, Result, SupplierRow,
};

const TRANSACTION_TYPES: &[&str] = &["purchase", "sale", "adjustment", "transfer", "return"];

const ORDER_STATUSES: &[&str] =
    &["pending", "approved", "ordered", "shipped", "delivered", "cancelled"];

/// Transactions per calendar day (inclusive bounds)
const TRANSACTIONS_PER_DAY: (u32, u32) = (5, 20);

/// Procurement orders per calendar day (inclusive bounds)
const PROCUREMENTS_PER_DAY: (u32, u32) = (1, 5);

/// Generates the financial transaction fact table
pub fn generate_transactions(
    params: &GenerationParams,
    facilities: &[FacilityRow],
    drugs: &[DrugRow],
    load_ts: DateTime<Utc>,
) -> Result<Vec<FinancialRow>> {
    let mut stream = rng::stream(params.seed, "finance");

    let mut rows = Vec::new();
    let mut seq: u64 = 1;

    for day in params.days() {
        let count = stream.gen_range(TRANSACTIONS_PER_DAY.0..=TRANSACTIONS_PER_DAY.1);
        for _ in 0..count {
            let facility = pick(&mut stream, facilities, "facility")?;
            let drug = pick(&mut stream, drugs, "drug")?;
            let transaction_type = *pick(&mut stream, TRANSACTION_TYPES, "transaction type")?;

            let quantity = stream.gen_range(1..=100);
            let mut total = quantity as f64 * drug.unit_cost_zar;
            match transaction_type {
                "sale" => total *= stream.gen_range(1.1..1.3),
                "return" => total = -total,
                _ => {}
            }

            rows.push(FinancialRow {
                transaction_id: format!("TXN{seq:08}"),
                facility_id: facility.facility_id.clone(),
                drug_id: drug.drug_id.clone(),
                transaction_type,
                quantity,
                unit_cost_zar: drug.unit_cost_zar,
                total_amount_zar: round2(total),
                transaction_date: day,
                created_at: load_ts,
                partition_dt: day,
            });
            seq += 1;
        }
    }

    Ok(rows)
}

/// Generates the procurement order fact table
pub fn generate_procurement(
    params: &GenerationParams,
    suppliers: &[SupplierRow],
    drugs: &[DrugRow],
    load_ts: DateTime<Utc>,
) -> Result<Vec<ProcurementRow>> {
    let mut stream = rng::stream(params.seed, "procurement");

    let mut rows = Vec::new();
    let mut seq: u64 = 1;

    for day in params.days() {
        let count = stream.gen_range(PROCUREMENTS_PER_DAY.0..=PROCUREMENTS_PER_DAY.1);
        for _ in 0..count {
            let supplier = pick(&mut stream, suppliers, "supplier")?;
            let drug = pick(&mut stream, drugs, "drug")?;
            let quantity = stream.gen_range(100..=1000);

            rows.push(ProcurementRow {
                procurement_order_id: format!("PROC{seq:08}"),
                supplier_id: supplier.supplier_id.clone(),
                drug_id: drug.drug_id.clone(),
                quantity,
                unit_cost_zar: drug.unit_cost_zar,
                total_amount_zar: round2(quantity as f64 * drug.unit_cost_zar),
                order_date: day,
                status: *pick(&mut stream, ORDER_STATUSES, "order status")?,
                created_at: load_ts,
                partition_dt: day,
            });
            seq += 1;
        }
    }

    Ok(rows)
}
