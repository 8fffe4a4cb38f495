//! Dispense fact generator
//!
//! Roughly 85% of orders reach the dispensary. Quantities may be cut
//! short of the ordered amount, and the dispense instant trails the
//! order by an exponential wait.

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Distribution;
use rand::Rng;
use rand_distr::Exp;

use super::{pick, GenerationParams};
use crate::core::rng;
use crate::domain::errors::KarooError;
use crate::domain::{DispenseRow, MedOrderRow, Result};

const DISPENSE_RATE: f64 = 0.85;

/// Mean minutes between order and dispense
const MEAN_WAIT_MINUTES: f64 = 30.0;

const STOCK_SOURCES: &[&str] = &["pharmacy", "main_store", "cabinet", "CCMDD", "ward_stock"];

/// Generates the dispense fact table
pub fn generate(
    params: &GenerationParams,
    orders: &[MedOrderRow],
    load_ts: DateTime<Utc>,
) -> Result<Vec<DispenseRow>> {
    let mut stream = rng::stream(params.seed, "dispense");

    let wait_minutes = Exp::new(1.0 / MEAN_WAIT_MINUTES)
        .map_err(|e| KarooError::Generation(format!("dispense wait distribution: {e}")))?;

    let mut rows = Vec::with_capacity(orders.len());
    let mut seq: u64 = 1;

    for order in orders {
        if !stream.gen_bool(DISPENSE_RATE) {
            continue;
        }

        let fill_ratio = stream.gen_range(0.8..1.0);
        let quantity_units = (order.quantity_units as f64 * fill_ratio) as i64;
        let dispense_time =
            order.order_time + Duration::minutes(wait_minutes.sample(&mut stream) as i64);

        rows.push(DispenseRow {
            dispense_id: format!("DISP{seq:08}"),
            order_id: order.order_id.clone(),
            patient_id: order.patient_id.clone(),
            facility_id: order.facility_id.clone(),
            drug_id: order.drug_id.clone(),
            quantity_units,
            dispense_time,
            stock_source: *pick(&mut stream, STOCK_SOURCES, "stock source")?,
            created_at: load_ts,
            partition_dt: dispense_time.date_naive(),
        });
        seq += 1;
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generate::{calendar, drugs, facilities, orders, patients, visits};
    use chrono::NaiveDate;
    use std::collections::{HashMap, HashSet};

    fn params() -> GenerationParams {
        GenerationParams {
            facilities: 2,
            patients: 40,
            drugs: 15,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
            seed: 42,
            patient_salt: "patient".to_string(),
            visits_per_facility: (100, 200),
        }
    }

    fn load_ts() -> DateTime<Utc> {
        "2024-06-01T08:00:00Z".parse().unwrap()
    }

    fn fixture() -> (Vec<MedOrderRow>, Vec<DispenseRow>) {
        let p = params();
        let facility_rows = facilities::generate(&p, load_ts()).unwrap();
        let patient_rows = patients::generate(&p, load_ts()).unwrap();
        let calendar_rows = calendar::generate(&p).unwrap();
        let drug_rows = drugs::generate(&p, load_ts()).unwrap();
        let visit_rows = visits::generate(
            &p,
            &facility_rows,
            &patient_rows,
            &calendar_rows,
            load_ts(),
        )
        .unwrap();
        let order_rows = orders::generate(&p, &visit_rows, &drug_rows, load_ts()).unwrap();
        let dispense_rows = generate(&p, &order_rows, load_ts()).unwrap();
        (order_rows, dispense_rows)
    }

    #[test]
    fn test_dispense_share_near_85_percent() {
        let (order_rows, dispense_rows) = fixture();
        let share = dispense_rows.len() as f64 / order_rows.len() as f64;
        assert!((0.75..0.95).contains(&share), "share {share}");
    }

    #[test]
    fn test_each_dispense_matches_one_order() {
        let (order_rows, dispense_rows) = fixture();
        let by_order: HashMap<&str, &MedOrderRow> = order_rows
            .iter()
            .map(|o| (o.order_id.as_str(), o))
            .collect();

        let mut seen: HashSet<&str> = HashSet::new();
        for dispense in &dispense_rows {
            let order = by_order[dispense.order_id.as_str()];
            assert!(seen.insert(dispense.order_id.as_str()), "duplicate order ref");
            assert_eq!(dispense.patient_id, order.patient_id);
            assert_eq!(dispense.facility_id, order.facility_id);
            assert_eq!(dispense.drug_id, order.drug_id);
        }
    }

    #[test]
    fn test_partial_fills_never_exceed_order() {
        let (order_rows, dispense_rows) = fixture();
        let ordered: HashMap<&str, i64> = order_rows
            .iter()
            .map(|o| (o.order_id.as_str(), o.quantity_units))
            .collect();
        for dispense in &dispense_rows {
            let full = ordered[dispense.order_id.as_str()];
            assert!(dispense.quantity_units <= full);
            // Fill ratio floor is 0.8, truncated to whole units
            assert!(dispense.quantity_units >= (full as f64 * 0.8) as i64 - 1);
        }
    }

    #[test]
    fn test_dispense_follows_order_time() {
        let (order_rows, dispense_rows) = fixture();
        let order_times: HashMap<&str, DateTime<Utc>> = order_rows
            .iter()
            .map(|o| (o.order_id.as_str(), o.order_time))
            .collect();
        for dispense in &dispense_rows {
            assert!(dispense.dispense_time >= order_times[dispense.order_id.as_str()]);
            assert_eq!(dispense.partition_dt, dispense.dispense_time.date_naive());
            assert!(STOCK_SOURCES.contains(&dispense.stock_source));
        }
    }

    #[test]
    fn test_dispense_ids_sequential() {
        let (_, dispense_rows) = fixture();
        assert_eq!(dispense_rows[0].dispense_id, "DISP00000001");
        let ids: HashSet<&str> = dispense_rows.iter().map(|d| d.dispense_id.as_str()).collect();
        assert_eq!(ids.len(), dispense_rows.len());
    }
}
