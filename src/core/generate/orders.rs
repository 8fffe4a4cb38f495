//! Medication order fact generator
//!
//! Decides per visit whether the encounter produces prescriptions,
//! how many, and for which drugs. Order likelihood, drug choice and
//! quantity profile all follow the primary diagnosis: chronic flagship
//! conditions order most, HIV/TB regimens span several drugs, acute
//! conditions take small short courses.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::Rng;

use super::{pick, GenerationParams};
use crate::catalog::diagnoses::{
    treatment_candidates, HIGH_ORDER_CODES, MODERATE_ORDER_CODES, MULTI_DRUG_CODES,
};
use crate::core::rng;
use crate::domain::{DrugId, DrugRow, MedOrderRow, OrderId, Result, VisitRow};

const HIGH_ORDER_RATE: f64 = 0.8;
const MODERATE_ORDER_RATE: f64 = 0.7;
const BASE_ORDER_RATE: f64 = 0.4;

/// Quantity, supply and repeat profiles per condition class
const MULTI_DRUG_QUANTITIES: &[i64] = &[30, 60, 90];
const MULTI_DRUG_DAYS: &[i64] = &[28, 30, 60, 90];
const CHRONIC_QUANTITIES: &[i64] = &[28, 30, 60];
const CHRONIC_DAYS: &[i64] = &[28, 30, 60];
const ACUTE_QUANTITIES: &[i64] = &[10, 20, 30];
const ACUTE_DAYS: &[i64] = &[7, 14, 28];

const CHRONIC_FLAGSHIP_CODES: &[&str] = &["I10", "E11.9"];

/// Generates the medication order fact table
pub fn generate(
    params: &GenerationParams,
    visits: &[VisitRow],
    drugs: &[DrugRow],
    load_ts: DateTime<Utc>,
) -> Result<Vec<MedOrderRow>> {
    let mut stream = rng::stream(params.seed, "orders");

    let formulary_ids: Vec<DrugId> = drugs.iter().map(|d| d.drug_id.clone()).collect();
    let formulary_size = drugs.len() as u32;

    let mut rows = Vec::new();
    let mut seq: u64 = 1;

    for visit in visits {
        let code = visit.primary_icd10_code;

        let order_rate = if HIGH_ORDER_CODES.contains(&code) {
            HIGH_ORDER_RATE
        } else if MODERATE_ORDER_CODES.contains(&code) {
            MODERATE_ORDER_RATE
        } else {
            BASE_ORDER_RATE
        };
        if !stream.gen_bool(order_rate) {
            continue;
        }

        let multi_drug = MULTI_DRUG_CODES.contains(&code);
        let num_orders = if multi_drug {
            stream.gen_range(2..=4)
        } else {
            stream.gen_range(1..=2)
        };

        // Candidates are formulary positions; drop the ones outside this run
        let candidates: Vec<DrugId> = treatment_candidates(code)
            .unwrap_or(&[])
            .iter()
            .filter(|&&position| position <= formulary_size)
            .map(|&position| DrugId::from_seq(position))
            .collect();

        for _ in 0..num_orders {
            let drug_id = if candidates.is_empty() {
                pick(&mut stream, &formulary_ids, "drug")?.clone()
            } else {
                pick(&mut stream, &candidates, "drug candidate")?.clone()
            };

            let (quantity_units, days_supply, repeats) = if multi_drug {
                (
                    *pick(&mut stream, MULTI_DRUG_QUANTITIES, "quantity")?,
                    *pick(&mut stream, MULTI_DRUG_DAYS, "days supply")?,
                    stream.gen_range(2..=6),
                )
            } else if CHRONIC_FLAGSHIP_CODES.contains(&code) {
                (
                    *pick(&mut stream, CHRONIC_QUANTITIES, "quantity")?,
                    *pick(&mut stream, CHRONIC_DAYS, "days supply")?,
                    stream.gen_range(1..=3),
                )
            } else {
                (
                    *pick(&mut stream, ACUTE_QUANTITIES, "quantity")?,
                    *pick(&mut stream, ACUTE_DAYS, "days supply")?,
                    stream.gen_range(0..=1),
                )
            };

            let order_time = order_time_within(visit, &mut stream);

            rows.push(MedOrderRow {
                order_id: OrderId::from_seq(seq),
                visit_id: visit.visit_id.clone(),
                patient_id: visit.patient_id.clone(),
                facility_id: visit.facility_id.clone(),
                drug_id,
                quantity_units,
                days_supply,
                repeats,
                order_time,
                chronic_refill_flag: visit.visit_type == "chronic",
                created_at: load_ts,
                partition_dt: order_time.date_naive(),
            });
            seq += 1;
        }
    }

    Ok(rows)
}

/// Uniform instant inside the visit window; degenerate windows use the start
fn order_time_within(visit: &VisitRow, stream: &mut StdRng) -> DateTime<Utc> {
    let start = visit.visit_start_time;
    let end = visit.visit_end_time;
    if start >= end {
        return start;
    }
    let span_seconds = (end - start).num_seconds();
    start + Duration::seconds(stream.gen_range(0..=span_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generate::{calendar, drugs as drug_gen, facilities, patients, visits};
    use chrono::NaiveDate;
    use std::collections::{HashMap, HashSet};

    fn params(drugs: usize) -> GenerationParams {
        GenerationParams {
            facilities: 2,
            patients: 40,
            drugs,
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

    fn fixture(p: &GenerationParams) -> (Vec<VisitRow>, Vec<DrugRow>, Vec<MedOrderRow>) {
        let facility_rows = facilities::generate(p, load_ts()).unwrap();
        let patient_rows = patients::generate(p, load_ts()).unwrap();
        let calendar_rows = calendar::generate(p).unwrap();
        let drug_rows = drug_gen::generate(p, load_ts()).unwrap();
        let visit_rows = visits::generate(
            p,
            &facility_rows,
            &patient_rows,
            &calendar_rows,
            load_ts(),
        )
        .unwrap();
        let order_rows = generate(p, &visit_rows, &drug_rows, load_ts()).unwrap();
        (visit_rows, drug_rows, order_rows)
    }

    #[test]
    fn test_drug_references_resolve_even_in_tiny_formularies() {
        // Formulary of 5 cannot satisfy mappings like HIV -> position 29
        let p = params(5);
        let (_, drug_rows, order_rows) = fixture(&p);
        assert!(!order_rows.is_empty());

        let valid: HashSet<&str> = drug_rows.iter().map(|d| d.drug_id.as_str()).collect();
        for order in &order_rows {
            assert!(valid.contains(order.drug_id.as_str()), "{}", order.drug_id);
        }
    }

    #[test]
    fn test_mapped_diagnoses_use_their_candidates() {
        let p = params(31);
        let (visit_rows, _, order_rows) = fixture(&p);
        let primary: HashMap<&str, &str> = visit_rows
            .iter()
            .map(|v| (v.visit_id.as_str(), v.primary_icd10_code))
            .collect();

        for order in &order_rows {
            let code = primary[order.visit_id.as_str()];
            if let Some(candidates) = treatment_candidates(code) {
                let allowed: HashSet<String> = candidates
                    .iter()
                    .map(|&position| DrugId::from_seq(position).into_inner())
                    .collect();
                assert!(
                    allowed.contains(order.drug_id.as_str()),
                    "{code} -> {}",
                    order.drug_id
                );
            }
        }
    }

    #[test]
    fn test_hiv_tb_visits_order_multiple_drugs() {
        let p = params(31);
        let (visit_rows, _, order_rows) = fixture(&p);
        let mut orders_per_visit: HashMap<&str, i64> = HashMap::new();
        for order in &order_rows {
            *orders_per_visit.entry(order.visit_id.as_str()).or_insert(0) += 1;
        }

        for visit in &visit_rows {
            let Some(&count) = orders_per_visit.get(visit.visit_id.as_str()) else {
                continue;
            };
            if MULTI_DRUG_CODES.contains(&visit.primary_icd10_code) {
                assert!((2..=4).contains(&count), "{count}");
            } else {
                assert!((1..=2).contains(&count), "{count}");
            }
        }
    }

    #[test]
    fn test_quantity_profiles_by_condition_class() {
        let p = params(31);
        let (visit_rows, _, order_rows) = fixture(&p);
        let primary: HashMap<&str, &str> = visit_rows
            .iter()
            .map(|v| (v.visit_id.as_str(), v.primary_icd10_code))
            .collect();

        for order in &order_rows {
            let code = primary[order.visit_id.as_str()];
            if MULTI_DRUG_CODES.contains(&code) {
                assert!(MULTI_DRUG_QUANTITIES.contains(&order.quantity_units));
                assert!(MULTI_DRUG_DAYS.contains(&order.days_supply));
                assert!((2..=6).contains(&order.repeats));
            } else if CHRONIC_FLAGSHIP_CODES.contains(&code) {
                assert!(CHRONIC_QUANTITIES.contains(&order.quantity_units));
                assert!((1..=3).contains(&order.repeats));
            } else {
                assert!(ACUTE_QUANTITIES.contains(&order.quantity_units));
                assert!((0..=1).contains(&order.repeats));
            }
        }
    }

    #[test]
    fn test_order_time_inside_visit_window() {
        let p = params(10);
        let (visit_rows, _, order_rows) = fixture(&p);
        let windows: HashMap<&str, (DateTime<Utc>, DateTime<Utc>)> = visit_rows
            .iter()
            .map(|v| (v.visit_id.as_str(), (v.visit_start_time, v.visit_end_time)))
            .collect();

        for order in &order_rows {
            let (start, end) = windows[order.visit_id.as_str()];
            assert!(order.order_time >= start);
            assert!(order.order_time <= end.max(start));
            assert_eq!(order.partition_dt, order.order_time.date_naive());
        }
    }

    #[test]
    fn test_chronic_refill_flag_follows_visit_type() {
        let p = params(10);
        let (visit_rows, _, order_rows) = fixture(&p);
        let visit_types: HashMap<&str, &str> = visit_rows
            .iter()
            .map(|v| (v.visit_id.as_str(), v.visit_type))
            .collect();
        for order in &order_rows {
            assert_eq!(
                order.chronic_refill_flag,
                visit_types[order.visit_id.as_str()] == "chronic"
            );
        }
    }
}
