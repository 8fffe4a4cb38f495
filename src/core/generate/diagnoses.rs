//! Diagnosis fact generator
//!
//! Between one and three distinct coded diagnoses per visit, numbered
//! by sequence with the first marked primary. Timestamps reuse the
//! visit's arrival time.

use rand::seq::SliceRandom;
use rand::Rng;

use super::GenerationParams;
use crate::catalog::diagnoses::DIAGNOSES;
use crate::core::rng;
use crate::domain::{DiagnosisRow, Result, VisitRow};

/// Generates the diagnosis fact table
pub fn generate(params: &GenerationParams, visits: &[VisitRow]) -> Result<Vec<DiagnosisRow>> {
    let mut stream = rng::stream(params.seed, "diagnoses");

    let mut rows = Vec::with_capacity(visits.len() * 2);
    for visit in visits {
        let count = stream.gen_range(1..=3);
        let codes = DIAGNOSES.choose_multiple(&mut stream, count);

        for (idx, entry) in codes.enumerate() {
            let seq = idx as i64 + 1;
            rows.push(DiagnosisRow {
                visit_id: visit.visit_id.clone(),
                icd10_code: entry.icd10_code,
                icd10_description: entry.description,
                category_code: entry.category_code,
                category_name: entry.category_name,
                condition_type: entry.condition_type,
                is_primary: seq == 1,
                diagnosis_seq: seq,
                created_at: visit.arrival_time,
            });
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generate::{calendar, facilities, patients, visits};
    use chrono::{DateTime, NaiveDate, Utc};
    use std::collections::{HashMap, HashSet};

    fn params() -> GenerationParams {
        GenerationParams {
            facilities: 2,
            patients: 30,
            drugs: 10,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
            seed: 42,
            patient_salt: "patient".to_string(),
            visits_per_facility: (50, 100),
        }
    }

    fn load_ts() -> DateTime<Utc> {
        "2024-06-01T08:00:00Z".parse().unwrap()
    }

    fn fixture() -> (Vec<VisitRow>, Vec<DiagnosisRow>) {
        let p = params();
        let facility_rows = facilities::generate(&p, load_ts()).unwrap();
        let patient_rows = patients::generate(&p, load_ts()).unwrap();
        let calendar_rows = calendar::generate(&p).unwrap();
        let visit_rows = visits::generate(
            &p,
            &facility_rows,
            &patient_rows,
            &calendar_rows,
            load_ts(),
        )
        .unwrap();
        let diagnosis_rows = generate(&p, &visit_rows).unwrap();
        (visit_rows, diagnosis_rows)
    }

    #[test]
    fn test_one_to_three_distinct_codes_per_visit() {
        let (visit_rows, diagnosis_rows) = fixture();

        let mut per_visit: HashMap<&str, Vec<&DiagnosisRow>> = HashMap::new();
        for row in &diagnosis_rows {
            per_visit.entry(row.visit_id.as_str()).or_default().push(row);
        }
        assert_eq!(per_visit.len(), visit_rows.len());

        for (visit_id, rows) in &per_visit {
            assert!((1..=3).contains(&rows.len()), "{visit_id}");
            let codes: HashSet<&str> = rows.iter().map(|r| r.icd10_code).collect();
            assert_eq!(codes.len(), rows.len(), "{visit_id}");
        }
    }

    #[test]
    fn test_sequence_marks_primary() {
        let (_, diagnosis_rows) = fixture();
        let mut per_visit: HashMap<&str, Vec<i64>> = HashMap::new();
        for row in &diagnosis_rows {
            assert_eq!(row.is_primary, row.diagnosis_seq == 1);
            per_visit
                .entry(row.visit_id.as_str())
                .or_default()
                .push(row.diagnosis_seq);
        }
        for (visit_id, mut seqs) in per_visit {
            seqs.sort_unstable();
            let expected: Vec<i64> = (1..=seqs.len() as i64).collect();
            assert_eq!(seqs, expected, "{visit_id}");
        }
    }

    #[test]
    fn test_created_at_is_visit_arrival() {
        let (visit_rows, diagnosis_rows) = fixture();
        let arrivals: HashMap<&str, DateTime<Utc>> = visit_rows
            .iter()
            .map(|v| (v.visit_id.as_str(), v.arrival_time))
            .collect();
        for row in &diagnosis_rows {
            assert_eq!(row.created_at, arrivals[row.visit_id.as_str()]);
        }
    }
}
