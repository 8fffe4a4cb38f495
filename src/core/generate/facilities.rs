//! Facility dimension generator
//!
//! Allocates the requested facility count across provinces by population
//! weight, then samples a location, care level and staffing profile for
//! each facility. Sequence ids are assigned province by province in
//! weight order, so FAC0001 always lands in Gauteng when N >= 9.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use super::{pick, GenerationParams};
use crate::catalog::geography::{Province, PROVINCES};
use crate::domain::{FacilityId, FacilityRow, Result};
use crate::core::rng;

/// Care levels with the label used in facility names
const LEVELS: &[(&str, &str)] = &[
    ("clinic", "Community Clinic"),
    ("CHC", "Community Health Centre"),
    ("district_hospital", "District Hospital"),
    ("regional_hospital", "Regional Hospital"),
    ("tertiary_hospital", "Tertiary Hospital"),
];

const HOSPITAL_LEVELS: &[&str] = &["district_hospital", "regional_hospital", "tertiary_hospital"];

/// Facilities opened between one and thirty years before the window end
const OPENED_MIN_DAYS: i64 = 365;
const OPENED_MAX_DAYS: i64 = 30 * 365;

/// Generates the facility dimension
pub fn generate(params: &GenerationParams, load_ts: DateTime<Utc>) -> Result<Vec<FacilityRow>> {
    let mut stream = rng::stream(params.seed, "facilities");
    let allocation = allocate(params.facilities);

    let mut rows = Vec::with_capacity(params.facilities);
    let mut seq: u32 = 1;

    for (province, count) in allocation {
        for _ in 0..count {
            let bounds = province.bounds;
            let latitude = round6(stream.gen_range(bounds.lat_min..bounds.lat_max));
            let longitude = round6(stream.gen_range(bounds.lon_min..bounds.lon_max));

            let (level, label) = *pick(&mut stream, LEVELS, "facility level")?;
            let town = *pick(&mut stream, province.towns, "town")?;
            let district_town = *pick(&mut stream, province.towns, "town")?;

            let opened_offset = stream.gen_range(OPENED_MIN_DAYS..=OPENED_MAX_DAYS);
            let bed_capacity = if HOSPITAL_LEVELS.contains(&level) {
                Some(stream.gen_range(10..=500))
            } else {
                None
            };

            rows.push(FacilityRow {
                facility_id: FacilityId::from_seq(seq),
                facility_name: format!("{town} {label}"),
                province: province.name,
                district: format!("{district_town} District"),
                latitude,
                longitude,
                level,
                is_active: true,
                opened_date: params.end_date - Duration::days(opened_offset),
                closed_date: None,
                bed_capacity,
                staff_count: stream.gen_range(5..=200),
                load_ts,
            });
            seq += 1;
        }
    }

    Ok(rows)
}

/// Splits `n` facilities across provinces.
///
/// For n >= 9: each province gets floor(n * weight), rounded up to at
/// least one, and the remainder (positive or negative) is settled
/// against the two largest provinces. For smaller n, the n largest
/// provinces get one facility each; a national run cannot cover all
/// nine provinces with fewer than nine sites.
fn allocate(n: usize) -> Vec<(&'static Province, usize)> {
    if n < PROVINCES.len() {
        return PROVINCES.iter().take(n).map(|p| (p, 1)).collect();
    }

    let mut counts: Vec<i64> = PROVINCES
        .iter()
        .map(|p| ((n as f64 * p.weight) as i64).max(1))
        .collect();

    let allocated: i64 = counts.iter().sum();
    let diff = n as i64 - allocated;
    counts[0] += diff.div_euclid(2);
    counts[1] += diff - diff.div_euclid(2);

    PROVINCES
        .iter()
        .zip(counts)
        .map(|(p, c)| (p, c as usize))
        .collect()
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::geography::province_by_name;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn params(facilities: usize) -> GenerationParams {
        GenerationParams {
            facilities,
            patients: 100,
            drugs: 10,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            seed: 42,
            patient_salt: "patient".to_string(),
            visits_per_facility: (200, 600),
        }
    }

    fn load_ts() -> DateTime<Utc> {
        "2024-06-01T08:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_exact_count_for_all_sizes() {
        for n in [1, 3, 8, 9, 10, 11, 20, 25, 50, 100] {
            let rows = generate(&params(n), load_ts()).unwrap();
            assert_eq!(rows.len(), n, "n={n}");
        }
    }

    #[test]
    fn test_every_province_covered_from_nine_up() {
        for n in [9, 10, 25, 40] {
            let rows = generate(&params(n), load_ts()).unwrap();
            let provinces: HashSet<&str> = rows.iter().map(|r| r.province).collect();
            assert_eq!(provinces.len(), 9, "n={n}");
        }
    }

    #[test]
    fn test_small_runs_prefer_largest_provinces() {
        let rows = generate(&params(3), load_ts()).unwrap();
        let provinces: Vec<&str> = rows.iter().map(|r| r.province).collect();
        assert_eq!(provinces, vec!["Gauteng", "Western Cape", "KwaZulu-Natal"]);
    }

    #[test]
    fn test_ids_are_sequential() {
        let rows = generate(&params(12), load_ts()).unwrap();
        assert_eq!(rows[0].facility_id.as_str(), "FAC0001");
        assert_eq!(rows[11].facility_id.as_str(), "FAC0012");
    }

    #[test]
    fn test_coordinates_inside_province_bounds() {
        let rows = generate(&params(30), load_ts()).unwrap();
        for row in &rows {
            let bounds = province_by_name(row.province).unwrap().bounds;
            assert!(row.latitude >= bounds.lat_min && row.latitude <= bounds.lat_max);
            assert!(row.longitude >= bounds.lon_min && row.longitude <= bounds.lon_max);
        }
    }

    #[test]
    fn test_only_hospitals_have_beds() {
        let rows = generate(&params(60), load_ts()).unwrap();
        for row in &rows {
            let is_hospital = HOSPITAL_LEVELS.contains(&row.level);
            assert_eq!(row.bed_capacity.is_some(), is_hospital, "{}", row.level);
            if let Some(beds) = row.bed_capacity {
                assert!((10..=500).contains(&beds));
            }
            assert!((5..=200).contains(&row.staff_count));
        }
    }

    #[test]
    fn test_opened_before_window_end() {
        let p = params(20);
        let rows = generate(&p, load_ts()).unwrap();
        for row in &rows {
            assert!(row.opened_date < p.end_date);
            assert!(row.is_active);
            assert!(row.closed_date.is_none());
        }
    }

    #[test]
    fn test_deterministic_per_seed() {
        let rows_a = generate(&params(15), load_ts()).unwrap();
        let rows_b = generate(&params(15), load_ts()).unwrap();
        assert_eq!(rows_a, rows_b);
    }
}
