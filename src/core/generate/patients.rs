//! Patient dimension generator
//!
//! Produces pseudonymized patients only: a salted hash id, birth year,
//! sex, weighted home province and chronic-programme enrollment. No
//! names, contact details or identifiers that could look real.

use chrono::{DateTime, Duration, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use super::{pick, GenerationParams};
use crate::catalog::geography::PROVINCES;
use crate::core::rng;
use crate::domain::errors::KarooError;
use crate::domain::{PatientId, PatientRow, Result};

const SEXES: &[&str] = &["M", "F", "Other", "Unknown"];

const MEDICAL_AID_SCHEMES: &[&str] =
    &["None", "Discovery", "Bonitas", "Medihelp", "Momentum", "Other"];

/// Share of patients enrolled in chronic disease management
const CHRONIC_ENROLLMENT_RATE: f64 = 0.3;

/// Enrollment happened at most five years before the window end
const ENROLLMENT_MAX_DAYS: i64 = 5 * 365;

/// Generates the pseudonymized patient dimension
pub fn generate(params: &GenerationParams, load_ts: DateTime<Utc>) -> Result<Vec<PatientRow>> {
    let mut stream = rng::stream(params.seed, "patients");

    let weights: Vec<f64> = PROVINCES.iter().map(|p| p.weight).collect();
    let province_picker = WeightedIndex::new(&weights)
        .map_err(|e| KarooError::Generation(format!("province weights: {e}")))?;

    let mut rows = Vec::with_capacity(params.patients);
    for index in 1..=params.patients {
        let home_province = PROVINCES[province_picker.sample(&mut stream)].name;

        let chronic_program_enrolled = stream.gen_bool(CHRONIC_ENROLLMENT_RATE);
        let enrollment_date = if chronic_program_enrolled {
            let offset = stream.gen_range(0..=ENROLLMENT_MAX_DAYS);
            Some(params.end_date - Duration::days(offset))
        } else {
            None
        };

        rows.push(PatientRow {
            patient_id: PatientId::derive(&params.patient_salt, index as u64),
            birth_year: stream.gen_range(1940..=2010),
            sex: *pick(&mut stream, SEXES, "sex")?,
            home_province,
            chronic_program_enrolled,
            enrollment_date,
            medical_aid: *pick(&mut stream, MEDICAL_AID_SCHEMES, "medical aid")?,
            load_ts,
        });
    }

    Ok(rows)
}
