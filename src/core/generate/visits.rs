//! Visit fact generator
//!
//! The busiest generator: samples per-facility visit volume scaled by
//! province weight, builds arrival/start/end timings from scheduled
//! slots or walk-ins, and attaches a dual diagnosis view in which a
//! simulated AI classifier sometimes disagrees with the provider.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Exp, Normal};

use super::{pick, round1, GenerationParams};
use crate::catalog::diagnoses::{DiagnosisEntry, DIAGNOSES};
use crate::catalog::geography::province_weight;
use crate::core::rng;
use crate::domain::errors::KarooError;
use crate::domain::{CalendarRow, FacilityRow, PatientRow, Result, VisitId, VisitRow};

pub(crate) const VISIT_TYPES: &[&str] =
    &["acute", "chronic", "follow-up", "emergency", "routine"];

/// Triage levels 1..=5, skewed towards moderate urgency
const TRIAGE_WEIGHTS: [u32; 5] = [5, 10, 40, 30, 15];

const WALK_IN_RATE: f64 = 0.2;
const AI_DISAGREEMENT_RATE: f64 = 0.2;
const SECONDARY_DIAGNOSIS_RATE: f64 = 0.3;

const CLINIC_OPEN_HOUR: u32 = 7;
const CLINIC_CLOSE_HOUR: u32 = 17;

/// Simulated AI read of one observed diagnosis
struct AiClassification {
    code: &'static str,
    description: &'static str,
    accuracy: f64,
    matched: bool,
}

/// Generates the visit fact table
pub fn generate(
    params: &GenerationParams,
    facilities: &[FacilityRow],
    patients: &[PatientRow],
    calendar: &[CalendarRow],
    load_ts: DateTime<Utc>,
) -> Result<Vec<VisitRow>> {
    let mut stream = rng::stream(params.seed, "visits");

    let days: Vec<NaiveDate> = calendar.iter().map(|c| c.dt).collect();
    let triage = WeightedIndex::new(TRIAGE_WEIGHTS)
        .map_err(|e| KarooError::Generation(format!("triage weights: {e}")))?;
    let delay_minutes: Normal<f64> = Normal::new(5.0, 15.0)
        .map_err(|e| KarooError::Generation(format!("arrival delay distribution: {e}")))?;
    let start_offset_minutes = Normal::new(15.0, 10.0)
        .map_err(|e| KarooError::Generation(format!("start offset distribution: {e}")))?;
    let duration_minutes = Exp::new(1.0 / 20.0)
        .map_err(|e| KarooError::Generation(format!("duration distribution: {e}")))?;

    let (base_min, base_max) = params.visits_per_facility;
    let mut rows = Vec::new();
    let mut seq: u64 = 1;

    for facility in facilities {
        let base = stream.gen_range(base_min..=base_max) as f64;
        let weight = province_weight(facility.province);
        let num_visits = (base * (1.0 + 2.0 * weight)).round() as usize;

        for _ in 0..num_visits {
            let patient = pick(&mut stream, patients, "patient")?;
            let date = *pick(&mut stream, &days, "calendar day")?;

            let (scheduled_time, mut arrival_time, mut arrival_delay) =
                if stream.gen_bool(WALK_IN_RATE) {
                    (None, business_hours_time(date, &mut stream), None)
                } else {
                    let scheduled = business_hours_time(date, &mut stream);
                    let delay = delay_minutes.sample(&mut stream).clamp(-30.0, 120.0) as i64;
                    (
                        Some(scheduled),
                        scheduled + Duration::minutes(delay),
                        Some(delay),
                    )
                };

            // A late slot plus delay can cross midnight; pin the visit to its day
            if arrival_time.date_naive() != date {
                arrival_time = end_of_day(date);
                if let Some(scheduled) = scheduled_time {
                    arrival_delay = Some((arrival_time - scheduled).num_minutes());
                }
            }

            let start_offset = (start_offset_minutes.sample(&mut stream) as i64).max(0);
            let visit_start_time = arrival_time + Duration::minutes(start_offset);
            let duration = (duration_minutes.sample(&mut stream) as i64).max(5);
            let visit_end_time = visit_start_time + Duration::minutes(duration);

            let primary = pick(&mut stream, DIAGNOSES, "diagnosis")?;
            let primary_ai = classify(&mut stream, primary)?;

            let secondary = if stream.gen_bool(SECONDARY_DIAGNOSIS_RATE) {
                let entry = pick(&mut stream, DIAGNOSES, "diagnosis")?;
                let ai = classify(&mut stream, entry)?;
                Some((entry, ai))
            } else {
                None
            };

            rows.push(VisitRow {
                visit_id: VisitId::from_seq(seq),
                patient_id: patient.patient_id.clone(),
                facility_id: facility.facility_id.clone(),
                scheduled_time,
                arrival_time,
                arrival_delay_minutes: arrival_delay,
                triage_level: triage.sample(&mut stream) as i64 + 1,
                visit_start_time,
                visit_end_time,
                visit_duration_minutes: duration,
                visit_type: *pick(&mut stream, VISIT_TYPES, "visit type")?,
                primary_icd10_code: primary.icd10_code,
                primary_icd10_description: primary.description,
                primary_category_code: primary.category_code,
                primary_category_name: primary.category_name,
                primary_condition_type: primary.condition_type,
                primary_ai_icd10_code: primary_ai.code,
                primary_ai_icd10_description: primary_ai.description,
                primary_classification_accuracy: primary_ai.accuracy,
                primary_ai_provider_match: primary_ai.matched,
                secondary_icd10_code: secondary.as_ref().map(|(e, _)| e.icd10_code),
                secondary_icd10_description: secondary.as_ref().map(|(e, _)| e.description),
                secondary_category_code: secondary.as_ref().map(|(e, _)| e.category_code),
                secondary_category_name: secondary.as_ref().map(|(e, _)| e.category_name),
                secondary_condition_type: secondary.as_ref().map(|(e, _)| e.condition_type),
                secondary_ai_icd10_code: secondary.as_ref().map(|(_, ai)| ai.code),
                secondary_ai_icd10_description: secondary.as_ref().map(|(_, ai)| ai.description),
                secondary_classification_accuracy: secondary.as_ref().map(|(_, ai)| ai.accuracy),
                secondary_ai_provider_match: secondary.as_ref().map(|(_, ai)| ai.matched),
                created_at: load_ts,
                partition_dt: date,
            });
            seq += 1;
        }
    }

    Ok(rows)
}

/// Simulates the AI classifier against the provider's code.
///
/// Agreement scores in [88,100]; disagreement redraws a different code
/// and scores in [65,88). Rounding must not cross the band edge.
fn classify(stream: &mut StdRng, observed: &DiagnosisEntry) -> Result<AiClassification> {
    if stream.gen_bool(AI_DISAGREEMENT_RATE) {
        let alternatives: Vec<&DiagnosisEntry> = DIAGNOSES
            .iter()
            .filter(|d| d.icd10_code != observed.icd10_code)
            .collect();
        let alternative = *pick(stream, &alternatives, "alternative diagnosis")?;
        Ok(AiClassification {
            code: alternative.icd10_code,
            description: alternative.description,
            accuracy: round1(stream.gen_range(65.0..88.0)).min(87.9),
            matched: false,
        })
    } else {
        Ok(AiClassification {
            code: observed.icd10_code,
            description: observed.description,
            accuracy: round1(stream.gen_range(88.0..100.0)),
            matched: true,
        })
    }
}

/// Uniform time within clinic hours on the given day
fn business_hours_time(date: NaiveDate, stream: &mut StdRng) -> DateTime<Utc> {
    let hour = stream.gen_range(CLINIC_OPEN_HOUR..CLINIC_CLOSE_HOUR);
    let minute = stream.gen_range(0..60);
    let second = stream.gen_range(0..60);
    date.and_hms_opt(hour, minute, second)
        .expect("clinic hours are a valid wall-clock time")
        .and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(23, 50, 0)
        .expect("23:50 is a valid wall-clock time")
        .and_utc()
}
