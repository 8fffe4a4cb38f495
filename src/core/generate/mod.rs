//! Synthetic dataset generation
//!
//! One submodule per table, orchestrated by [`runner::Generator`] in
//! dependency order: dimensions first, then the visit chain, then the
//! inventory rollforward and the daily ERP facts. Each generator draws
//! from its own named random stream (see [`crate::core::rng`]), so the
//! whole dataset is reproducible from the master seed and adding draws
//! to one table never disturbs another.

pub mod calendar;
pub mod diagnoses;
pub mod dispense;
pub mod drugs;
pub mod facilities;
pub mod finance;
pub mod inventory;
pub mod orders;
pub mod patients;
pub mod runner;
pub mod summary;
pub mod suppliers;
pub mod visits;

pub use runner::Generator;
pub use summary::GenerationSummary;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::GeneratorConfig;
use crate::domain::errors::KarooError;
use crate::domain::Result;

/// Everything the generators need to know about a run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Number of facilities to generate
    pub facilities: usize,
    /// Number of unique patients
    pub patients: usize,
    /// Formulary size; positions past the curated list are synthesized
    pub drugs: usize,
    /// First calendar day (inclusive)
    pub start_date: NaiveDate,
    /// Last calendar day (inclusive)
    pub end_date: NaiveDate,
    /// Master seed all component streams derive from
    pub seed: u64,
    /// Salt mixed into patient pseudonym derivation
    pub patient_salt: String,
    /// Bounds for the per-facility base visit draw (inclusive)
    pub visits_per_facility: (u32, u32),
}

impl GenerationParams {
    /// Builds parameters from the generator configuration section
    ///
    /// Unset dates are resolved against `today`: a missing end date becomes
    /// `today`, a missing start date becomes one year before the end date.
    pub fn from_config(config: &GeneratorConfig, today: NaiveDate) -> Self {
        let (start_date, end_date) = config.resolved_dates(today);
        Self {
            facilities: config.facilities,
            patients: config.patients,
            drugs: config.drugs,
            start_date,
            end_date,
            seed: config.seed,
            patient_salt: config.patient_salt.clone(),
            visits_per_facility: (
                config.visits_per_facility_min,
                config.visits_per_facility_max,
            ),
        }
    }

    /// Validates the parameter set, returning all problems found
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.facilities == 0 {
            errors.push("facilities must be at least 1".to_string());
        }
        if self.patients == 0 {
            errors.push("patients must be at least 1".to_string());
        }
        if self.drugs == 0 {
            errors.push("drugs must be at least 1".to_string());
        }
        if self.start_date > self.end_date {
            errors.push(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            ));
        }
        if self.patient_salt.is_empty() {
            errors.push("patient_salt must not be empty".to_string());
        }
        if self.visits_per_facility.0 > self.visits_per_facility.1 {
            errors.push(format!(
                "visits_per_facility range ({}, {}) is inverted",
                self.visits_per_facility.0, self.visits_per_facility.1
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(KarooError::Validation(errors.join("; ")))
        }
    }

    /// Number of calendar days in the window (inclusive of both ends)
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// The calendar days of the window, in chronological order
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date)
            .collect()
    }
}

/// Uniform pick from a slice, with a named error for empty pools
pub(crate) fn pick<'a, T>(rng: &mut StdRng, items: &'a [T], pool: &str) -> Result<&'a T> {
    items
        .choose(rng)
        .ok_or_else(|| KarooError::Generation(format!("cannot sample from empty {pool} pool")))
}

/// Rounds to two decimals, for currency amounts
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to one decimal, for percentage scores
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng;

    fn params() -> GenerationParams {
        GenerationParams {
            facilities: 25,
            patients: 5000,
            drugs: 30,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
            seed: 42,
            patient_salt: "patient".to_string(),
            visits_per_facility: (200, 600),
        }
    }

    #[test]
    fn test_valid_params() {
        assert!(params().validate().is_ok());
        assert_eq!(params().day_count(), 7);
        assert_eq!(params().days().len(), 7);
    }

    #[test]
    fn test_from_config_resolves_dates() {
        let config = GeneratorConfig::default();
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let params = GenerationParams::from_config(&config, today);

        assert_eq!(params.facilities, config.facilities);
        assert_eq!(params.seed, config.seed);
        assert_eq!(params.end_date, today);
        assert_eq!(
            params.start_date,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(params.visits_per_facility, (200, 600));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_counts_rejected() {
        let mut bad = params();
        bad.facilities = 0;
        bad.patients = 0;
        let err = bad.validate().unwrap_err().to_string();
        assert!(err.contains("facilities"));
        assert!(err.contains("patients"));
    }

    #[test]
    fn test_inverted_dates_rejected() {
        let mut bad = params();
        bad.start_date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_days_are_chronological() {
        let days = params().days();
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        for pair in days.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_pick_from_empty_pool_fails() {
        let mut stream = rng::stream(1, "test");
        let empty: [u8; 0] = [];
        assert!(pick(&mut stream, &empty, "drug").is_err());
        assert!(pick(&mut stream, &[7u8], "drug").is_ok());
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round2(18.756), 18.76);
        assert_eq!(round2(-3.456), -3.46);
        assert_eq!(round1(87.96), 88.0);
    }
}
