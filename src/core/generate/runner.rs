//! Generation runner - main orchestrator for the generation process
//!
//! Runs every table generator in dependency order: suppliers and drugs
//! first (drugs reference suppliers), then facilities, patients and the
//! calendar, then the visit chain, and finally the rollforward and the
//! daily ERP facts. All randomness comes from per-component streams
//! derived from the master seed, so two runs with the same parameters
//! produce identical datasets.

use chrono::{DateTime, Utc};
use std::time::Instant;
use uuid::Uuid;

use super::{
    calendar, diagnoses, dispense, drugs, facilities, finance, inventory, orders, patients,
    suppliers, visits, GenerationParams, GenerationSummary,
};
use crate::domain::{Dataset, Result};

/// Generation runner
pub struct Generator {
    params: GenerationParams,
}

impl Generator {
    /// Creates a runner after validating the parameters
    pub fn new(params: GenerationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The validated parameters this runner was built with
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Executes the full generation pipeline.
    ///
    /// `load_ts` is stamped on every row as the load timestamp; callers
    /// capture it once so all tables of a run carry the same value.
    ///
    /// # Errors
    ///
    /// Returns an error if any component generator fails; no partial
    /// dataset is returned.
    pub fn run(&self, load_ts: DateTime<Utc>) -> Result<(Dataset, GenerationSummary)> {
        let run_id = Uuid::new_v4();
        let started = Instant::now();
        let params = &self.params;

        tracing::info!(
            run_id = %run_id,
            seed = params.seed,
            facilities = params.facilities,
            patients = params.patients,
            drugs = params.drugs,
            start_date = %params.start_date,
            end_date = %params.end_date,
            "Starting data generation"
        );

        let mut dataset = Dataset::default();

        dataset.suppliers = suppliers::generate(params, load_ts)?;
        tracing::debug!(rows = dataset.suppliers.len(), "Suppliers generated");

        dataset.drugs = drugs::generate(params, load_ts)?;
        tracing::debug!(rows = dataset.drugs.len(), "Drug formulary generated");

        dataset.facilities = facilities::generate(params, load_ts)?;
        tracing::debug!(rows = dataset.facilities.len(), "Facilities generated");

        dataset.patients = patients::generate(params, load_ts)?;
        tracing::debug!(rows = dataset.patients.len(), "Patients generated");

        dataset.calendar = calendar::generate(params)?;
        tracing::debug!(rows = dataset.calendar.len(), "Calendar generated");

        dataset.visits = visits::generate(
            params,
            &dataset.facilities,
            &dataset.patients,
            &dataset.calendar,
            load_ts,
        )?;
        tracing::info!(rows = dataset.visits.len(), "Visits generated");

        dataset.diagnoses = diagnoses::generate(params, &dataset.visits)?;
        tracing::debug!(rows = dataset.diagnoses.len(), "Diagnoses generated");

        dataset.med_orders = orders::generate(params, &dataset.visits, &dataset.drugs, load_ts)?;
        tracing::debug!(rows = dataset.med_orders.len(), "Medication orders generated");

        dataset.dispenses = dispense::generate(params, &dataset.med_orders, load_ts)?;
        tracing::debug!(rows = dataset.dispenses.len(), "Dispenses generated");

        dataset.inventory = inventory::generate(
            params,
            &dataset.facilities,
            &dataset.drugs,
            &dataset.dispenses,
            load_ts,
        )?;
        tracing::info!(rows = dataset.inventory.len(), "Inventory snapshots generated");

        dataset.financial =
            finance::generate_transactions(params, &dataset.facilities, &dataset.drugs, load_ts)?;
        tracing::debug!(rows = dataset.financial.len(), "Financial transactions generated");

        dataset.procurement =
            finance::generate_procurement(params, &dataset.suppliers, &dataset.drugs, load_ts)?;
        tracing::debug!(rows = dataset.procurement.len(), "Procurement orders generated");

        let summary = GenerationSummary::from_dataset(
            run_id,
            params.seed,
            params.start_date,
            params.end_date,
            &dataset,
            started.elapsed(),
        );
        summary.log_summary();

        Ok((dataset, summary))
    }
}
