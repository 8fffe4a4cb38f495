//! Generation summary and reporting
//!
//! This module defines the structure for tracking and reporting what a
//! generation run produced.

use chrono::NaiveDate;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::{Dataset, TableKind};

/// Summary of one generation run
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Unique id for this run, used to correlate log lines
    pub run_id: Uuid,

    /// Master seed the run was generated from
    pub seed: u64,

    /// First day of the generated window
    pub start_date: NaiveDate,

    /// Last day of the generated window
    pub end_date: NaiveDate,

    /// Row counts per table, in write order
    pub table_counts: Vec<(TableKind, usize)>,

    /// Total rows across all tables
    pub total_rows: usize,

    /// Duration of the generation phase
    pub duration: Duration,
}

impl GenerationSummary {
    /// Builds a summary from a finished dataset
    pub fn from_dataset(
        run_id: Uuid,
        seed: u64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        dataset: &Dataset,
        duration: Duration,
    ) -> Self {
        let table_counts: Vec<(TableKind, usize)> = TableKind::ALL
            .iter()
            .map(|&kind| (kind, dataset.row_count(kind)))
            .collect();
        let total_rows = table_counts.iter().map(|(_, n)| n).sum();

        Self {
            run_id,
            seed,
            start_date,
            end_date,
            table_counts,
            total_rows,
            duration,
        }
    }

    /// Row count for one table
    pub fn count(&self, kind: TableKind) -> usize {
        self.table_counts
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Rows across the five dimension tables
    pub fn dimension_rows(&self) -> usize {
        self.table_counts
            .iter()
            .filter(|(k, _)| k.is_dimension())
            .map(|(_, n)| n)
            .sum()
    }

    /// Rows across the seven fact tables
    pub fn fact_rows(&self) -> usize {
        self.table_counts
            .iter()
            .filter(|(k, _)| !k.is_dimension())
            .map(|(_, n)| n)
            .sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            seed = self.seed,
            start_date = %self.start_date,
            end_date = %self.end_date,
            total_rows = self.total_rows,
            dimension_rows = self.dimension_rows(),
            fact_rows = self.fact_rows(),
            duration_ms = self.duration.as_millis() as u64,
            "Generation completed"
        );

        for (kind, count) in &self.table_counts {
            tracing::debug!(table = kind.table_name(), rows = count, "Table generated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientId, PatientRow};

    fn sample_dataset() -> Dataset {
        let mut dataset = Dataset::default();
        dataset.patients.push(PatientRow {
            patient_id: PatientId::derive("patient", 1),
            birth_year: 1980,
            sex: "F",
            home_province: "Gauteng",
            chronic_program_enrolled: false,
            enrollment_date: None,
            medical_aid: "None",
            load_ts: "2024-06-01T08:00:00Z".parse().unwrap(),
        });
        dataset
    }

    fn dates() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        )
    }

    #[test]
    fn test_counts_reflect_dataset() {
        let (start, end) = dates();
        let summary = GenerationSummary::from_dataset(
            Uuid::new_v4(),
            42,
            start,
            end,
            &sample_dataset(),
            Duration::from_millis(150),
        );

        assert_eq!(summary.table_counts.len(), 12);
        assert_eq!(summary.count(TableKind::PatientPseudo), 1);
        assert_eq!(summary.count(TableKind::Visit), 0);
        assert_eq!(summary.total_rows, 1);
        assert_eq!(summary.dimension_rows(), 1);
        assert_eq!(summary.fact_rows(), 0);
    }

    #[test]
    fn test_counts_follow_write_order() {
        let (start, end) = dates();
        let summary = GenerationSummary::from_dataset(
            Uuid::new_v4(),
            42,
            start,
            end,
            &sample_dataset(),
            Duration::ZERO,
        );
        let kinds: Vec<TableKind> = summary.table_counts.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, TableKind::ALL.to_vec());
    }
}
