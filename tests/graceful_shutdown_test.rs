//! Integration tests for graceful shutdown
//!
//! These tests verify that:
//! - Shutdown signals reach every receiver clone
//! - The export coordinator stops between tables, never inside one
//! - Tables written before the signal stay written and counted
//! - An interrupted run skips the finalize step

use async_trait::async_trait;
use chrono::NaiveDate;
use karoo::adapters::sink::traits::{TableSink, WriteReport};
use karoo::core::export::ExportCoordinator;
use karoo::core::generate::{GenerationParams, Generator};
use karoo::domain::{Dataset, Result, TableKind};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Sink that raises the shutdown signal after a fixed number of tables
struct SignalingSink {
    written: Mutex<Vec<&'static str>>,
    finalized: AtomicBool,
    shutdown_tx: watch::Sender<bool>,
    signal_after: usize,
}

impl SignalingSink {
    fn new(shutdown_tx: watch::Sender<bool>, signal_after: usize) -> Self {
        Self {
            written: Mutex::new(Vec::new()),
            finalized: AtomicBool::new(false),
            shutdown_tx,
            signal_after,
        }
    }
}

#[async_trait]
impl TableSink for SignalingSink {
    fn name(&self) -> &str {
        "signaling"
    }

    async fn prepare(&self) -> Result<()> {
        Ok(())
    }

    async fn write_table(&self, kind: TableKind, rows: &[Value]) -> Result<WriteReport> {
        let mut written = self.written.lock().unwrap();
        written.push(kind.table_name());
        if written.len() == self.signal_after {
            let _ = self.shutdown_tx.send(true);
        }
        Ok(WriteReport::success(kind, rows.len()))
    }

    async fn finalize(&self) -> Result<()> {
        self.finalized.store(true, Ordering::SeqCst);
        Ok(())
    }
}

fn generate_dataset() -> Dataset {
    let params = GenerationParams {
        facilities: 1,
        patients: 15,
        drugs: 5,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        seed: 42,
        patient_salt: "patient".to_string(),
        visits_per_facility: (10, 20),
    };
    let (dataset, _) = Generator::new(params)
        .expect("params are valid")
        .run("2024-06-01T08:00:00Z".parse().unwrap())
        .expect("generation succeeds");
    dataset
}

#[tokio::test]
async fn test_shutdown_signal_reaches_cloned_receivers() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let watcher1 = shutdown_rx.clone();
    let watcher2 = shutdown_rx.clone();

    assert!(!*watcher1.borrow());
    assert!(!*watcher2.borrow());

    shutdown_tx.send(true).unwrap();

    assert!(*watcher1.borrow());
    assert!(*watcher2.borrow());
}

#[tokio::test]
async fn test_export_stops_between_tables_after_signal() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sink = Arc::new(SignalingSink::new(shutdown_tx, 3));
    let coordinator = ExportCoordinator::with_sink(sink.clone(), shutdown_rx);

    let dataset = generate_dataset();
    let summary = coordinator.execute_export(&dataset).await.unwrap();

    assert!(summary.interrupted);
    assert!(!summary.is_successful());
    assert_eq!(summary.tables_written, 3);
    assert_eq!(summary.tables_failed, 0);

    // Exactly the first three tables of the write order landed
    let written = sink.written.lock().unwrap();
    let expected: Vec<&str> = TableKind::ALL[..3].iter().map(|k| k.table_name()).collect();
    assert_eq!(*written, expected);
}

#[tokio::test]
async fn test_interrupted_rows_stay_counted() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sink = Arc::new(SignalingSink::new(shutdown_tx, 2));
    let coordinator = ExportCoordinator::with_sink(sink.clone(), shutdown_rx);

    let dataset = generate_dataset();
    let summary = coordinator.execute_export(&dataset).await.unwrap();

    let expected_rows = dataset.rows_json(TableKind::ALL[0]).unwrap().len()
        + dataset.rows_json(TableKind::ALL[1]).unwrap().len();
    assert_eq!(summary.rows_written, expected_rows);
    assert_eq!(summary.rows_failed, 0);
}

#[tokio::test]
async fn test_interrupted_export_skips_finalize() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sink = Arc::new(SignalingSink::new(shutdown_tx, 1));
    let coordinator = ExportCoordinator::with_sink(sink.clone(), shutdown_rx);

    let dataset = generate_dataset();
    let summary = coordinator.execute_export(&dataset).await.unwrap();

    assert!(summary.interrupted);
    assert!(!sink.finalized.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_uninterrupted_export_calls_finalize() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    // Threshold beyond the table count, so the signal never fires
    let sink = Arc::new(SignalingSink::new(shutdown_tx, TableKind::ALL.len() + 1));
    let coordinator = ExportCoordinator::with_sink(sink.clone(), shutdown_rx);

    let dataset = generate_dataset();
    let summary = coordinator.execute_export(&dataset).await.unwrap();

    assert!(summary.is_successful());
    assert_eq!(summary.tables_written, TableKind::ALL.len());
    assert!(sink.finalized.load(Ordering::SeqCst));
}
