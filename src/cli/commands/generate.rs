//! Generate command implementation
//!
//! This module implements the `generate` command: it builds the synthetic
//! dataset in memory and writes it to the configured sink.

use crate::config::{secret_string, KarooConfig, OutputTarget};
use crate::core::export::ExportCoordinator;
use crate::core::generate::{GenerationParams, Generator};
use chrono::{NaiveDate, Utc};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - generate the dataset but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Override the number of facilities
    #[arg(long)]
    pub facilities: Option<usize>,

    /// Override the number of patients
    #[arg(long)]
    pub patients: Option<usize>,

    /// Override the formulary size
    #[arg(long)]
    pub drugs: Option<usize>,

    /// Override the master seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the first generated day (ISO date)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Override the last generated day (ISO date)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Override the output target (files, warehouse or relational)
    #[arg(long)]
    pub output: Option<OutputTarget>,

    /// Override the file sink output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the warehouse project id
    #[arg(long)]
    pub project_id: Option<String>,

    /// Override the warehouse dataset id
    #[arg(long)]
    pub dataset_id: Option<String>,

    /// Override the warehouse credentials file path
    #[arg(long)]
    pub credentials: Option<String>,

    /// Override the PostgreSQL connection string
    #[arg(long, env = "KAROO_CONNECTION_STRING", hide_env_values = true)]
    pub connection_string: Option<String>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub async fn execute(
        &self,
        config_path: Option<&str>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting generate command");

        // Load configuration
        let mut config = super::load_cli_config(config_path)?;

        // Apply CLI overrides
        self.apply_overrides(&mut config);

        // Validate configuration after overrides
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        // Dry run mode
        if config.output.dry_run {
            tracing::info!("Dry run mode enabled - no data will be written");
            println!("🔍 DRY RUN MODE - No data will be written to any sink");
            println!();
        }

        let params =
            GenerationParams::from_config(&config.generator, Utc::now().date_naive());

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !config.output.dry_run {
            println!("Generation Configuration:");
            println!("  Output: {}", config.output.target);
            println!("  Facilities: {}", params.facilities);
            println!("  Patients: {}", params.patients);
            println!("  Drugs: {}", params.drugs);
            println!("  Date range: {} to {}", params.start_date, params.end_date);
            println!("  Seed: {}", params.seed);
            println!();
            print!("Proceed with generation? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Generation cancelled.");
                return Ok(0);
            }
        }

        // Generate the dataset in memory
        println!("🚀 Generating dataset...");
        let generator = Generator::new(params)?;
        let (dataset, gen_summary) = match generator.run(Utc::now()) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Generation failed");
                eprintln!("Generation failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        println!();
        println!("📊 Generated Tables:");
        for (kind, count) in &gen_summary.table_counts {
            println!("  {:<28} {:>9} rows", kind.table_name(), count);
        }
        println!("  {:<28} {:>9} rows", "total", gen_summary.total_rows);
        println!();

        // In dry-run mode the sink is never touched
        if config.output.dry_run {
            println!("✅ Dry run completed - sinks untouched");
            tracing::info!(
                run_id = %gen_summary.run_id,
                total_rows = gen_summary.total_rows,
                "Dry run completed"
            );
            return Ok(0);
        }

        // Create export coordinator (connects to and prepares the sink)
        tracing::info!("Creating export coordinator");
        let coordinator =
            match ExportCoordinator::new(&config, gen_summary.run_id, shutdown_signal).await {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create export coordinator");
                    eprintln!("Failed to initialize sink: {e}");
                    return Ok(4); // Connection error exit code
                }
            };

        // Write all tables
        tracing::info!("Executing export");
        println!(
            "🚀 Writing {} rows to the {} sink...",
            gen_summary.total_rows, config.output.target
        );
        println!();

        let summary = match coordinator.execute_export(&dataset).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("📊 Export Summary:");
        println!("  Sink: {}", summary.sink);
        println!("  Tables written: {}", summary.tables_written);
        println!("  Tables failed: {}", summary.tables_failed);
        println!("  Rows written: {}", summary.rows_written);
        println!("  Rows failed: {}", summary.rows_failed);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        if config.output.target == OutputTarget::Files {
            println!("  Output directory: {}", config.output.files.output_dir);
        }
        println!();

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                match error.table {
                    Some(table) => println!(
                        "  - {:?} [{}]: {}",
                        error.error_type,
                        table.table_name(),
                        error.message
                    ),
                    None => println!("  - {:?}: {}", error.error_type, error.message),
                }
            }
            println!();
        }

        // Determine exit code
        let exit_code = if summary.interrupted {
            println!();
            println!("⚠️  Generation interrupted gracefully. Tables already written were kept.");
            println!("   Re-run the same command to rewrite the full dataset.");
            println!();
            tracing::info!("Export interrupted by user signal");
            130 // SIGINT exit code (standard Unix convention)
        } else if summary.is_successful() {
            println!("✅ Dataset written successfully!");
            0
        } else {
            println!("⚠️  Export completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }

    /// Merge CLI flags into the loaded configuration
    fn apply_overrides(&self, config: &mut KarooConfig) {
        if let Some(n) = self.facilities {
            tracing::info!(facilities = n, "Overriding facility count from CLI");
            config.generator.facilities = n;
        }
        if let Some(n) = self.patients {
            tracing::info!(patients = n, "Overriding patient count from CLI");
            config.generator.patients = n;
        }
        if let Some(n) = self.drugs {
            tracing::info!(drugs = n, "Overriding drug count from CLI");
            config.generator.drugs = n;
        }
        if let Some(seed) = self.seed {
            tracing::info!(seed, "Overriding seed from CLI");
            config.generator.seed = seed;
        }
        if let Some(date) = self.start_date {
            config.generator.start_date = Some(date);
        }
        if let Some(date) = self.end_date {
            config.generator.end_date = Some(date);
        }

        if let Some(target) = self.output {
            tracing::info!(target = %target, "Overriding output target from CLI");
            config.output.target = target;
        }
        if let Some(ref dir) = self.output_dir {
            config.output.files.output_dir = dir.clone();
        }
        if let Some(ref project_id) = self.project_id {
            config
                .output
                .warehouse
                .get_or_insert_with(Default::default)
                .project_id = project_id.clone();
        }
        if let Some(ref dataset_id) = self.dataset_id {
            config
                .output
                .warehouse
                .get_or_insert_with(Default::default)
                .dataset_id = dataset_id.clone();
        }
        if let Some(ref credentials) = self.credentials {
            config
                .output
                .warehouse
                .get_or_insert_with(Default::default)
                .credentials_path = credentials.clone();
        }
        if let Some(ref connection_string) = self.connection_string {
            config
                .output
                .relational
                .get_or_insert_with(Default::default)
                .connection_string = secret_string(connection_string.clone());
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.output.dry_run = true;
        }
    }
}
