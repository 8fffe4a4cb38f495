//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Karoo configuration file.

use crate::config::OutputTarget;
use chrono::Utc;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let display_path = config_path.unwrap_or(super::DEFAULT_CONFIG_PATH);
        tracing::info!(config_path = %display_path, "Validating configuration");

        println!("🔍 Validating configuration file: {display_path}");
        println!();

        // Load configuration (the loader validates after applying overrides)
        let config = match super::load_cli_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");

        let (start, end) = config.generator.resolved_dates(Utc::now().date_naive());
        println!("  Facilities: {}", config.generator.facilities);
        println!("  Patients: {}", config.generator.patients);
        println!("  Drugs: {}", config.generator.drugs);
        println!("  Seed: {}", config.generator.seed);
        println!("  Date range: {start} to {end}");
        println!(
            "  Visits per facility: {}-{}",
            config.generator.visits_per_facility_min, config.generator.visits_per_facility_max
        );

        // Display sink-specific configuration
        match config.output.target {
            OutputTarget::Files => {
                println!("  Output Target: Files");
                println!("  Output Directory: {}", config.output.files.output_dir);
                println!(
                    "  Data Dictionary: {}",
                    config.output.files.write_dictionary
                );
            }
            OutputTarget::Warehouse => {
                if let Some(ref warehouse_config) = config.output.warehouse {
                    println!("  Output Target: Warehouse");
                    println!("  Project: {}", warehouse_config.project_id);
                    println!("  Dataset: {}", warehouse_config.dataset_id);
                    println!("  Endpoint: {}", warehouse_config.endpoint);
                    println!("  Batch Size: {}", warehouse_config.batch_size);
                    println!("  Max Concurrency: {}", warehouse_config.max_concurrency);
                }
            }
            OutputTarget::Relational => {
                if let Some(ref pg_config) = config.output.relational {
                    println!("  Output Target: PostgreSQL");
                    println!(
                        "  PostgreSQL Connection: {}",
                        pg_config.connection_string_safe()
                    );
                    println!("  Max Connections: {}", pg_config.max_connections);
                    println!("  Batch Size: {}", pg_config.batch_size);
                }
            }
        }

        println!("  Dry Run: {}", config.output.dry_run);
        println!("  Log Level: {}", config.logging.level);
        println!();
        Ok(0)
    }
}
