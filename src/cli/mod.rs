//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Karoo using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Karoo - Synthetic Healthcare ERP Data Generator
#[derive(Parser, Debug)]
#[command(name = "karoo")]
#[command(version, about, long_about = None)]
#[command(author = "Karoo Contributors")]
pub struct Cli {
    /// Path to configuration file (default karoo.toml; missing default falls
    /// back to built-in settings)
    #[arg(short, long, env = "KAROO_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "KAROO_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a synthetic dataset and write it to the configured sink
    Generate(commands::generate::GenerateArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from(["karoo", "generate"]);
        assert_eq!(cli.config, None);
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["karoo", "--config", "custom.toml", "generate"]);
        assert_eq!(cli.config, Some("custom.toml".to_string()));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["karoo", "--log-level", "debug", "generate"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["karoo", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["karoo", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_generate_overrides() {
        let cli = Cli::parse_from([
            "karoo",
            "generate",
            "--facilities",
            "3",
            "--output",
            "relational",
            "--dry-run",
        ]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.facilities, Some(3));
                assert_eq!(
                    args.output,
                    Some(crate::config::OutputTarget::Relational)
                );
                assert!(args.dry_run);
            }
            _ => panic!("expected generate command"),
        }
    }
}
