//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod generate;
pub mod init;
pub mod validate;

use crate::config::{load_config, load_config_or_default, KarooConfig};
use crate::domain::Result;

/// Configuration path used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "karoo.toml";

/// Load the configuration a command should run with
///
/// An explicit `--config` path must point at an existing file. The default
/// path is allowed to be absent, in which case the built-in defaults are
/// used (environment overrides still apply).
pub fn load_cli_config(config_path: Option<&str>) -> Result<KarooConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => load_config_or_default(DEFAULT_CONFIG_PATH),
    }
}
