//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::KarooConfig;
use crate::domain::errors::KarooError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into KarooConfig
/// 4. Applies environment variable overrides (KAROO_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use karoo::config::loader::load_config;
///
/// let config = load_config("karoo.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<KarooConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(KarooError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        KarooError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: KarooConfig = toml::from_str(&contents)
        .map_err(|e| KarooError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        KarooError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads configuration from a TOML file, falling back to built-in defaults
///
/// Unlike [`load_config`], a missing file is not an error: the defaults are
/// used instead (environment overrides still apply). This is the behavior for
/// the default config path, where no `karoo.toml` simply means "use defaults".
///
/// # Errors
///
/// Returns an error if an existing file fails to load, or if the resulting
/// configuration fails validation.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<KarooConfig> {
    let path = path.as_ref();

    if path.exists() {
        return load_config(path);
    }

    let mut config = KarooConfig::default();
    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        KarooError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Arguments
///
/// * `input` - String containing ${VAR} placeholders
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env placeholder pattern is valid");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(KarooError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using KAROO_* prefix
///
/// Environment variables follow the pattern: KAROO_<SECTION>_<KEY>
/// For example: KAROO_GENERATOR_SEED, KAROO_OUTPUT_TARGET
///
/// # Arguments
///
/// * `config` - Mutable reference to the configuration to update
fn apply_env_overrides(config: &mut KarooConfig) {
    use crate::config::secret_string;

    // Generator overrides
    if let Ok(val) = std::env::var("KAROO_GENERATOR_FACILITIES") {
        if let Ok(n) = val.parse() {
            config.generator.facilities = n;
        }
    }
    if let Ok(val) = std::env::var("KAROO_GENERATOR_PATIENTS") {
        if let Ok(n) = val.parse() {
            config.generator.patients = n;
        }
    }
    if let Ok(val) = std::env::var("KAROO_GENERATOR_DRUGS") {
        if let Ok(n) = val.parse() {
            config.generator.drugs = n;
        }
    }
    if let Ok(val) = std::env::var("KAROO_GENERATOR_SEED") {
        if let Ok(seed) = val.parse() {
            config.generator.seed = seed;
        }
    }
    if let Ok(val) = std::env::var("KAROO_GENERATOR_PATIENT_SALT") {
        config.generator.patient_salt = val;
    }
    if let Ok(val) = std::env::var("KAROO_GENERATOR_START_DATE") {
        if let Ok(date) = val.parse() {
            config.generator.start_date = Some(date);
        }
    }
    if let Ok(val) = std::env::var("KAROO_GENERATOR_END_DATE") {
        if let Ok(date) = val.parse() {
            config.generator.end_date = Some(date);
        }
    }

    // Output overrides
    if let Ok(val) = std::env::var("KAROO_OUTPUT_TARGET") {
        if let Ok(target) = val.parse() {
            config.output.target = target;
        }
    }
    if let Ok(val) = std::env::var("KAROO_OUTPUT_DRY_RUN") {
        config.output.dry_run = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("KAROO_FILES_OUTPUT_DIR") {
        config.output.files.output_dir = val;
    }

    // Warehouse overrides (the section is created on demand so the sink can
    // be configured purely through the environment)
    if let Ok(val) = std::env::var("KAROO_WAREHOUSE_PROJECT_ID") {
        config
            .output
            .warehouse
            .get_or_insert_with(Default::default)
            .project_id = val;
    }
    if let Ok(val) = std::env::var("KAROO_WAREHOUSE_DATASET_ID") {
        config
            .output
            .warehouse
            .get_or_insert_with(Default::default)
            .dataset_id = val;
    }
    if let Ok(val) = std::env::var("KAROO_WAREHOUSE_CREDENTIALS_PATH") {
        config
            .output
            .warehouse
            .get_or_insert_with(Default::default)
            .credentials_path = val;
    }
    if let Ok(val) = std::env::var("KAROO_WAREHOUSE_ENDPOINT") {
        config
            .output
            .warehouse
            .get_or_insert_with(Default::default)
            .endpoint = val;
    }

    // Relational overrides
    if let Ok(val) = std::env::var("KAROO_RELATIONAL_CONNECTION_STRING") {
        config
            .output
            .relational
            .get_or_insert_with(Default::default)
            .connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("KAROO_RELATIONAL_MAX_CONNECTIONS") {
        if let Ok(n) = val.parse() {
            config
                .output
                .relational
                .get_or_insert_with(Default::default)
                .max_connections = n;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("KAROO_LOGGING_LEVEL") {
        config.logging.level = val;
    }
    if let Ok(val) = std::env::var("KAROO_LOGGING_FILE_ENABLED") {
        config.logging.file_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("KAROO_LOGGING_DIRECTORY") {
        config.logging.directory = val;
    }
}
