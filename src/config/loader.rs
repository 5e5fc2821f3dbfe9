//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GeopackConfig;
use super::secret::secret_string;
use crate::domain::errors::GeopackError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GeopackConfig
/// 4. Applies environment variable overrides (GEOPACK_* prefix)
/// 5. Validates the configuration
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
/// use geopack::config::loader::load_config;
///
/// let config = load_config("geopack.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GeopackConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GeopackError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GeopackError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: GeopackConfig = toml::from_str(&contents)
        .map_err(|e| GeopackError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        GeopackError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. All missing variables are collected
/// and reported together.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid substitution pattern");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

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
        return Err(GeopackError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the GEOPACK_* prefix
///
/// Environment variables follow the pattern: GEOPACK_<SECTION>_<KEY>
/// For example: GEOPACK_STORE_ENDPOINT, GEOPACK_EXPORT_EXPORT_PATH
fn apply_env_overrides(config: &mut GeopackConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("GEOPACK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Store overrides
    if let Ok(val) = std::env::var("GEOPACK_STORE_ENDPOINT") {
        config.store.endpoint = val;
    }
    if let Ok(val) = std::env::var("GEOPACK_STORE_REQUEST_TIMEOUT_SECS") {
        if let Ok(secs) = val.parse() {
            config.store.request_timeout_secs = secs;
        }
    }

    // Object store overrides
    if let Ok(val) = std::env::var("GEOPACK_OBJECT_STORE_PUBLIC_BASE_URL") {
        config.object_store.public_base_url = Some(val);
    }
    if let Ok(val) = std::env::var("GEOPACK_OBJECT_STORE_BUCKET") {
        config.object_store.bucket = Some(val);
    }
    if let Ok(val) = std::env::var("GEOPACK_OBJECT_STORE_ACCESS_KEY_ID") {
        config.object_store.access_key_id = Some(val);
    }
    if let Ok(val) = std::env::var("GEOPACK_OBJECT_STORE_SECRET_ACCESS_KEY") {
        config.object_store.secret_access_key = Some(secret_string(val));
    }

    // Export overrides
    if let Ok(val) = std::env::var("GEOPACK_EXPORT_EXPORT_PATH") {
        config.export.export_path = val;
    }
    if let Ok(val) = std::env::var("GEOPACK_EXPORT_PLAIN_QUERY_ROW_LIMIT") {
        if let Ok(limit) = val.parse() {
            config.export.plain_query_row_limit = limit;
        }
    }

    // Watch overrides
    if let Ok(val) = std::env::var("GEOPACK_WATCH_POLL_INTERVAL_SECS") {
        if let Ok(secs) = val.parse() {
            config.watch.poll_interval_secs = secs;
        }
    }
    if let Ok(val) = std::env::var("GEOPACK_WATCH_DEADLINE_SECS") {
        if let Ok(secs) = val.parse() {
            config.watch.deadline_secs = secs;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("GEOPACK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("GEOPACK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
