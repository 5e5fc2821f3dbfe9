//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the
//! geopack TOML file.

use crate::config::SecretString;
use crate::domain::OutputType;
use serde::{Deserialize, Serialize};

/// Main geopack configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeopackConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Feature store configuration
    pub store: StoreConfig,

    /// Object store configuration (upload target for finished exports)
    #[serde(default)]
    pub object_store: ObjectStoreConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Upload watch settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GeopackConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate()?;
        self.object_store.validate()?;
        self.export.validate()?;
        self.watch.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Feature store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the feature store service
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("store.endpoint cannot be empty".to_string());
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err("store.endpoint must start with http:// or https://".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("store.request_timeout_secs must be > 0".to_string());
        }

        Ok(())
    }
}

/// Object store configuration
///
/// Finished exports are published under `public_base_url`; the watcher
/// probes that location before deleting the local copy.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObjectStoreConfig {
    /// Public base URL where uploaded exports become reachable
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Bucket name
    #[serde(default)]
    pub bucket: Option<String>,

    /// Access key ID
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Secret access key
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
}

impl ObjectStoreConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref base) = self.public_base_url {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(
                    "object_store.public_base_url must start with http:// or https://".to_string(),
                );
            }
        }

        // Credentials come as a pair or not at all
        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(
                "object_store.access_key_id and object_store.secret_access_key must be set together"
                    .to_string(),
            );
        }

        Ok(())
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory where per-task working directories are created
    #[serde(default = "default_export_path")]
    pub export_path: String,

    /// Output format used when a request does not name one
    #[serde(default)]
    pub default_output_type: OutputType,

    /// Maximum number of rows a plain query may return
    #[serde(default = "default_plain_query_row_limit")]
    pub plain_query_row_limit: usize,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.export_path.is_empty() {
            return Err("export.export_path cannot be empty".to_string());
        }

        if self.plain_query_row_limit == 0 {
            return Err("export.plain_query_row_limit must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
            default_output_type: OutputType::default(),
            plain_query_row_limit: default_plain_query_row_limit(),
        }
    }
}

/// Upload watch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Seconds between upload probes
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Seconds before a watch gives up and retains the local copy
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

impl WatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.poll_interval_secs == 0 {
            return Err("watch.poll_interval_secs must be > 0".to_string());
        }

        if self.deadline_secs < self.poll_interval_secs {
            return Err(format!(
                "watch.deadline_secs ({}) must be >= watch.poll_interval_secs ({})",
                self.deadline_secs, self.poll_interval_secs
            ));
        }

        Ok(())
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            deadline_secs: default_deadline_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_local_max_size_mb")]
    pub local_max_size_mb: usize,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "size"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_size_mb == 0 {
            return Err("logging.local_max_size_mb must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_size_mb: default_local_max_size_mb(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_export_path() -> String {
    "exports".to_string()
}

fn default_plain_query_row_limit() -> usize {
    1000
}

fn default_poll_interval_secs() -> u64 {
    3
}

fn default_deadline_secs() -> u64 {
    300
}

fn default_local_path() -> String {
    "/var/log/geopack".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_size_mb() -> usize {
    100
}
