//! Configuration management for geopack.
//!
//! TOML-based configuration loading, parsing, and validation with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GEOPACK_*` environment variable overrides
//! - Default values for optional settings
//! - Per-section validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use geopack::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("geopack.toml")?;
//!
//! println!("Store endpoint: {}", config.store.endpoint);
//! println!("Export path: {}", config.export.export_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! endpoint = "https://store.example.com"
//!
//! [object_store]
//! public_base_url = "https://downloads.example.com/exports"
//! bucket = "exports"
//! access_key_id = "AKIAEXAMPLE"
//! secret_access_key = "${GEOPACK_OBJECT_STORE_SECRET_ACCESS_KEY}"
//!
//! [export]
//! export_path = "exports"
//! plain_query_row_limit = 1000
//!
//! [watch]
//! poll_interval_secs = 3
//! deadline_secs = 300
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ExportConfig, GeopackConfig, LoggingConfig, ObjectStoreConfig, StoreConfig,
    WatchConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
