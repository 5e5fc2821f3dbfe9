//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "geopack.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing geopack configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set GEOPACK_OBJECT_STORE_SECRET_ACCESS_KEY if uploads are enabled");
                println!("  3. Validate configuration: geopack validate-config");
                println!("  4. Compile a request: geopack compile --request request.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# geopack configuration file

[application]
log_level = "info"

[store]
endpoint = "https://store.example.com"
request_timeout_secs = 60

[object_store]
# public_base_url = "https://downloads.example.com/exports"
# bucket = "exports"
# access_key_id = "${GEOPACK_OBJECT_STORE_ACCESS_KEY_ID}"
# secret_access_key = "${GEOPACK_OBJECT_STORE_SECRET_ACCESS_KEY}"

[export]
export_path = "exports"
default_output_type = "geojson"
plain_query_row_limit = 1000

[watch]
poll_interval_secs = 3
deadline_secs = 300

[logging]
local_enabled = true
local_path = "/var/log/geopack"
local_rotation = "daily"
local_max_size_mb = 100
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# geopack configuration file
#
# Geospatial feature export service: compiles tag-filter requests into
# canonical query plans, runs exports as background tasks, and watches
# uploads before cleaning up local copies.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Feature Store
# ============================================================================
[store]
# Base URL of the feature store service
endpoint = "https://store.example.com"

# Per-request timeout in seconds
request_timeout_secs = 60

# ============================================================================
# Object Store (upload target for finished exports)
# ============================================================================
[object_store]
# Public base URL where uploaded exports become reachable. The watcher
# probes beneath this URL before deleting local copies.
public_base_url = "https://downloads.example.com/exports"

# Bucket name
bucket = "exports"

# Credentials (use environment variables, set both or neither)
access_key_id = "${GEOPACK_OBJECT_STORE_ACCESS_KEY_ID}"
secret_access_key = "${GEOPACK_OBJECT_STORE_SECRET_ACCESS_KEY}"

# ============================================================================
# Export Settings
# ============================================================================
[export]
# Directory where per-task working directories are created
export_path = "exports"

# Output format used when a request does not name one
# (geojson, shp, kml, csv, mbtiles, flatgeobuf, sql, gpkg)
default_output_type = "geojson"

# Maximum number of rows a synchronous plain query may return
plain_query_row_limit = 1000

# ============================================================================
# Upload Watch
# ============================================================================
[watch]
# Seconds between upload probes
poll_interval_secs = 3

# Seconds before a watch gives up and retains the local copy
deadline_secs = 300

# ============================================================================
# Logging
# ============================================================================
[logging]
# Enable local file logging
local_enabled = true

# Local log file path
local_path = "/var/log/geopack"

# Log rotation (daily or size)
local_rotation = "daily"

# Maximum log file size in MB
local_max_size_mb = 100
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "geopack.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "geopack.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config_parses() {
        let content = InitArgs::generate_minimal_config();
        let parsed: crate::config::GeopackConfig = toml::from_str(&content).unwrap();
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = InitArgs::generate_config_with_examples();
        assert!(config.contains("[store]"));
        assert!(config.contains("[watch]"));
        assert!(config.contains("plain_query_row_limit"));
    }
}
