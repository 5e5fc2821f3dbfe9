//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the geopack configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing, so a success here means the
        // file is both well-formed and valid
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
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
        println!("  Log Level: {}", config.application.log_level);
        println!("  Store Endpoint: {}", config.store.endpoint);
        println!(
            "  Store Timeout: {}s",
            config.store.request_timeout_secs
        );
        if let Some(ref base) = config.object_store.public_base_url {
            println!("  Object Store Base URL: {base}");
        }
        if let Some(ref bucket) = config.object_store.bucket {
            println!("  Object Store Bucket: {bucket}");
        }
        println!("  Export Path: {}", config.export.export_path);
        println!(
            "  Plain Query Row Limit: {}",
            config.export.plain_query_row_limit
        );
        println!(
            "  Watch: every {}s for up to {}s",
            config.watch.poll_interval_secs, config.watch.deadline_secs
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let args = ValidateArgs {};
        assert_eq!(args.execute("nonexistent.toml").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let toml_content = r#"
[application]
log_level = "info"

[store]
endpoint = "https://store.example.com"
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();
        file.flush().unwrap();

        let args = ValidateArgs {};
        let code = args
            .execute(&file.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }
}
