//! Watch command implementation
//!
//! This module implements the `watch` command: probe an upload location
//! until the export becomes reachable, then delete the local copy.

use crate::adapters::objectstore::HttpHeadProbe;
use crate::config::load_config;
use crate::core::{watch_upload, WatchOptions, WatchOutcome};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Public URL where the uploaded export is expected to appear
    #[arg(short, long)]
    pub url: String,

    /// Local file or directory to delete once the upload is confirmed
    #[arg(short, long)]
    pub path: PathBuf,

    /// Override the poll interval in seconds
    #[arg(long)]
    pub poll_interval_secs: Option<u64>,

    /// Override the deadline in seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,
}

impl WatchArgs {
    /// Execute the watch command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let url = match Url::parse(&self.url) {
            Ok(u) => u,
            Err(e) => {
                println!("❌ Invalid upload URL: {}", self.url);
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let options = WatchOptions {
            poll_interval: Duration::from_secs(
                self.poll_interval_secs
                    .unwrap_or(config.watch.poll_interval_secs),
            ),
            deadline: Duration::from_secs(self.deadline_secs.unwrap_or(config.watch.deadline_secs)),
        };

        tracing::info!(
            url = %url,
            path = %self.path.display(),
            poll_interval_secs = options.poll_interval.as_secs(),
            deadline_secs = options.deadline.as_secs(),
            "Watching upload"
        );

        println!("👀 Watching {url}");
        println!("   Local copy: {}", self.path.display());
        println!();

        let probe = HttpHeadProbe::new(Duration::from_secs(config.store.request_timeout_secs));

        match watch_upload(&probe, &url, &self.path, options).await {
            WatchOutcome::Uploaded => {
                println!("✅ Upload confirmed, local copy deleted");
                Ok(0)
            }
            WatchOutcome::TimedOut => {
                println!("⚠️  Upload not confirmed before the deadline");
                println!("   Local copy retained: {}", self.path.display());
                Ok(4)
            }
        }
    }
}
