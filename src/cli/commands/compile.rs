//! Compile command implementation
//!
//! This module implements the `compile` command for turning an export
//! request file into its canonical query plan without dispatching a task.

use crate::compiler::{compile_filters, compile_plain};
use crate::domain::{ExportRequest, PlainQuery};
use clap::Args;
use std::fs;

/// Arguments for the compile command
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Path to a JSON export request file
    #[arg(short, long)]
    pub request: String,

    /// Treat the file as a plain query instead of an export request
    #[arg(long)]
    pub plain: bool,
}

impl CompileArgs {
    /// Execute the compile command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(request = %self.request, plain = self.plain, "Compiling request");

        println!("🔧 Compiling request file: {}", self.request);
        println!();

        let contents = match fs::read_to_string(&self.request) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to read request file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if self.plain {
            self.compile_plain_query(&contents)
        } else {
            self.compile_export_request(&contents)
        }
    }

    fn compile_export_request(&self, contents: &str) -> anyhow::Result<i32> {
        let request: ExportRequest = match serde_json::from_str(contents) {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Failed to parse export request");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if let Err(e) = request.validate() {
            println!("❌ Invalid export request");
            println!("   Error: {e}");
            return Ok(3);
        }

        match compile_filters(&request.geometry_type, request.filters.as_ref()) {
            Ok(plan) => {
                println!("✅ Request compiled successfully");
                println!();
                println!("{}", plan.to_canonical_json()?);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Filter compilation failed");
                println!("   Error: {e}");
                Ok(3)
            }
        }
    }

    fn compile_plain_query(&self, contents: &str) -> anyhow::Result<i32> {
        let query: PlainQuery = match serde_json::from_str(contents) {
            Ok(q) => q,
            Err(e) => {
                println!("❌ Failed to parse plain query");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        match compile_plain(&query) {
            Ok(plan) => {
                println!("✅ Plain query compiled successfully");
                println!();
                println!("{}", serde_json::to_string_pretty(&plan)?);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Plain query compilation failed");
                println!("   Error: {e}");
                Ok(3)
            }
        }
    }
}
