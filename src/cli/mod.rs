//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for geopack using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// geopack - Geospatial feature export service
#[derive(Parser, Debug)]
#[command(name = "geopack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "geopack.toml", env = "GEOPACK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GEOPACK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile an export request into its canonical query plan
    Compile(commands::compile::CompileArgs),

    /// Watch an upload location and delete the local copy once it lands
    Watch(commands::watch::WatchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
