//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod compile;
pub mod init;
pub mod validate;
pub mod watch;
