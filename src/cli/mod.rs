//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod convert;
mod detect;

pub use convert::run_convert;
pub use detect::{detect_document, format_detection, run_detect};

// Re-export config types used by handlers
pub use crate::config::CodecConfig;
