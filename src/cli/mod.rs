//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod config;
mod grade;

pub use config::{config_init, config_path, config_show};
pub use grade::{GradeConfig, run_grade};
