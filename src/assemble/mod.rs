//! Table assembly - records in, validated tables out.
//!
//! This module handles:
//! - Power tables: column groups of records → (effect × method/outcome/scenario) grid
//! - Type I error tables: row groups of records → (row label × outcome) grid
//! - Power reports: per-method power segments stacked under one header
//!
//! Every check is an ordered-key comparison that fails the whole build with a
//! `TableError`. Values are normalized only after all checks passed.

mod alpha;
mod power;
mod report;

pub use alpha::{RowGroup, assemble_alpha_error_table};
pub use power::{ColumnGroup, assemble_power_table};
pub use report::PowerReport;
