//! Table value objects - the engine's output.
//!
//! This module holds:
//! - `Key` - one row/column index entry, possibly multi-level
//! - `Table` - immutable rectangular grid addressed by keys
//! - `PowerTable` / `AlphaErrorTable` - typed wrappers returned by the assemblers
//!
//! Renderers only need to walk the row index, the column index and fetch one
//! value per (row, column) pair.

mod grid;
mod key;

pub use grid::Table;
pub use key::Key;

use serde::Serialize;
use std::ops::Deref;

/// Power table: rows (family, magnitude), columns (method, outcome, scenario).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerTable {
    period: String,
    #[serde(flatten)]
    table: Table,
}

impl PowerTable {
    pub(crate) fn new(period: impl Into<String>, table: Table) -> Self {
        PowerTable { period: period.into(), table }
    }

    /// Period label the rejection rates were taken from
    pub fn period(&self) -> &str {
        &self.period
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
}

impl Deref for PowerTable {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.table
    }
}

/// Type I error table: rows are display labels, columns are outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AlphaErrorTable {
    table: Table,
}

impl AlphaErrorTable {
    pub(crate) fn new(table: Table) -> Self {
        AlphaErrorTable { table }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
}

impl Deref for AlphaErrorTable {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.table
    }
}
