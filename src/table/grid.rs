//! The immutable two-dimensional table handed to renderers.

use super::key::Key;
use crate::error::{Axis, TableError};
use crate::types::RateValue;
use serde::Serialize;
use std::collections::HashSet;

/// Rectangular grid of values with hierarchical row and column indices.
///
/// Fields are private: once built and validated a table cannot change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    rows: Vec<Key>,
    columns: Vec<Key>,
    cells: Vec<Vec<RateValue>>,
}

impl Table {
    /// Build a table, checking that the grid is rectangular, that all keys on
    /// one axis have the same depth and that no key repeats.
    pub fn new(rows: Vec<Key>, columns: Vec<Key>, cells: Vec<Vec<RateValue>>) -> Result<Self, TableError> {
        if cells.len() != rows.len() {
            return Err(TableError::TableShape {
                reason: format!("{} rows of values for {} row keys", cells.len(), rows.len()),
            });
        }
        for (i, row) in cells.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::TableShape {
                    reason: format!("row {} has {} values for {} column keys", i, row.len(), columns.len()),
                });
            }
        }
        check_index(&rows, Axis::Rows)?;
        check_index(&columns, Axis::Columns)?;

        Ok(Table { rows, columns, cells })
    }

    pub fn rows(&self) -> &[Key] {
        &self.rows
    }

    pub fn columns(&self) -> &[Key] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Value at a (row, column) position
    pub fn cell(&self, row: usize, column: usize) -> Option<&RateValue> {
        self.cells.get(row).and_then(|r| r.get(column))
    }

    /// Value addressed by full keys
    pub fn get(&self, row: &Key, column: &Key) -> Option<&RateValue> {
        let r = self.rows.iter().position(|k| k == row)?;
        let c = self.columns.iter().position(|k| k == column)?;
        self.cell(r, c)
    }

    /// All values of the row with this full key
    pub fn row(&self, key: &Key) -> Option<&[RateValue]> {
        let r = self.rows.iter().position(|k| k == key)?;
        Some(self.cells[r].as_slice())
    }

    /// Rows in index order with their values
    pub fn iter_rows(&self) -> impl Iterator<Item = (&Key, &[RateValue])> {
        self.rows.iter().zip(self.cells.iter().map(|r| r.as_slice()))
    }

    /// Distinct labels at `level` of an axis, in order of first appearance.
    pub fn level_values(&self, axis: Axis, level: usize) -> Vec<&str> {
        let keys = match axis {
            Axis::Rows => &self.rows,
            Axis::Columns => &self.columns,
        };
        let mut seen = HashSet::new();
        keys.iter().filter_map(|k| k.level(level)).filter(|label| seen.insert(*label)).collect()
    }

    /// Sub-table of the rows whose key starts with `prefix`, prefix levels
    /// stripped from the returned row keys.
    ///
    /// Returns `None` when nothing matches or when the prefix is as deep as
    /// the keys themselves (use [`Table::row`] for full-key lookups).
    pub fn select_rows(&self, prefix: &[&str]) -> Option<Table> {
        let depth = self.rows.first().map(|k| k.depth()).unwrap_or(0);
        if prefix.len() >= depth {
            return None;
        }

        let mut rows = Vec::new();
        let mut cells = Vec::new();
        for (key, values) in self.rows.iter().zip(&self.cells) {
            if key.starts_with(prefix) {
                rows.push(key.strip_levels(prefix.len()));
                cells.push(values.clone());
            }
        }
        if rows.is_empty() {
            return None;
        }
        Some(Table { rows, columns: self.columns.clone(), cells })
    }

    /// Sub-table of the columns whose key starts with `prefix`, prefix levels
    /// stripped from the returned column keys.
    pub fn select_columns(&self, prefix: &[&str]) -> Option<Table> {
        let depth = self.columns.first().map(|k| k.depth()).unwrap_or(0);
        if prefix.len() >= depth {
            return None;
        }

        let picked: Vec<usize> = (0..self.columns.len()).filter(|&c| self.columns[c].starts_with(prefix)).collect();
        if picked.is_empty() {
            return None;
        }
        let columns = picked.iter().map(|&c| self.columns[c].strip_levels(prefix.len())).collect();
        let cells = self.cells.iter().map(|row| picked.iter().map(|&c| row[c].clone()).collect()).collect();
        Some(Table { rows: self.rows.clone(), columns, cells })
    }

    /// Column index with one level removed from every key
    pub fn column_keys_without_level(&self, level: usize) -> Vec<Key> {
        self.columns.iter().map(|k| k.without_level(level)).collect()
    }
}

fn check_index(keys: &[Key], axis: Axis) -> Result<(), TableError> {
    let Some(first) = keys.first() else {
        return Ok(());
    };
    let expected = first.depth();
    let mut seen = HashSet::new();
    for key in keys {
        if key.depth() != expected {
            return Err(TableError::MixedKeyDepth { axis, key: key.to_string(), expected, found: key.depth() });
        }
        if !seen.insert(key) {
            return Err(TableError::DuplicateKey { axis, key: key.to_string() });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
