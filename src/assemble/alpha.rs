//! Type I error table assembly.
//!
//! The layout is the transpose of the power table: each row is one
//! (method, side, period) combination and each of its sources is one outcome
//! column. Row metadata must agree within a row; the outcome list must be the
//! same for every row.

use crate::error::TableError;
use crate::labels::DisplayLabels;
use crate::normalize::normalize;
use crate::record::RecordSource;
use crate::table::{AlphaErrorTable, Key, Table};
use crate::types::{Method, RateValue, Side, Target};
use log::{debug, info};

/// One table row: display label, period and one source per outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup {
    pub label: String,
    pub period: String,
    pub sources: Vec<String>,
}

impl RowGroup {
    pub fn new<I, S>(label: impl Into<String>, period: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RowGroup { label: label.into(), period: period.into(), sources: sources.into_iter().map(Into::into).collect() }
    }

    /// Zip three parallel sequences (sources per row, period per row, label
    /// per row) into row groups.
    pub fn from_parallel(
        groups: Vec<Vec<String>>,
        periods: Vec<String>,
        labels: Vec<String>,
    ) -> Result<Vec<RowGroup>, TableError> {
        if groups.len() != periods.len() || groups.len() != labels.len() {
            return Err(TableError::LayoutLengthMismatch {
                groups: groups.len(),
                periods: periods.len(),
                labels: labels.len(),
            });
        }
        Ok(groups
            .into_iter()
            .zip(periods)
            .zip(labels)
            .map(|((sources, period), label)| RowGroup { label, period, sources })
            .collect())
    }
}

/// Build the Type I error table from ordered row groups.
pub fn assemble_alpha_error_table<S: RecordSource>(
    source: &S,
    rows: &[RowGroup],
    labels: &DisplayLabels,
) -> Result<AlphaErrorTable, TableError> {
    if rows.is_empty() {
        return Err(TableError::EmptyLayout { what: "alpha error table rows".to_string() });
    }
    debug!("Assembling alpha error table from {} rows", rows.len());

    let mut targets: Option<Vec<Target>> = None;
    let mut row_keys = Vec::with_capacity(rows.len());
    let mut cells = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let (row_targets, rates) = read_row(source, index, row)?;

        if let Some(expected) = &targets
            && *expected != row_targets
        {
            return Err(TableError::ColumnLabelMismatch {
                row: index,
                label: row.label.clone(),
                expected: target_strings(expected),
                found: target_strings(&row_targets),
            });
        }

        row_keys.push(Key::single(row.label.as_str()));
        cells.push(rates);
        targets = Some(row_targets);
    }

    let column_keys = targets.unwrap_or_default().into_iter().map(|t| labels.outcome_column_key(t)).collect();
    let cells = cells.iter().map(|row: &Vec<RateValue>| row.iter().map(normalize).collect()).collect();

    let table = Table::new(row_keys, column_keys, cells)?;
    info!("Built alpha error table: {} rows x {} columns", table.n_rows(), table.n_columns());
    Ok(AlphaErrorTable::new(table))
}

/// Read one row's sources; returns the outcome list and the raw rates
fn read_row<S: RecordSource>(
    source: &S,
    index: usize,
    row: &RowGroup,
) -> Result<(Vec<Target>, Vec<RateValue>), TableError> {
    if row.sources.is_empty() {
        return Err(TableError::EmptyLayout { what: format!("row {} ('{}')", index, row.label) });
    }

    let mut first: Option<(&str, Method, Side)> = None;
    let mut targets = Vec::with_capacity(row.sources.len());
    let mut rates = Vec::with_capacity(row.sources.len());

    for id in &row.sources {
        let record = source.load(id)?;

        if let Some((first_id, method, side)) = first {
            let mismatch = |field: &'static str, a: String, b: String| TableError::InconsistentRowMetadata {
                row: index,
                label: row.label.clone(),
                field,
                first_source: first_id.to_string(),
                first: a,
                other_source: id.clone(),
                other: b,
            };
            if record.method != method {
                return Err(mismatch("method", method.to_string(), record.method.to_string()));
            }
            if record.side != side {
                return Err(mismatch("side", side.to_string(), record.side.to_string()));
            }
        } else {
            first = Some((id.as_str(), record.method, record.side));
        }

        let alpha = record.alpha_error.as_ref().ok_or_else(|| TableError::malformed(id, "missing `alpha_error`"))?;
        let rate = alpha
            .rejection_rate
            .get(&row.period)
            .ok_or_else(|| TableError::malformed(id, format!("no rejection rate for period '{}'", row.period)))?;
        targets.push(record.target);
        rates.push(rate.clone());
    }

    Ok((targets, rates))
}

fn target_strings(targets: &[Target]) -> Vec<String> {
    targets.iter().map(|t| t.as_str().to_string()).collect()
}

#[cfg(test)]
#[path = "alpha_test.rs"]
mod alpha_test;
