//! Power table assembly.
//!
//! Each column group is one (method, outcome, scenario) combination made of
//! several records, normally the log-normal and the normal effect run. The
//! records are read strictly in group order because every group's label
//! order is compared with the group before it.

use crate::error::TableError;
use crate::labels::{DisplayLabels, EffectLabel};
use crate::normalize::normalize;
use crate::record::RecordSource;
use crate::table::{Key, PowerTable, Table};
use crate::types::{Method, RateValue, ResultRecord, Side, Target};
use log::{debug, info};
use std::collections::HashSet;

/// Sources that together form one table column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGroup {
    pub sources: Vec<String>,
}

impl ColumnGroup {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnGroup { sources: sources.into_iter().map(Into::into).collect() }
    }

    /// The usual (log-normal, normal) pair
    pub fn pair(lognormal: impl Into<String>, normal: impl Into<String>) -> Self {
        ColumnGroup { sources: vec![lognormal.into(), normal.into()] }
    }
}

/// Metadata one source reports about itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMeta {
    method: Method,
    target: Target,
    scenario: u32,
    side: Side,
}

/// One assembled column before transposition
struct Column {
    meta: ColumnMeta,
    labels: Vec<EffectLabel>,
    rates: Vec<RateValue>,
}

/// Build a power table for `period` from ordered column groups.
///
/// Fails on the first malformed record, metadata disagreement inside a group,
/// or label list that differs from the previous group's.
pub fn assemble_power_table<S: RecordSource>(
    source: &S,
    groups: &[ColumnGroup],
    period: &str,
    labels: &DisplayLabels,
) -> Result<PowerTable, TableError> {
    if groups.is_empty() {
        return Err(TableError::EmptyLayout { what: "power table column groups".to_string() });
    }
    debug!("Assembling power table for period {} from {} column groups", period, groups.len());

    let mut columns: Vec<Column> = Vec::with_capacity(groups.len());
    for (index, group) in groups.iter().enumerate() {
        let column = read_column(source, index, group, period)?;

        if let Some(previous) = columns.last()
            && previous.labels != column.labels
        {
            return Err(TableError::RowLabelMismatch {
                group: index,
                expected: label_strings(&previous.labels),
                found: label_strings(&column.labels),
            });
        }
        columns.push(column);
    }

    // All groups share one label list; emit rows in canonical effect order.
    let shared = &columns[0].labels;
    let mut order: Vec<usize> = (0..shared.len()).collect();
    order.sort_by_key(|&i| shared[i]);

    let row_keys: Vec<Key> = order.iter().map(|&i| labels.effect_row_key(shared[i])).collect();
    let column_keys: Vec<Key> = columns
        .iter()
        .map(|c| labels.power_column_key(c.meta.method, c.meta.target, c.meta.scenario))
        .collect();
    let cells: Vec<Vec<RateValue>> =
        order.iter().map(|&i| columns.iter().map(|c| normalize(&c.rates[i])).collect()).collect();

    let table = Table::new(row_keys, column_keys, cells)?;
    info!("Built power table: {} rows x {} columns ({})", table.n_rows(), table.n_columns(), period);
    Ok(PowerTable::new(period, table))
}

/// Read every source of one group and check that they describe the same column
fn read_column<S: RecordSource>(
    source: &S,
    index: usize,
    group: &ColumnGroup,
    period: &str,
) -> Result<Column, TableError> {
    if group.sources.is_empty() {
        return Err(TableError::EmptyLayout { what: format!("column group {}", index) });
    }

    let mut first: Option<(&str, ColumnMeta)> = None;
    let mut labels = Vec::new();
    let mut rates = Vec::new();
    let mut seen = HashSet::new();

    for id in &group.sources {
        let record = source.load(id)?;
        let meta = column_meta(id, &record)?;

        match first {
            None => first = Some((id.as_str(), meta)),
            Some((first_id, first_meta)) => check_same_column(index, first_id, &first_meta, id, &meta)?,
        }

        let power = record.power.as_ref().ok_or_else(|| TableError::malformed(id, "missing `power`"))?;
        for (label, effect) in power.iter() {
            let effect_label = EffectLabel::parse(label)
                .ok_or_else(|| TableError::UnknownEffectLabel { source_id: id.clone(), label: label.to_string() })?;
            if !seen.insert(effect_label) {
                return Err(TableError::DuplicateEffectLabel { group: index, label: label.to_string() });
            }
            let rate = effect.rejection_rate.get(period).ok_or_else(|| {
                TableError::malformed(id, format!("no rejection rate for period '{}' under '{}'", period, label))
            })?;
            labels.push(effect_label);
            rates.push(rate.clone());
        }
    }

    let meta = match first {
        Some((_, meta)) => meta,
        None => return Err(TableError::EmptyLayout { what: format!("column group {}", index) }),
    };
    debug!(
        "Column group {}: {} {} scenario {} ({} labels)",
        index,
        meta.method,
        meta.target,
        meta.scenario,
        labels.len()
    );
    Ok(Column { meta, labels, rates })
}

fn column_meta(id: &str, record: &ResultRecord) -> Result<ColumnMeta, TableError> {
    let scenario = record.scenario.ok_or_else(|| TableError::malformed(id, "missing `scenario`"))?;
    Ok(ColumnMeta { method: record.method, target: record.target, scenario, side: record.side })
}

fn check_same_column(
    group: usize,
    first_id: &str,
    first: &ColumnMeta,
    other_id: &str,
    other: &ColumnMeta,
) -> Result<(), TableError> {
    let mismatch = |field: &'static str, a: String, b: String| TableError::InconsistentColumnMetadata {
        group,
        field,
        first_source: first_id.to_string(),
        first: a,
        other_source: other_id.to_string(),
        other: b,
    };

    if first.method != other.method {
        return Err(mismatch("method", first.method.to_string(), other.method.to_string()));
    }
    if first.target != other.target {
        return Err(mismatch("target", first.target.to_string(), other.target.to_string()));
    }
    if first.scenario != other.scenario {
        return Err(mismatch("scenario", first.scenario.to_string(), other.scenario.to_string()));
    }
    if first.side != other.side {
        return Err(mismatch("side", first.side.to_string(), other.side.to_string()));
    }
    Ok(())
}

fn label_strings(labels: &[EffectLabel]) -> Vec<String> {
    labels.iter().map(|l| l.as_str().to_string()).collect()
}

#[cfg(test)]
#[path = "power_test.rs"]
mod power_test;
