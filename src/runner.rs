use crate::assemble::{PowerReport, assemble_alpha_error_table, assemble_power_table};
use crate::config::{ReportPlan, TableJob};
use crate::error::TableError;
use crate::labels::DisplayLabels;
use crate::record::DirSource;
use crate::table::AlphaErrorTable;
use log::{debug, info};
use serde::Serialize;
use std::path::Path;

/// A validated table, ready for export and preview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BuiltTable {
    Power(PowerReport),
    AlphaError(AlphaErrorTable),
}

impl BuiltTable {
    pub fn kind(&self) -> &'static str {
        match self {
            BuiltTable::Power(_) => "power",
            BuiltTable::AlphaError(_) => "alpha_error",
        }
    }
}

/// The first table that failed, and why
#[derive(Debug, PartialEq)]
pub struct TableFailure {
    pub number: u32,
    pub error: TableError,
}

/// Build every table of the plan in order.
///
/// The callback sees each table as soon as it is built. Building stops at the
/// first failure; tables already handed to the callback stay delivered.
pub fn run_tables<F>(plan: &ReportPlan, mut on_table: F) -> Result<usize, TableFailure>
where
    F: FnMut(&TableJob, &BuiltTable),
{
    debug!("Building {} tables from {:?}", plan.tables.len(), plan.input_dir);

    for job in &plan.tables {
        let table = build_table(job, &plan.input_dir, &plan.labels)
            .map_err(|error| TableFailure { number: job.number(), error })?;
        on_table(job, &table);
    }

    Ok(plan.tables.len())
}

/// Build one table with records read below `input_dir`
pub fn build_table(job: &TableJob, input_dir: &Path, labels: &DisplayLabels) -> Result<BuiltTable, TableError> {
    let root = DirSource::new(input_dir);

    match job {
        TableJob::Power { number, period, segments, .. } => {
            let mut tables = Vec::with_capacity(segments.len());
            for segment in segments {
                let source = match &segment.dir {
                    Some(dir) => root.subdir(dir),
                    None => root.clone(),
                };
                tables.push(assemble_power_table(&source, &segment.groups, period, labels)?);
            }
            let report = PowerReport::new(tables)?;
            info!("Table {}: power report with {} segments", number, report.segments().len());
            Ok(BuiltTable::Power(report))
        }
        TableJob::AlphaError { number, rows, .. } => {
            let table = assemble_alpha_error_table(&root, rows, labels)?;
            info!("Table {}: alpha error table with {} rows", number, table.n_rows());
            Ok(BuiltTable::AlphaError(table))
        }
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;
