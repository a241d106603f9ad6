//! Multi-segment power report.
//!
//! A published power table is several per-method segments stacked on top of
//! each other under one shared (outcome, scenario) header.

use crate::error::TableError;
use crate::table::{Key, PowerTable};
use log::debug;
use serde::Serialize;

/// Level of a power column key holding the method name
const METHOD_LEVEL: usize = 0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerReport {
    period: String,
    header: Vec<Key>,
    segments: Vec<PowerTable>,
}

impl PowerReport {
    /// Check that every segment shares the first one's period and its column
    /// index once the method level is dropped.
    pub fn new(segments: Vec<PowerTable>) -> Result<Self, TableError> {
        let Some(first) = segments.first() else {
            return Err(TableError::EmptyLayout { what: "power report segments".to_string() });
        };
        let period = first.period().to_string();
        let header = first.column_keys_without_level(METHOD_LEVEL);

        for (index, segment) in segments.iter().enumerate().skip(1) {
            if segment.period() != period {
                return Err(TableError::SegmentPeriodMismatch {
                    segment: index,
                    expected: period,
                    found: segment.period().to_string(),
                });
            }
            let columns = segment.column_keys_without_level(METHOD_LEVEL);
            if columns != header {
                return Err(TableError::SegmentColumnMismatch {
                    segment: index,
                    expected: key_strings(&header),
                    found: key_strings(&columns),
                });
            }
        }

        debug!("Power report: {} segments sharing {} columns", segments.len(), header.len());
        Ok(PowerReport { period, header, segments })
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    /// Shared (outcome, scenario) column header
    pub fn header(&self) -> &[Key] {
        &self.header
    }

    pub fn segments(&self) -> &[PowerTable] {
        &self.segments
    }
}

fn key_strings(keys: &[Key]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}
