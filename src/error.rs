//! Error taxonomy for table builds.
//!
//! Every variant is fatal: a build that hits one of these produces no table.
//! Variants carry the group/row position and the disagreeing values so a
//! failure can be diagnosed without re-running the simulation.

use thiserror::Error;

/// Which axis of a table an index error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Rows => "row",
            Axis::Columns => "column",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while reading records or assembling tables.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("malformed record '{source_id}': {reason}")]
    MalformedRecord { source_id: String, reason: String },

    #[error(
        "column group {group}: '{other_source}' reports {field} '{other}' but '{first_source}' reports '{first}'"
    )]
    InconsistentColumnMetadata {
        group: usize,
        field: &'static str,
        first_source: String,
        first: String,
        other_source: String,
        other: String,
    },

    #[error(
        "row {row} ('{label}'): '{other_source}' reports {field} '{other}' but '{first_source}' reports '{first}'"
    )]
    InconsistentRowMetadata {
        row: usize,
        label: String,
        field: &'static str,
        first_source: String,
        first: String,
        other_source: String,
        other: String,
    },

    #[error("column group {group}: effect labels [{}] differ from previous group [{}]", .found.join("; "), .expected.join("; "))]
    RowLabelMismatch { group: usize, expected: Vec<String>, found: Vec<String> },

    #[error("row {row} ('{label}'): outcomes [{}] differ from previous row [{}]", .found.join(", "), .expected.join(", "))]
    ColumnLabelMismatch { row: usize, label: String, expected: Vec<String>, found: Vec<String> },

    #[error("unknown effect label '{label}' in '{source_id}'")]
    UnknownEffectLabel { source_id: String, label: String },

    #[error("column group {group}: effect label '{label}' reported more than once")]
    DuplicateEffectLabel { group: usize, label: String },

    #[error("nothing to build: {what} is empty")]
    EmptyLayout { what: String },

    #[error("layout sequences differ in length: {groups} row groups, {periods} periods, {labels} labels")]
    LayoutLengthMismatch { groups: usize, periods: usize, labels: usize },

    #[error("power segment {segment}: period '{found}' differs from '{expected}'")]
    SegmentPeriodMismatch { segment: usize, expected: String, found: String },

    #[error("power segment {segment}: column header [{}] differs from [{}]", .found.join("; "), .expected.join("; "))]
    SegmentColumnMismatch { segment: usize, expected: Vec<String>, found: Vec<String> },

    #[error("table shape: {reason}")]
    TableShape { reason: String },

    #[error("duplicate {axis} key '{key}'")]
    DuplicateKey { axis: Axis, key: String },

    #[error("{axis} key '{key}' has {found} levels, expected {expected}")]
    MixedKeyDepth { axis: Axis, key: String, expected: usize, found: usize },
}

impl TableError {
    /// Shorthand for a `MalformedRecord` error.
    pub fn malformed(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        TableError::MalformedRecord { source_id: source_id.into(), reason: reason.into() }
    }
}
