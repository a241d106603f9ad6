/// Configuration resolution module
///
/// This module handles:
/// - Reading the TOML report layout
/// - Validating table numbers and display overrides
/// - Resolving the input directory against the layout file
/// - Building an immutable ReportPlan from CLI arguments
use crate::assemble::{ColumnGroup, RowGroup};
use crate::cli::CliArgs;
use crate::labels::DisplayLabels;
use crate::types::Method;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Report layout as written in the TOML file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportLayout {
    /// Root of the record files, relative to the layout file
    #[serde(default)]
    pub input_dir: Option<PathBuf>,

    #[serde(default)]
    pub labels: DisplayLabels,

    #[serde(default, rename = "power_table")]
    pub power_tables: Vec<PowerTableLayout>,

    #[serde(default, rename = "alpha_error_table")]
    pub alpha_error_tables: Vec<AlphaErrorTableLayout>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerTableLayout {
    pub number: u32,
    #[serde(default)]
    pub caption: String,
    pub period: String,
    #[serde(default, rename = "segment")]
    pub segments: Vec<SegmentLayout>,
}

/// One method's block of columns
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentLayout {
    /// Sub-directory of the input directory holding this segment's records
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// One list of record paths per column
    pub columns: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlphaErrorTableLayout {
    pub number: u32,
    #[serde(default)]
    pub caption: String,
    #[serde(default, rename = "row")]
    pub rows: Vec<AlphaRowLayout>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlphaRowLayout {
    pub label: String,
    pub period: String,
    pub sources: Vec<String>,
}

/// Fully resolved run: every table to build, in order, with its inputs
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPlan {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub labels: DisplayLabels,
    pub tables: Vec<TableJob>,
    pub preview: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableJob {
    Power { number: u32, caption: String, period: String, segments: Vec<PowerSegment> },
    AlphaError { number: u32, caption: String, rows: Vec<RowGroup> },
}

impl TableJob {
    pub fn number(&self) -> u32 {
        match self {
            TableJob::Power { number, .. } | TableJob::AlphaError { number, .. } => *number,
        }
    }

    pub fn caption(&self) -> &str {
        match self {
            TableJob::Power { caption, .. } | TableJob::AlphaError { caption, .. } => caption,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TableJob::Power { .. } => "power",
            TableJob::AlphaError { .. } => "alpha_error",
        }
    }
}

/// Column groups of one power segment, read from `dir` below the input directory
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSegment {
    pub dir: Option<PathBuf>,
    pub groups: Vec<ColumnGroup>,
}

/// Build a complete ReportPlan from CLI arguments
///
/// This resolves all configuration upfront, so the runner receives a fully
/// validated, immutable list of tables.
pub fn build_report_plan(args: &CliArgs) -> Result<ReportPlan, String> {
    debug!("Building report plan from {:?}", args.layout);

    let layout = load_layout(&args.layout)?;
    validate_layout(&layout)?;

    let input_dir = resolve_input_dir(args, &layout);
    debug!("Record input directory: {:?}", input_dir);

    let mut tables = plan_tables(layout.power_tables, layout.alpha_error_tables);
    if !args.tables.is_empty() {
        for wanted in &args.tables {
            if !tables.iter().any(|t| t.number() == *wanted) {
                return Err(format!("Table {} is not defined in {}", wanted, args.layout.display()));
            }
        }
        tables.retain(|t| args.tables.contains(&t.number()));
    }

    debug!("Planned {} tables", tables.len());

    Ok(ReportPlan {
        input_dir,
        output_dir: args.output_dir.clone(),
        labels: layout.labels,
        tables,
        preview: !args.no_preview,
    })
}

/// Read and parse a layout file
pub fn load_layout(path: &Path) -> Result<ReportLayout, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    parse_layout(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

pub fn parse_layout(content: &str) -> Result<ReportLayout, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

/// Check the layout for problems that do not need any record to detect
pub fn validate_layout(layout: &ReportLayout) -> Result<(), String> {
    if layout.power_tables.is_empty() && layout.alpha_error_tables.is_empty() {
        return Err("Layout defines no tables".to_string());
    }

    let mut numbers = HashSet::new();
    let all_numbers =
        layout.power_tables.iter().map(|t| t.number).chain(layout.alpha_error_tables.iter().map(|t| t.number));
    for number in all_numbers {
        if !numbers.insert(number) {
            return Err(format!("Table number {} is used more than once", number));
        }
    }

    for table in &layout.power_tables {
        if table.segments.is_empty() {
            return Err(format!("Power table {} has no segments", table.number));
        }
        if let Some(index) = table.segments.iter().position(|s| s.columns.is_empty()) {
            return Err(format!("Power table {} segment {} has no columns", table.number, index));
        }
    }

    for table in &layout.alpha_error_tables {
        if table.rows.is_empty() {
            return Err(format!("Alpha error table {} has no rows", table.number));
        }
    }

    for id in layout.labels.methods.keys() {
        if Method::from_id(id).is_none() {
            let known: Vec<&str> = Method::ALL.iter().map(|m| m.as_str()).collect();
            return Err(format!("Unknown method '{}' in [labels.methods] (known: {})", id, known.join(", ")));
        }
    }

    Ok(())
}

/// `--input-dir` wins; otherwise the layout's `input_dir`, relative to the
/// layout file; otherwise the layout file's directory.
fn resolve_input_dir(args: &CliArgs, layout: &ReportLayout) -> PathBuf {
    if let Some(dir) = &args.input_dir {
        if let Some(ignored) = &layout.input_dir {
            warn!("--input-dir {:?} overrides input_dir {:?} from the layout", dir, ignored);
        }
        return dir.clone();
    }
    let base = args.layout.parent().map(Path::to_path_buf).unwrap_or_default();
    match &layout.input_dir {
        Some(dir) => base.join(dir),
        None => base,
    }
}

/// Turn layout tables into jobs ordered by table number
fn plan_tables(power: Vec<PowerTableLayout>, alpha: Vec<AlphaErrorTableLayout>) -> Vec<TableJob> {
    let mut tables: Vec<TableJob> = power
        .into_iter()
        .map(|t| TableJob::Power {
            number: t.number,
            caption: t.caption,
            period: t.period,
            segments: t
                .segments
                .into_iter()
                .map(|s| PowerSegment { dir: s.dir, groups: s.columns.into_iter().map(ColumnGroup::new).collect() })
                .collect(),
        })
        .chain(alpha.into_iter().map(|t| TableJob::AlphaError {
            number: t.number,
            caption: t.caption,
            rows: t.rows.into_iter().map(|r| RowGroup::new(r.label, r.period, r.sources)).collect(),
        }))
        .collect();

    tables.sort_by_key(|t| t.number());
    tables
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
