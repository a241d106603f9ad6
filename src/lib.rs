//! Aggregation of simulation result records into report tables.
//!
//! Records from many independent simulation runs are read, checked for
//! consistent identifying metadata and reshaped into two kinds of table:
//! power tables (effect setting × method/outcome/scenario) and Type I error
//! tables (method/side/period × outcome). Any disagreement aborts the build
//! with a [`TableError`].
//!
//! ```no_run
//! use power_tables::{ColumnGroup, DirSource, DisplayLabels, assemble_power_table};
//!
//! let source = DirSource::new("raw-output/nparld");
//! let groups = vec![ColumnGroup::pair("pruritus/scenario_1/lnorm.json", "pruritus/scenario_1/norm.json")];
//! let table = assemble_power_table(&source, &groups, "period_1", &DisplayLabels::default())?;
//! println!("{} rows", table.n_rows());
//! # Ok::<(), power_tables::TableError>(())
//! ```

pub mod assemble;
pub mod cli;
pub mod config;
pub mod console_format;
pub mod error;
pub mod export;
pub mod labels;
pub mod normalize;
pub mod record;
pub mod runner;
pub mod table;
pub mod types;
pub mod ui;

pub use assemble::{
    ColumnGroup, PowerReport, RowGroup, assemble_alpha_error_table, assemble_power_table,
};
pub use error::{Axis, TableError};
pub use labels::{DisplayLabels, EffectFamily, EffectLabel};
pub use normalize::normalize;
pub use record::{DirSource, MemorySource, RecordSource};
pub use table::{AlphaErrorTable, Key, PowerTable, Table};
pub use types::{Method, RateValue, ResultRecord, Side, Target};
