//! Table export to JSON.
//!
//! One file per table, `table_<number>.json`, holding the table value object
//! plus a little metadata. This is a serialization of the validated table,
//! not a typeset rendering.

use crate::runner::BuiltTable;
use log::debug;
use serde_json::json;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// File name a table is exported under
pub fn table_file_name(number: u32) -> String {
    format!("table_{}.json", number)
}

/// Write one built table as pretty-printed JSON into `output_dir`.
///
/// The directory is created when missing. Returns the written path.
pub fn export_table_json(
    output_dir: &Path,
    number: u32,
    caption: &str,
    table: &BuiltTable,
) -> std::io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(table_file_name(number));

    let document = json!({
        "kind": table.kind(),
        "number": number,
        "caption": caption,
        "generated": chrono::Local::now().to_rfc3339(),
        "table": table,
    });

    let file = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(file, &document)?;

    debug!("Exported table {} to {:?}", number, path);
    Ok(path)
}
