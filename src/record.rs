/// Result record reader
///
/// This module handles:
/// - Resolving a source identifier to a document
/// - Parsing the document into a `ResultRecord`
/// - Mapping every read/parse failure to `MalformedRecord`
///
/// There is no retry and no partial mode: one bad source fails the build.
use crate::error::TableError;
use crate::types::ResultRecord;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Anything that can produce result records by identifier
pub trait RecordSource {
    fn load(&self, id: &str) -> Result<ResultRecord, TableError>;
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
    fn load(&self, id: &str) -> Result<ResultRecord, TableError> {
        (**self).load(id)
    }
}

/// Parse one JSON document into a record
pub fn parse_record(id: &str, json: &str) -> Result<ResultRecord, TableError> {
    serde_json::from_str(json).map_err(|e| TableError::malformed(id, e.to_string()))
}

/// JSON files below a root directory.
///
/// Identifiers are paths relative to the root; absolute identifiers are used
/// as they are.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirSource { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source rooted at a sub-directory of this one
    pub fn subdir(&self, dir: impl AsRef<Path>) -> DirSource {
        DirSource { root: self.root.join(dir) }
    }

    fn resolve(&self, id: &str) -> PathBuf {
        let path = Path::new(id);
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }
}

impl RecordSource for DirSource {
    fn load(&self, id: &str) -> Result<ResultRecord, TableError> {
        let path = self.resolve(id);
        debug!("Reading result record {:?}", path);
        let json = fs::read_to_string(&path)
            .map_err(|e| TableError::malformed(path.display().to_string(), format!("cannot read file: {}", e)))?;
        parse_record(&path.display().to_string(), &json)
    }
}

/// Documents held in memory, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, json: impl Into<String>) {
        self.documents.insert(id.into(), json.into());
    }

    pub fn with(mut self, id: impl Into<String>, json: impl Into<String>) -> Self {
        self.insert(id, json);
        self
    }
}

impl RecordSource for MemorySource {
    fn load(&self, id: &str) -> Result<ResultRecord, TableError> {
        debug!("Reading in-memory result record {}", id);
        let json = self.documents.get(id).ok_or_else(|| TableError::malformed(id, "no such source"))?;
        parse_record(id, json)
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;
