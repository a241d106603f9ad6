//! Hierarchical index keys.

use serde::Serialize;
use std::fmt;

/// A row or column key made of one or more labels, outermost level first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Key(Vec<String>);

impl Key {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Key(parts.into_iter().map(Into::into).collect())
    }

    /// Single-level key
    pub fn single(label: impl Into<String>) -> Self {
        Key(vec![label.into()])
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Number of levels
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn level(&self, level: usize) -> Option<&str> {
        self.0.get(level).map(|s| s.as_str())
    }

    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.0.len() && self.0.iter().zip(prefix).all(|(a, b)| a == b)
    }

    /// Key with the first `n` levels removed
    pub fn strip_levels(&self, n: usize) -> Key {
        Key(self.0.iter().skip(n).cloned().collect())
    }

    /// Key with one level removed
    pub fn without_level(&self, level: usize) -> Key {
        Key(self.0.iter().enumerate().filter(|(i, _)| *i != level).map(|(_, s)| s.clone()).collect())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" / "))
    }
}
