use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::ReplacementSpec;
use crate::{Result, json};

/// On-disk shape: `{"_replaces": {raw: corrected, ...}}`.
#[derive(Serialize)]
struct TableFileRef<'a> {
    #[serde(rename = "_replaces")]
    replaces: &'a BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TableFile {
    #[serde(rename = "_replaces")]
    replaces: BTreeMap<String, String>,
}

/// How a table read from disk is combined with the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// File entries are inserted over existing ones.
    #[default]
    Merge,
    /// The current table is discarded.
    Replace,
}

/// Flat `raw -> corrected` lookup, kept key-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: BTreeMap<String, String>,
}

impl ReplacementTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from specs; later specs win on shared keys.
    #[must_use]
    pub fn build<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = ReplacementSpec>,
    {
        let mut table = Self::new();
        table.extend(specs);
        table
    }

    /// Merge specs into this table in place.
    pub fn extend<I>(&mut self, specs: I)
    where
        I: IntoIterator<Item = ReplacementSpec>,
    {
        for spec in specs {
            for (source, target) in spec.resolved() {
                self.entries.insert(source, target);
            }
        }
    }

    /// Build from a JSON array of `[sources, target]` specs.
    pub fn build_from_value(value: Value) -> Result<Self> {
        let mut table = Self::new();
        table.extend_from_value(value)?;
        Ok(table)
    }

    /// Extend from a JSON spec list. Nothing is inserted unless every
    /// spec is valid.
    pub fn extend_from_value(&mut self, value: Value) -> Result<()> {
        let specs = ReplacementSpec::from_values(value)?;
        debug!("Extending replacement table with {} specs", specs.len());
        self.extend(specs);
        Ok(())
    }

    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) -> Option<String> {
        self.entries.insert(source.into(), target.into())
    }

    #[must_use]
    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    /// Exact-key lookup: the corrected value, or `raw` itself.
    #[must_use]
    pub fn apply<'a>(&'a self, raw: &'a str) -> &'a str {
        self.get(raw).unwrap_or(raw)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Insert every entry of `other`, overwriting shared keys.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Keys that are also the corrected value of some entry, sorted.
    ///
    /// Lookup is single-step, so such a key is never reached through
    /// another correction.
    #[must_use]
    pub fn inconsistencies(&self) -> Vec<&str> {
        let values: BTreeSet<&str> = self.entries.values().map(String::as_str).collect();
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|key| values.contains(key))
            .collect()
    }

    /// Serialize with sorted keys, 4-space indentation and literal
    /// non-ASCII characters.
    pub fn to_json_string(&self) -> Result<String> {
        json::to_pretty_string(&TableFileRef {
            replaces: &self.entries,
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: TableFile = serde_json::from_str(content)?;
        Ok(Self {
            entries: file.replaces,
        })
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        json::write_file(path, &self.to_json_string()?)?;
        info!(
            "Wrote {} replacements to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let table = Self::from_json_str(&json::read_file(path)?)?;
        info!(
            "Read {} replacements from {}",
            table.entries.len(),
            path.display()
        );
        Ok(table)
    }

    /// Read a table file and combine it with this one according to `mode`.
    pub fn load(&mut self, path: &Path, mode: ReadMode) -> Result<()> {
        let loaded = Self::read_from(path)?;
        match mode {
            ReadMode::Merge => self.merge(loaded),
            ReadMode::Replace => *self = loaded,
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for ReplacementTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
