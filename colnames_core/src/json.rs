//! File helpers shared by the JSON-backed maps.

use std::path::Path;

use serde::Serialize;

use crate::{Error, Result};

/// Pretty JSON with 4-space indentation. Non-ASCII characters are
/// written as-is.
pub(crate) fn to_pretty_string<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf)
        .map_err(|e| Error::Json(<serde_json::Error as serde::ser::Error>::custom(e)))
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
