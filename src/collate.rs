//! Collation of paginated API responses into one logical record sequence.
//!
//! Each backup resource configures a [`FieldPath`] pointing at the array
//! nested inside every page payload (e.g. `artists.items` for followed
//! artists, plain `items` for most endpoints). [`collate`] resolves that
//! path against every page and concatenates the arrays in page order, so
//! the output preserves upstream pagination order.

use std::fmt;

use serde_json::Value;

use crate::error::BackupError;

/// A dot-separated field path, validated at configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a path like `"artists.items"`. Empty paths and empty segments
    /// are rejected here so resolution never has to deal with them.
    pub fn new(path: &str) -> Result<Self, BackupError> {
        if path.trim().is_empty() {
            return Err(BackupError::Malformed(
                "field path cannot be empty".to_string(),
            ));
        }

        let segments: Vec<String> = path.split('.').map(|s| s.to_string()).collect();
        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(BackupError::Malformed(format!(
                "field path '{}' contains an empty segment",
                path
            )));
        }

        Ok(FieldPath { segments })
    }

    fn resolve<'a>(&self, page: &'a Value) -> Result<&'a Value, BackupError> {
        let mut value = page;
        for segment in &self.segments {
            value = value.get(segment).ok_or_else(|| {
                BackupError::Malformed(format!(
                    "missing field '{}' while resolving '{}'",
                    segment, self
                ))
            })?;
        }
        Ok(value)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Flattens `pages` into one ordered record sequence.
///
/// The value at `path` must be an array on every page; arrays are
/// concatenated in page order. With `ignore_nulls` set, null entries are
/// dropped (playlist track collections null out tracks deleted upstream).
///
/// A page where the path does not resolve yields a
/// [`BackupError::Malformed`], which aborts the current resource's export
/// but not the whole run.
pub fn collate(
    path: &FieldPath,
    pages: &[Value],
    ignore_nulls: bool,
) -> Result<Vec<Value>, BackupError> {
    let mut records = Vec::new();

    for page in pages {
        let value = path.resolve(page)?;
        let items = value.as_array().ok_or_else(|| {
            BackupError::Malformed(format!("field '{}' is not an array", path))
        })?;

        for item in items {
            if ignore_nulls && item.is_null() {
                continue;
            }
            records.push(item.clone());
        }
    }

    Ok(records)
}
