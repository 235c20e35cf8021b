//! Flattening of nested records into single-level rows
//!
//! Nested object keys are joined with [`SEPARATOR`], so `{"a": {"b": 1}}`
//! becomes `{"a.b": 1}`. Arrays, scalars and empty objects are leaves. Key
//! order follows a depth-first walk of the input.

use crate::types::Record;
use serde_json::Value;

/// Separator placed between nested key segments
pub const SEPARATOR: char = '.';

/// A flattened record: dotted-path keys mapped to leaf values
pub type Row = Record;

/// Flatten a nested record into a row
///
/// Already-flat records come back unchanged, which makes flattening idempotent.
#[must_use]
pub fn flatten(record: &Record) -> Row {
    let mut row = Row::new();
    flatten_into(&mut row, None, record);
    row
}

fn flatten_into(row: &mut Row, prefix: Option<&str>, record: &Record) {
    for (key, value) in record {
        let path = match prefix {
            Some(prefix) => format!("{prefix}{SEPARATOR}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) if !nested.is_empty() => {
                flatten_into(row, Some(&path), nested);
            }
            leaf => {
                row.insert(path, leaf.clone());
            }
        }
    }
}

/// Copy every cell of `other` into `row`
///
/// Keys already present are overwritten in place and keep their column
/// position; new keys are appended.
pub fn merge_into(row: &mut Row, other: Row) {
    for (key, value) in other {
        row.insert(key, value);
    }
}
