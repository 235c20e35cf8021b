//! Coercion of remote payloads into records
//!
//! Payloads reach the exporter in several shapes: plain objects, `null` for
//! absent bodies, objects that were serialized into a string field, and bare
//! scalars or arrays. [`normalize`] turns each into a [`Record`] by trying
//! [`STRATEGIES`] in order. The first strategy that accepts the value wins:
//!
//! 1. [`Strategy::Mapping`] - already an object, used as-is
//! 2. [`Strategy::Absent`] - `null`, becomes an empty record
//! 3. [`Strategy::Encoded`] - a string holding a JSON object, parsed
//! 4. [`Strategy::Wrapped`] - anything else, stored under [`WRAPPED_KEY`]

use crate::error::Result;
use crate::types::Record;
use serde::Serialize;
use serde_json::Value;

/// Key used by [`Strategy::Wrapped`]
pub const WRAPPED_KEY: &str = "value";

/// One way of turning a JSON value into a record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// The value is already an object
    Mapping,
    /// The value is null
    Absent,
    /// The value is a string containing a serialized object
    Encoded,
    /// Fallback for every other value
    Wrapped,
}

/// Strategies in the order they are tried
pub const STRATEGIES: [Strategy; 4] = [
    Strategy::Mapping,
    Strategy::Absent,
    Strategy::Encoded,
    Strategy::Wrapped,
];

impl Strategy {
    /// Apply this strategy, handing the value back if it does not apply
    fn apply(self, value: Value) -> std::result::Result<Record, Value> {
        match (self, value) {
            (Strategy::Mapping, Value::Object(map)) => Ok(map),
            (Strategy::Absent, Value::Null) => Ok(Record::new()),
            (Strategy::Encoded, Value::String(s)) => match serde_json::from_str::<Value>(&s) {
                Ok(Value::Object(map)) => Ok(map),
                _ => Err(Value::String(s)),
            },
            (Strategy::Wrapped, other) => {
                let mut record = Record::new();
                record.insert(WRAPPED_KEY.to_string(), other);
                Ok(record)
            }
            (_, other) => Err(other),
        }
    }
}

/// Normalize a JSON value into a record
pub fn normalize(value: Value) -> Record {
    let mut pending = value;
    for strategy in STRATEGIES {
        match strategy.apply(pending) {
            Ok(record) => return record,
            Err(value) => pending = value,
        }
    }
    // Wrapped accepts everything, so this is only reached if STRATEGIES changes.
    let mut record = Record::new();
    record.insert(WRAPPED_KEY.to_string(), pending);
    record
}

/// Serialize any value and normalize the result
pub fn normalize_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Record> {
    Ok(normalize(serde_json::to_value(value)?))
}
