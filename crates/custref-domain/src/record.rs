//! Record access
//!
//! A [`Record`] is one row returned by the record store: a nested JSON
//! mapping in which related-object fields sit under their relationship
//! name (`Account__r.Industry` is `{"Account__r": {"Industry": ...}}`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder shown for a missing or null value
pub const NOT_AVAILABLE: &str = "N/A";

/// One record returned by the record store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Wrap a JSON object
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap a JSON value; anything but an object yields `None`
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Resolve a dotted path
    ///
    /// Returns `None` when any segment is missing, when an intermediate
    /// value is not an object, or when the final value is null.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    /// Resolve a dotted path for display, with `N/A` for absent values
    pub fn display_path(&self, path: &str) -> String {
        match self.get_path(path) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
