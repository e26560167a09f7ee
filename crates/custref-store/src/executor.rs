//! Query execution and response normalization

use crate::error::StoreError;
use custref_domain::traits::RecordStore;
use custref_domain::Record;
use serde_json::Value;
use tracing::{error, info, warn};

/// Runs queries through a [`RecordStore`] and normalizes the response
pub struct QueryExecutor<S>
where
    S: RecordStore,
{
    store: S,
}

impl<S> QueryExecutor<S>
where
    S: RecordStore,
    S::Error: Into<StoreError>,
{
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run a query; any failure is logged and yields no records
    pub fn execute(&self, query: &str) -> Vec<Record> {
        match self.try_execute(query) {
            Ok(records) => records,
            Err(e) => {
                error!("Error querying record store: {}", e);
                Vec::new()
            }
        }
    }

    /// Run a query and surface store failures
    pub fn try_execute(&self, query: &str) -> Result<Vec<Record>, StoreError> {
        info!("Executing query: {}", query);
        let body = self.store.query(query).map_err(Into::into)?;
        let records = normalize_response(body);
        info!("Found {} records", records.len());
        Ok(records)
    }
}

/// Extract records from a raw response body
///
/// Accepts a bare array of records or an object with a `records` array.
/// Any other shape yields no records. Array entries that are not objects
/// are skipped.
pub fn normalize_response(body: Value) -> Vec<Record> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("records") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("Unexpected record store response: object without a records array");
                return Vec::new();
            }
        },
        other => {
            warn!("Unexpected record store response format: {}", type_name(&other));
            return Vec::new();
        }
    };

    let total = items.len();
    let records: Vec<Record> = items.into_iter().filter_map(Record::from_value).collect();
    if records.len() < total {
        warn!("Skipped {} non-object entries", total - records.len());
    }
    records
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
