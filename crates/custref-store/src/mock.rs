//! In-memory record store for tests

use crate::error::StoreError;
use custref_domain::traits::RecordStore;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, MutexGuard};

/// Record store returning a canned response
///
/// Clones share the query log, so a test can hand one clone to the
/// pipeline and inspect the other afterwards.
#[derive(Debug, Clone)]
pub struct MockStore {
    response: Result<Value, StoreError>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockStore {
    /// Respond with a raw body
    pub fn with_response(response: Value) -> Self {
        Self {
            response: Ok(response),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Respond like the REST API: `{"totalSize": n, "done": true, "records": [...]}`
    pub fn with_records(records: Vec<Value>) -> Self {
        Self::with_response(json!({
            "totalSize": records.len(),
            "done": true,
            "records": records,
        }))
    }

    /// Respond with no records
    pub fn empty() -> Self {
        Self::with_records(Vec::new())
    }

    /// Fail every query
    pub fn failing(error: StoreError) -> Self {
        Self {
            response: Err(error),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<String> {
        self.log().clone()
    }

    /// Most recent query
    pub fn last_query(&self) -> Option<String> {
        self.log().last().cloned()
    }

    fn log(&self) -> MutexGuard<'_, Vec<String>> {
        self.queries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RecordStore for MockStore {
    type Error = StoreError;

    fn query(&self, query: &str) -> Result<Value, Self::Error> {
        self.log().push(query.to_string());
        self.response.clone()
    }
}
