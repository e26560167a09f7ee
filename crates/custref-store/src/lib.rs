//! custref Record Store Layer
//!
//! Executes compiled queries against the CRM and normalizes what comes back.
//!
//! # Components
//!
//! - `SalesforceStore`: REST client (OAuth password login, then `query`)
//! - `MockStore`: canned responses for tests
//! - `QueryExecutor`: shape normalization on top of any `RecordStore`
//!
//! The executor offers two entry points. `execute` never fails: transport
//! errors are logged and reported as zero records. `try_execute` returns the
//! error so callers can tell "no matches" from "store unavailable".

#![warn(missing_docs)]

mod error;
mod executor;
mod mock;
mod salesforce;

pub use error::StoreError;
pub use executor::{normalize_response, QueryExecutor};
pub use mock::MockStore;
pub use salesforce::{SalesforceConfig, SalesforceStore, DEFAULT_API_VERSION, DEFAULT_DOMAIN};
