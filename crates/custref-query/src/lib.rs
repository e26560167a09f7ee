//! custref Query Compiler
//!
//! Compiles validated [`CustomerCriteria`] into a SOQL query string.
//!
//! Compilation has two stages. [`QueryCompiler::plan`] maps criteria onto a
//! [`QueryPlan`]: the projection, a list of typed [`FilterClause`]s and the
//! limit. [`soql::render`] then turns the plan into text, and is the only
//! place literal values are escaped. Both stages are pure; equal criteria
//! always yield byte-identical queries.
//!
//! ```
//! use custref_domain::{CustomerCriteria, FieldMapping};
//! use custref_query::QueryCompiler;
//! use serde_json::json;
//!
//! let criteria = CustomerCriteria::from_json(&json!({
//!     "po_percentage": { "value": 40, "operator": "<" }
//! })).unwrap();
//! let query = QueryCompiler::new(FieldMapping::default()).compile(&criteria).unwrap();
//! assert!(query.soql.contains("po_I_E_Percent__c < 40"));
//! ```
//!
//! [`CustomerCriteria`]: custref_domain::CustomerCriteria

#![warn(missing_docs)]

mod clause;
mod compiler;
pub mod soql;

pub use clause::{ClauseOperator, FilterClause, Literal, QueryPlan};
pub use compiler::{CompileError, CompiledQuery, QueryCompiler, ACTIVE_CUSTOMER_TYPE};
