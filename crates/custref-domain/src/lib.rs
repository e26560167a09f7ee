//! custref Domain Layer
//!
//! Core types shared by every stage of the customer reference pipeline.
//! Nothing in this crate performs I/O: it holds the typed criteria model,
//! the static reference data (controlled vocabularies and the field mapping)
//! and the trait seams behind which the external services live.
//!
//! ## Key Concepts
//!
//! - **Criteria**: the structured filter request derived from one prompt
//! - **NumericCriterion**: a value/operator pair, the only numeric shape
//!   that survives construction
//! - **Field mapping**: logical filter name to physical record-store path
//! - **Controlled vocabulary**: canonical category names for fuzzy correction
//! - **Record**: a nested mapping returned by the record store
//!
//! ## Architecture
//!
//! ```text
//! prompt -> Extractor -> CustomerCriteria -> Compiler -> query -> RecordStore -> Record*
//! ```
//!
//! The language model and the record store are reached only through the
//! traits in [`traits`]; infrastructure implementations live in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod criteria;
pub mod field;
pub mod numeric;
pub mod operator;
pub mod record;
pub mod traits;
pub mod vocabulary;

// Re-exports for convenience
pub use criteria::{
    CustomerCriteria, FieldViolation, ValidationError, ViolationKind, DEFAULT_LIMIT, MAX_LIMIT,
    MIN_LIMIT,
};
pub use field::{FieldMapping, FilterKind, LogicalField, MappingError};
pub use numeric::NumericCriterion;
pub use operator::CompareOp;
pub use record::{Record, NOT_AVAILABLE};
pub use traits::{LlmProvider, RecordStore};
pub use vocabulary::{Vocabularies, VocabularyKind};
