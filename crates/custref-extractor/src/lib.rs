//! custref Extractor
//!
//! Turns a free-text request into validated [`CustomerCriteria`] using a
//! language model.
//!
//! # Overview
//!
//! The extractor is the trust boundary of the pipeline. Model output is
//! treated as untrusted: it may be wrapped in code fences, name fields that
//! do not exist, misspell categories or break numeric bounds. Everything
//! that leaves this crate is either a fully validated criteria object or
//! the all-absent default.
//!
//! # Architecture
//!
//! ```text
//! prompt → PromptBuilder → LLM → fence strip → JSON object
//!        → VocabularyMatcher (erp_system, industry, product_activations)
//!        → CustomerCriteria::from_map
//! ```
//!
//! # Example Usage
//!
//! ```
//! use custref_domain::Vocabularies;
//! use custref_extractor::{CriteriaExtractor, ExtractorConfig};
//! use custref_llm::MockProvider;
//!
//! let llm = MockProvider::new(r#"{"industry": "Retails", "limit": 3}"#);
//! let extractor = CriteriaExtractor::new(llm, Vocabularies::default(), ExtractorConfig::default());
//!
//! let criteria = extractor.extract("three retail customers");
//! assert_eq!(criteria.industry(), Some("retail"));
//! assert_eq!(criteria.limit(), 3);
//! ```
//!
//! [`CustomerCriteria`]: custref_domain::CustomerCriteria

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
pub mod matcher;
pub mod parser;
mod prompt;
mod types;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::CriteriaExtractor;
pub use matcher::{VocabularyMatcher, SIMILARITY_THRESHOLD};
pub use prompt::{PromptBuilder, CRITERIA_SCHEMA};
pub use types::{Correction, Extraction, ExtractionStatus, Unmatched};
