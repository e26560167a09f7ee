//! Extraction outcome types

use crate::error::ExtractorError;
use custref_domain::{CustomerCriteria, LogicalField};

/// A categorical value replaced by its vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Field that was corrected
    pub field: LogicalField,
    /// Value as the model returned it
    pub original: String,
    /// Vocabulary entry it was mapped to
    pub canonical: String,
}

/// A categorical value with no vocabulary entry close enough
///
/// The value is kept as free text and still filters the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unmatched {
    /// Field holding the value
    pub field: LogicalField,
    /// Value as the model returned it
    pub value: String,
}

/// Whether the criteria came from the model or from the fallback
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionStatus {
    /// Model output was parsed and validated
    Extracted,
    /// Something failed; the criteria are the all-absent default
    Fallback(ExtractorError),
}

/// Everything one extraction produced
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Criteria to compile (default on fallback)
    pub criteria: CustomerCriteria,

    /// How the criteria were obtained
    pub status: ExtractionStatus,

    /// Vocabulary corrections applied
    pub corrections: Vec<Correction>,

    /// Categorical values kept as free text
    pub unmatched: Vec<Unmatched>,

    /// Keys in the model output that name no criteria field
    pub ignored_keys: Vec<String>,
}

impl Extraction {
    /// Fallback outcome for a failed extraction
    pub fn fallback(error: ExtractorError) -> Self {
        Self {
            criteria: CustomerCriteria::default(),
            status: ExtractionStatus::Fallback(error),
            corrections: Vec::new(),
            unmatched: Vec::new(),
            ignored_keys: Vec::new(),
        }
    }

    /// Whether the default criteria were substituted
    pub fn is_fallback(&self) -> bool {
        matches!(self.status, ExtractionStatus::Fallback(_))
    }

    /// The failure behind a fallback
    pub fn failure(&self) -> Option<&ExtractorError> {
        match &self.status {
            ExtractionStatus::Extracted => None,
            ExtractionStatus::Fallback(error) => Some(error),
        }
    }
}
