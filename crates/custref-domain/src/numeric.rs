//! Numeric criterion module

use crate::operator::CompareOp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single bounded or exact numeric filter
///
/// Bare numbers coming out of the language model are normalized into this
/// shape (with [`CompareOp::Ge`]) before any other validation runs, so code
/// downstream of the criteria model only ever sees value/operator pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericCriterion {
    /// Threshold value
    pub value: f64,
    /// Comparison to apply against the stored field
    #[serde(default)]
    pub operator: CompareOp,
}

impl NumericCriterion {
    /// Create a criterion with an explicit operator
    pub fn new(value: f64, operator: CompareOp) -> Self {
        Self { value, operator }
    }

    /// Create a criterion from a bare number (`>=` semantics)
    pub fn at_least(value: f64) -> Self {
        Self::new(value, CompareOp::default())
    }

    /// The value rendered the way it appears in queries and logs
    pub fn value_text(&self) -> String {
        format_number(self.value)
    }
}

impl fmt::Display for NumericCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.value_text())
    }
}

/// Render a number without a trailing `.0` when it is integral
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
