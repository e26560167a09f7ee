//! Structured query representation

use custref_domain::CompareOp;
use serde::Serialize;

/// A literal value on the right-hand side of a clause
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    /// `true` / `false`
    Bool(bool),
    /// Quoted string
    Text(String),
    /// Unquoted number
    Number(f64),
}

/// How a clause compares its field against the literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseOperator {
    /// `field = value`
    Equals,
    /// `field LIKE '%value%'`
    Contains,
    /// `field INCLUDES ('value')` on a multi-select field
    Includes,
    /// `field <op> value`, operator passed through verbatim
    Compare(CompareOp),
}

/// One `AND`-ed condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterClause {
    /// Physical field path
    pub field: String,
    /// Comparison
    pub operator: ClauseOperator,
    /// Right-hand side
    pub value: Literal,
}

impl FilterClause {
    /// Build a clause
    pub fn new(field: impl Into<String>, operator: ClauseOperator, value: Literal) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }
}

/// Everything needed to render one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPlan {
    /// Object selected from
    pub object: String,
    /// Selected field paths, in mapping order
    pub projection: Vec<String>,
    /// Base filters first, then one clause per present criteria field
    pub clauses: Vec<FilterClause>,
    /// Row limit
    pub limit: u32,
}
