//! Numeric comparison operators

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator carried by a numeric criterion
///
/// The operator is rendered verbatim into the compiled query, so the textual
/// form of each variant is exactly the symbol the record store understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompareOp {
    /// `=`
    #[serde(rename = "=")]
    Eq,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `>=` (the default when the prompt gives a bare number)
    #[serde(rename = ">=")]
    #[default]
    Ge,
}

impl CompareOp {
    /// Every accepted operator, in the order the extraction prompt lists them
    pub const ALL: [CompareOp; 5] = [
        CompareOp::Eq,
        CompareOp::Lt,
        CompareOp::Le,
        CompareOp::Gt,
        CompareOp::Ge,
    ];

    /// The operator symbol
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    /// Parse an operator symbol, ignoring surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "=" => Some(CompareOp::Eq),
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Le),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Ge),
            _ => None,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompareOp::parse(s).ok_or_else(|| format!("unknown comparison operator '{}'", s))
    }
}
