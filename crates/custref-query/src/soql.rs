//! SOQL rendering
//!
//! Turns a [`QueryPlan`] into a single-line query:
//!
//! ```text
//! SELECT f1, f2 FROM Object WHERE c1 AND c2 LIMIT n
//! ```
//!
//! String literals are quoted and escaped here and nowhere else.

use crate::clause::{ClauseOperator, FilterClause, Literal, QueryPlan};
use custref_domain::numeric::format_number;

/// Render a plan as SOQL
pub fn render(plan: &QueryPlan) -> String {
    let mut query = format!(
        "SELECT {} FROM {}",
        plan.projection.join(", "),
        plan.object
    );

    if !plan.clauses.is_empty() {
        let conditions: Vec<String> = plan.clauses.iter().map(render_clause).collect();
        query.push_str(" WHERE ");
        query.push_str(&conditions.join(" AND "));
    }

    query.push_str(&format!(" LIMIT {}", plan.limit));
    query
}

/// Render a single condition
pub fn render_clause(clause: &FilterClause) -> String {
    match clause.operator {
        ClauseOperator::Equals => format!("{} = {}", clause.field, render_literal(&clause.value)),
        ClauseOperator::Contains => match &clause.value {
            Literal::Text(text) => format!("{} LIKE '%{}%'", clause.field, escape_like(text)),
            other => format!("{} LIKE '%{}%'", clause.field, escape_like(&literal_text(other))),
        },
        ClauseOperator::Includes => format!(
            "{} INCLUDES ({})",
            clause.field,
            quote(&literal_text(&clause.value))
        ),
        ClauseOperator::Compare(op) => format!(
            "{} {} {}",
            clause.field,
            op.as_str(),
            render_literal(&clause.value)
        ),
    }
}

fn render_literal(value: &Literal) -> String {
    match value {
        Literal::Bool(b) => b.to_string(),
        Literal::Text(text) => quote(text),
        Literal::Number(n) => format_number(*n),
    }
}

fn literal_text(value: &Literal) -> String {
    match value {
        Literal::Bool(b) => b.to_string(),
        Literal::Text(text) => text.clone(),
        Literal::Number(n) => format_number(*n),
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", escape_literal(text))
}

/// Escape a value for use inside a quoted SOQL string
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escape a value for use inside a quoted `LIKE` pattern
///
/// Wildcards in the value match literally.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in escape_literal(text).chars() {
        match c {
            '%' => escaped.push_str("\\%"),
            '_' => escaped.push_str("\\_"),
            other => escaped.push(other),
        }
    }
    escaped
}
