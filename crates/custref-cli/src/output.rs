//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use custref_agent::{AgentReply, CustomerRow, ReplyKind, COLUMNS};
use custref_extractor::Extraction;
use custref_query::CompiledQuery;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an agent reply.
    pub fn format_reply(&self, reply: &AgentReply, show_query: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(reply)?),
            OutputFormat::Table => Ok(self.format_reply_table(reply, show_query)),
            OutputFormat::Quiet => Ok(format_reply_quiet(reply)),
        }
    }

    fn format_reply_table(&self, reply: &AgentReply, show_query: bool) -> String {
        let mut out = match reply.kind {
            ReplyKind::Table => format!(
                "{}\n{}",
                self.info(&reply.message),
                format_rows_table(&reply.rows)
            ),
            ReplyKind::Text => reply.message.clone(),
        };

        if show_query {
            if let Some(query) = &reply.query {
                out.push_str("\n\n");
                out.push_str(&self.query_details(query));
            }
        }
        out
    }

    /// Format the result of a dry-run compilation.
    pub fn format_compiled(&self, extraction: &Extraction, query: &CompiledQuery) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_compiled_json(extraction, query),
            OutputFormat::Table => Ok(self.format_compiled_text(extraction, query)),
            OutputFormat::Quiet => Ok(query.soql.clone()),
        }
    }

    fn format_compiled_json(&self, extraction: &Extraction, query: &CompiledQuery) -> Result<String> {
        let corrections: Vec<serde_json::Value> = extraction
            .corrections
            .iter()
            .map(|c| {
                json!({
                    "field": c.field.name(),
                    "original": c.original,
                    "canonical": c.canonical
                })
            })
            .collect();
        let unmatched: Vec<serde_json::Value> = extraction
            .unmatched
            .iter()
            .map(|u| json!({ "field": u.field.name(), "value": u.value }))
            .collect();

        let value = json!({
            "status": if extraction.is_fallback() { "fallback" } else { "extracted" },
            "error": extraction.failure().map(|e| e.to_string()),
            "criteria": extraction.criteria,
            "corrections": corrections,
            "unmatched": unmatched,
            "ignored_keys": extraction.ignored_keys,
            "query": query.soql,
            "plan": query.plan
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_compiled_text(&self, extraction: &Extraction, query: &CompiledQuery) -> String {
        let mut lines = Vec::new();

        if let Some(error) = extraction.failure() {
            lines.push(self.warning(&format!(
                "Could not extract criteria ({}); using defaults",
                error
            )));
        }
        lines.push(format!("Criteria: {}", extraction.criteria));

        for c in &extraction.corrections {
            lines.push(self.info(&format!(
                "Corrected {} '{}' to '{}'",
                c.field, c.original, c.canonical
            )));
        }
        for u in &extraction.unmatched {
            lines.push(self.warning(&format!(
                "No vocabulary match for {} '{}', kept as typed",
                u.field, u.value
            )));
        }
        if !extraction.ignored_keys.is_empty() {
            lines.push(format!("Ignored: {}", extraction.ignored_keys.join(", ")));
        }

        lines.push(String::new());
        lines.push(self.query_details(&query.soql));
        lines.join("\n")
    }

    fn query_details(&self, soql: &str) -> String {
        format!("{}\n{}", self.colorize("Query:", "cyan"), soql)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render rows as a table with the fixed column headers.
pub fn format_rows_table(rows: &[CustomerRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(COLUMNS);
    for row in rows {
        builder.push_record(row.cells());
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

fn format_reply_quiet(reply: &AgentReply) -> String {
    match reply.kind {
        ReplyKind::Table => reply
            .rows
            .iter()
            .map(|r| r.customer_name.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        ReplyKind::Text => reply.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use custref_agent::conversation::NO_RESULTS_MESSAGE;
    use custref_agent::ResultFormatter;
    use custref_domain::{FieldMapping, Record};

    fn table_reply() -> AgentReply {
        let record = Record::from_value(json!({
            "tenant__c": "Acme",
            "po_I_E_Percent__c": 62.5,
            "Account__r": { "Industry": "Retail" }
        }))
        .unwrap();
        let rows = ResultFormatter::new(FieldMapping::default())
            .format(std::slice::from_ref(&record))
            .unwrap();

        AgentReply {
            kind: ReplyKind::Table,
            message: "Found 1 matching customer(s).".to_string(),
            query: Some("SELECT tenant__c FROM Usage_statistic__c LIMIT 5".to_string()),
            records: vec![record],
            rows,
            criteria: None,
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_reply(&table_reply(), false).unwrap();
        assert!(output.starts_with("ℹ Found 1"));
        assert!(output.contains("Customer Name"));
        assert!(output.contains("Account URL"));
        assert!(output.contains("Acme"));
        assert!(output.contains("62.5%"));
        assert!(output.contains("N/A%"));
        assert!(!output.contains("SELECT"));
    }

    #[test]
    fn test_show_query() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_reply(&table_reply(), true).unwrap();
        assert!(output.contains("Query:\nSELECT tenant__c"));
    }

    #[test]
    fn test_text_reply_has_no_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_reply(&AgentReply::text(NO_RESULTS_MESSAGE), false)
            .unwrap();
        assert_eq!(output, NO_RESULTS_MESSAGE);
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_reply(&table_reply(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["kind"], "table");
        assert_eq!(value["rows"][0]["Industry"], "Retail");
        assert_eq!(value["records"][0]["tenant__c"], "Acme");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_reply(&table_reply(), true).unwrap(), "Acme");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}
