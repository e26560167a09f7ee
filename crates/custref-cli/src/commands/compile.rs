//! Compile command implementation.

use crate::cli::CompileArgs;
use crate::error::Result;
use crate::output::Formatter;
use custref_agent::CustomerReferenceAgent;
use custref_domain::traits::{LlmProvider, RecordStore};
use custref_store::StoreError;
use std::fmt::Display;

/// Execute the compile command: show criteria and query, never run it.
pub fn execute_compile<L, S>(
    args: CompileArgs,
    agent: &CustomerReferenceAgent<L, S>,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Display,
    S: RecordStore,
    S::Error: Into<StoreError>,
{
    let (extraction, query) = agent.compile_only(&args.prompt_text())?;
    println!("{}", formatter.format_compiled(&extraction, &query)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use custref_domain::{FieldMapping, Vocabularies};
    use custref_extractor::{CriteriaExtractor, ExtractorConfig};
    use custref_llm::MockProvider;
    use custref_query::QueryCompiler;
    use custref_store::{MockStore, QueryExecutor};

    #[test]
    fn test_compile_reports_corrections() {
        let llm = MockProvider::new(r#"{"erp_system": "MS Dynamic", "po_percentage": 40}"#);
        let store = MockStore::empty();
        let agent = CustomerReferenceAgent::new(
            CriteriaExtractor::new(llm, Vocabularies::default(), ExtractorConfig::default()),
            QueryCompiler::new(FieldMapping::default()),
            QueryExecutor::new(store.clone()),
        );

        let (extraction, query) = agent.compile_only("customers on MS Dynamic").unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let text = formatter.format_compiled(&extraction, &query).unwrap();

        assert!(text.contains("Corrected erp_system 'MS Dynamic' to 'MS Dynamics'"));
        assert!(text.contains("po_I_E_Percent__c >= 40"));
        assert!(store.queries().is_empty());

        let json = Formatter::new(OutputFormat::Json, false)
            .format_compiled(&extraction, &query)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "extracted");
        assert_eq!(value["criteria"]["erp_system"], "ms dynamics");
        assert_eq!(value["corrections"][0]["canonical"], "MS Dynamics");
    }

    #[test]
    fn test_compile_fallback_is_reported() {
        let agent = CustomerReferenceAgent::new(
            CriteriaExtractor::new(
                MockProvider::new("not json"),
                Vocabularies::default(),
                ExtractorConfig::default(),
            ),
            QueryCompiler::new(FieldMapping::default()),
            QueryExecutor::new(MockStore::empty()),
        );

        let (extraction, query) = agent.compile_only("show me customers").unwrap();
        let text = Formatter::new(OutputFormat::Table, false)
            .format_compiled(&extraction, &query)
            .unwrap();

        assert!(text.starts_with("⚠ Could not extract criteria"));
        assert!(text.ends_with("LIMIT 5"));
        assert_eq!(
            Formatter::new(OutputFormat::Quiet, false)
                .format_compiled(&extraction, &query)
                .unwrap(),
            query.soql
        );
    }
}
