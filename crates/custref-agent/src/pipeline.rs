//! The customer reference pipeline

use crate::conversation::{self, Intent};
use crate::error::AgentError;
use crate::formatter::{CustomerRow, ResultFormatter};
use custref_domain::traits::{LlmProvider, RecordStore};
use custref_domain::{CustomerCriteria, Record};
use custref_extractor::{CriteriaExtractor, Extraction};
use custref_query::{CompiledQuery, QueryCompiler};
use custref_store::{QueryExecutor, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info, info_span};
use uuid::Uuid;

/// Agent behaviour switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Report record-store failures as errors instead of an empty result
    pub surface_store_errors: bool,
}

/// How a reply should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    /// Plain message
    Text,
    /// Message plus a result table
    Table,
}

/// What the user gets back for one prompt
#[derive(Debug, Clone, Serialize)]
pub struct AgentReply {
    /// Display kind
    pub kind: ReplyKind,
    /// Message text
    pub message: String,
    /// Compiled query, when the pipeline ran far enough
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Raw records as returned by the store
    pub records: Vec<Record>,
    /// Formatted rows
    pub rows: Vec<CustomerRow>,
    /// Criteria the query was built from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<CustomerCriteria>,
}

impl AgentReply {
    /// A message with no data attached
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Text,
            message: message.into(),
            query: None,
            records: Vec::new(),
            rows: Vec::new(),
            criteria: None,
        }
    }

    /// Whether a table should be rendered
    pub fn is_table(&self) -> bool {
        self.kind == ReplyKind::Table
    }

    fn from_output(output: PipelineOutput) -> Self {
        let PipelineOutput {
            extraction,
            query,
            records,
            rows,
        } = output;

        let (kind, message) = if records.is_empty() {
            (ReplyKind::Text, conversation::NO_RESULTS_MESSAGE.to_string())
        } else {
            (
                ReplyKind::Table,
                format!("Found {} matching customer(s).", records.len()),
            )
        };

        Self {
            kind,
            message,
            query: Some(query.soql),
            records,
            rows,
            criteria: Some(extraction.criteria),
        }
    }
}

impl fmt::Display for AgentReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything one pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Extraction outcome (criteria plus corrections)
    pub extraction: Extraction,
    /// Compiled query
    pub query: CompiledQuery,
    /// Raw records
    pub records: Vec<Record>,
    /// Formatted rows, one per record
    pub rows: Vec<CustomerRow>,
}

/// Runs prompts through extract → compile → execute → format
///
/// Holds only immutable configuration and the two service handles, so runs
/// are independent of each other.
pub struct CustomerReferenceAgent<L, S>
where
    L: LlmProvider,
    S: RecordStore,
{
    extractor: CriteriaExtractor<L>,
    compiler: QueryCompiler,
    executor: QueryExecutor<S>,
    formatter: ResultFormatter,
    config: AgentConfig,
}

impl<L, S> CustomerReferenceAgent<L, S>
where
    L: LlmProvider,
    L::Error: fmt::Display,
    S: RecordStore,
    S::Error: Into<StoreError>,
{
    /// Assemble an agent; the formatter reads through the compiler's mapping
    pub fn new(
        extractor: CriteriaExtractor<L>,
        compiler: QueryCompiler,
        executor: QueryExecutor<S>,
    ) -> Self {
        let formatter = ResultFormatter::new(compiler.mapping().clone());
        Self {
            extractor,
            compiler,
            executor,
            formatter,
            config: AgentConfig::default(),
        }
    }

    /// Replace the behaviour switches
    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// The extractor
    pub fn extractor(&self) -> &CriteriaExtractor<L> {
        &self.extractor
    }

    /// The executor
    pub fn executor(&self) -> &QueryExecutor<S> {
        &self.executor
    }

    /// Route a prompt and produce the user-facing reply
    ///
    /// Never fails: errors are logged and become the generic apology.
    pub fn respond(&self, prompt: &str) -> AgentReply {
        let span = info_span!("request", id = %Uuid::now_v7());
        let _guard = span.enter();

        match conversation::classify(prompt) {
            Intent::Greeting => AgentReply::text(conversation::greeting_message()),
            Intent::Help => AgentReply::text(conversation::CAPABILITIES_MESSAGE),
            Intent::About => AgentReply::text(conversation::ABOUT_MESSAGE),
            Intent::Unrecognized => AgentReply::text(conversation::UNRECOGNIZED_MESSAGE),
            Intent::DataQuery => match self.pipeline(prompt) {
                Ok(output) => AgentReply::from_output(output),
                Err(e) => {
                    error!("Error processing query: {}", e);
                    AgentReply::text(conversation::APOLOGY_MESSAGE)
                }
            },
        }
    }

    /// Run the full pipeline on a prompt, skipping routing
    pub fn run(&self, prompt: &str) -> Result<PipelineOutput, AgentError> {
        let span = info_span!("request", id = %Uuid::now_v7());
        let _guard = span.enter();
        self.pipeline(prompt)
    }

    /// Extract and compile without touching the record store
    pub fn compile_only(&self, prompt: &str) -> Result<(Extraction, CompiledQuery), AgentError> {
        let span = info_span!("request", id = %Uuid::now_v7());
        let _guard = span.enter();

        info!("Compiling prompt: '{}'", prompt);
        let extraction = self.extractor.extract_outcome(prompt);
        let query = self.compiler.compile(&extraction.criteria)?;
        Ok((extraction, query))
    }

    fn pipeline(&self, prompt: &str) -> Result<PipelineOutput, AgentError> {
        info!("Processing prompt: '{}'", prompt);

        let extraction = self.extractor.extract_outcome(prompt);
        info!("Criteria: {}", extraction.criteria);

        let query = self.compiler.compile(&extraction.criteria)?;

        let records = if self.config.surface_store_errors {
            self.executor.try_execute(&query.soql)?
        } else {
            self.executor.execute(&query.soql)
        };

        let rows = self.formatter.format(&records)?;

        Ok(PipelineOutput {
            extraction,
            query,
            records,
            rows,
        })
    }
}
