//! Assembles the agent from configuration.

use crate::config::{Config, LlmSettings, ProviderKind};
use crate::error::{CliError, Result};
use custref_agent::CustomerReferenceAgent;
use custref_extractor::CriteriaExtractor;
use custref_llm::{AzureOpenAiProvider, OllamaProvider, Provider};
use custref_query::QueryCompiler;
use custref_store::{QueryExecutor, SalesforceStore};
use tracing::debug;

/// The agent the binary runs.
pub type Agent = CustomerReferenceAgent<Provider, SalesforceStore>;

/// Build the configured language model provider.
pub fn build_provider(settings: &LlmSettings) -> Result<Provider> {
    let provider = match settings.provider {
        ProviderKind::Ollama => {
            let provider = match &settings.endpoint {
                Some(endpoint) => OllamaProvider::new(endpoint, &settings.model),
                None => OllamaProvider::default_endpoint(&settings.model),
            };
            Provider::Ollama(provider.with_max_retries(settings.max_retries))
        }
        ProviderKind::Azure => {
            let endpoint = required(settings.endpoint.as_deref(), "llm.endpoint")?;
            let deployment = required(settings.deployment.as_deref(), "llm.deployment")?;
            let api_key = required(settings.api_key.as_deref(), "CUSTREF_AZURE_API_KEY")?;
            Provider::Azure(
                AzureOpenAiProvider::new(endpoint, deployment, api_key)
                    .with_api_version(&settings.api_version)
                    .with_max_retries(settings.max_retries),
            )
        }
    };
    debug!("Using {} language model provider", provider.name());
    Ok(provider)
}

/// Build the full pipeline.
///
/// The field mapping is validated here so a broken deployment fails before
/// the first prompt is read.
pub fn build_agent(config: &Config) -> Result<Agent> {
    config.extractor.validate().map_err(CliError::Config)?;
    let mapping = config.field_mapping()?;

    let extractor = CriteriaExtractor::new(
        build_provider(&config.llm)?,
        config.vocabularies.clone(),
        config.extractor.clone(),
    );
    let executor = QueryExecutor::new(SalesforceStore::new(config.salesforce.clone()));

    Ok(CustomerReferenceAgent::new(extractor, QueryCompiler::new(mapping), executor)
        .with_config(config.agent.clone()))
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CliError::Config(format!("'{}' is required for this provider", key))),
    }
}
