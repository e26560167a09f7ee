//! Runtime provider selection

use crate::{AzureOpenAiProvider, LlmError, MockProvider, OllamaProvider};
use custref_domain::traits::LlmProvider as LlmProviderTrait;

/// One of the available providers, picked from configuration at start-up
pub enum Provider {
    /// Azure OpenAI deployment
    Azure(AzureOpenAiProvider),
    /// Local Ollama model
    Ollama(OllamaProvider),
    /// Canned responses
    Mock(MockProvider),
}

impl Provider {
    /// Short backend name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Azure(_) => "azure",
            Provider::Ollama(_) => "ollama",
            Provider::Mock(_) => "mock",
        }
    }
}

impl LlmProviderTrait for Provider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            Provider::Azure(p) => LlmProviderTrait::generate(p, prompt),
            Provider::Ollama(p) => LlmProviderTrait::generate(p, prompt),
            Provider::Mock(p) => p.generate(prompt),
        }
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        match self {
            Provider::Azure(p) => p.generate_structured(prompt, schema),
            Provider::Ollama(p) => LlmProviderTrait::generate_structured(p, prompt, schema),
            Provider::Mock(p) => p.generate_structured(prompt, schema),
        }
    }
}

impl From<MockProvider> for Provider {
    fn from(provider: MockProvider) -> Self {
        Provider::Mock(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_to_mock() {
        let provider = Provider::from(MockProvider::new("{\"limit\": 2}"));
        assert_eq!(provider.name(), "mock");
        assert_eq!(provider.generate_structured("p", "{}").unwrap(), "{\"limit\": 2}");
    }
}
