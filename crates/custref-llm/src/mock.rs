//! Mock LLM provider for deterministic testing

use crate::LlmError;
use custref_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Error(String),
}

#[derive(Debug, Default)]
struct MockState {
    rules: Vec<(String, Reply)>,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Rules match on a fragment of the prompt, so tests can key a response on
/// the user's request even though the provider receives the full rendered
/// instruction template. Rules are checked in the order they were added.
///
/// # Examples
///
/// ```
/// use custref_llm::MockProvider;
/// use custref_domain::traits::LlmProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt").unwrap(), "Fixed response");
///
/// // Responses keyed on prompt content
/// let mut provider = MockProvider::default();
/// provider.add_response("retail", r#"{"industry": "retail"}"#);
/// assert_eq!(
///     provider.generate("User request: retail customers").unwrap(),
///     r#"{"industry": "retail"}"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Respond with `response` to any prompt containing `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        self.state()
            .rules
            .push((fragment.into(), Reply::Text(response.into())));
    }

    /// Fail any prompt containing `fragment`
    pub fn add_error(&mut self, fragment: impl Into<String>) {
        self.state()
            .rules
            .push((fragment.into(), Reply::Error("Mock error".to_string())));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.state().prompts.len()
    }

    /// The most recent prompt received
    pub fn last_prompt(&self) -> Option<String> {
        self.state().prompts.last().cloned()
    }

    /// Reset the call history
    pub fn reset_call_count(&self) {
        self.state().prompts.clear();
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked mid-call
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.prompts.push(prompt.to_string());

        let reply = state
            .rules
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Error(message)) => Err(LlmError::Other(message)),
            None => Ok(self.default_response.clone()),
        }
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.generate(prompt)
    }
}
