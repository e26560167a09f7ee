//! Azure OpenAI Provider Implementation
//!
//! Calls a chat-completions deployment on an Azure OpenAI resource:
//!
//! ```text
//! POST {endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}
//! api-key: {key}
//! ```
//!
//! The prompt is sent as a single user message with temperature 0.
//! Structured generation additionally sets `response_format` to
//! `json_object`.

use crate::http::{self, DEFAULT_MAX_RETRIES};
use crate::LlmError;
use custref_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Default Azure OpenAI REST API version
pub const DEFAULT_API_VERSION: &str = "2024-02-01";

/// Azure OpenAI chat-completions provider
pub struct AzureOpenAiProvider {
    endpoint: String,
    deployment: String,
    api_version: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl AzureOpenAiProvider {
    /// Create a provider for one deployment
    ///
    /// # Parameters
    ///
    /// - `endpoint`: resource endpoint (e.g., "https://my-resource.openai.azure.com")
    /// - `deployment`: deployment name
    /// - `api_key`: resource key
    pub fn new(
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            deployment: deployment.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: api_key.into(),
            client: http::client(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Use a specific REST API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }

    fn request_body<'a>(prompt: &'a str, json_mode: bool) -> ChatRequest<'a> {
        ChatRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
            response_format: json_mode.then(|| json!({ "type": "json_object" })),
        }
    }

    /// Run one chat completion and return the first choice's content
    pub async fn complete(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError> {
        if self.endpoint.is_empty() || self.deployment.is_empty() {
            return Err(LlmError::NotConfigured(
                "Azure OpenAI endpoint and deployment are required".to_string(),
            ));
        }
        if self.api_key.is_empty() {
            return Err(LlmError::NotConfigured("Azure OpenAI API key is missing".to_string()));
        }

        let url = self.url();
        let body = Self::request_body(prompt, json_mode);
        debug!(deployment = %self.deployment, json_mode, "Calling Azure OpenAI");

        let response = http::send_with_retry(self.max_retries, &self.deployment, || {
            self.client
                .post(&url)
                .header("api-key", &self.api_key)
                .json(&body)
        })
        .await?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no message".to_string()))
    }
}

impl LlmProviderTrait for AzureOpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        crate::block_on(self.complete(prompt, false))
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        crate::block_on(self.complete(prompt, true))
    }
}
