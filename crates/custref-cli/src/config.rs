//! Configuration management for the CLI.
//!
//! One TOML file (default `~/.custref/config.toml`) holds every setting.
//! Secrets can stay out of the file: the `CUSTREF_*` environment variables
//! listed in [`ENV_OVERRIDES`] win over whatever the file says.

use crate::error::{CliError, Result};
use custref_agent::AgentConfig;
use custref_domain::{FieldMapping, LogicalField, Vocabularies};
use custref_extractor::ExtractorConfig;
use custref_store::SalesforceConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variables read on top of the file
pub const ENV_OVERRIDES: [&str; 7] = [
    "CUSTREF_SALESFORCE_USERNAME",
    "CUSTREF_SALESFORCE_PASSWORD",
    "CUSTREF_SALESFORCE_SECURITY_TOKEN",
    "CUSTREF_SALESFORCE_CLIENT_ID",
    "CUSTREF_SALESFORCE_CLIENT_SECRET",
    "CUSTREF_AZURE_ENDPOINT",
    "CUSTREF_AZURE_API_KEY",
];

const MASK: &str = "********";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Language model backend
    #[serde(default)]
    pub llm: LlmSettings,

    /// Record store connection
    #[serde(default)]
    pub salesforce: SalesforceConfig,

    /// Criteria extraction
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Pipeline behaviour
    #[serde(default)]
    pub agent: AgentConfig,

    /// Controlled vocabularies
    #[serde(default)]
    pub vocabularies: Vocabularies,

    /// Physical path overrides, keyed by logical field name
    #[serde(default)]
    pub field_mapping: BTreeMap<String, String>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Which language model backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local Ollama server
    Ollama,
    /// Azure OpenAI deployment
    Azure,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Ollama => f.write_str("ollama"),
            ProviderKind::Azure => f.write_str("azure"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "azure" => Ok(ProviderKind::Azure),
            other => Err(CliError::InvalidInput(format!(
                "Unknown provider '{}' (expected ollama or azure)",
                other
            ))),
        }
    }
}

/// Language model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Backend
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,

    /// API endpoint (Ollama default: http://localhost:11434)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Ollama model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Azure deployment name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<String>,

    /// Azure REST API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Azure resource key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Attempts per model request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Chat history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "quiet" => Ok(OutputFormat::Quiet),
            other => Err(CliError::InvalidInput(format!(
                "Unknown format '{}' (expected table, json or quiet)",
                other
            ))),
        }
    }
}

impl Config {
    /// Directory holding the config file and chat history.
    pub fn home_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".custref"))
    }

    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    /// The explicit path if given, otherwise the default one.
    pub fn resolve_path(explicit: Option<&str>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration, writing a default file on first run.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Apply the `CUSTREF_*` environment variables.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any name lookup; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for name in ENV_OVERRIDES {
            let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            match name {
                "CUSTREF_SALESFORCE_USERNAME" => self.salesforce.username = value,
                "CUSTREF_SALESFORCE_PASSWORD" => self.salesforce.password = value,
                "CUSTREF_SALESFORCE_SECURITY_TOKEN" => self.salesforce.security_token = value,
                "CUSTREF_SALESFORCE_CLIENT_ID" => self.salesforce.client_id = value,
                "CUSTREF_SALESFORCE_CLIENT_SECRET" => self.salesforce.client_secret = value,
                "CUSTREF_AZURE_ENDPOINT" => self.llm.endpoint = Some(value),
                "CUSTREF_AZURE_API_KEY" => self.llm.api_key = Some(value),
                _ => {}
            }
        }
    }

    /// A copy with every secret masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        for secret in [
            &mut config.salesforce.password,
            &mut config.salesforce.security_token,
            &mut config.salesforce.client_secret,
        ] {
            if !secret.is_empty() {
                *secret = MASK.to_string();
            }
        }
        if config.llm.api_key.is_some() {
            config.llm.api_key = Some(MASK.to_string());
        }
        config
    }

    /// The field mapping: defaults plus overrides, checked for completeness.
    pub fn field_mapping(&self) -> Result<FieldMapping> {
        let mapping = FieldMapping::default().with_overrides(&self.field_mapping)?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// Set one value by dotted key.
    ///
    /// Secrets are rejected here; they belong in the environment.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "llm.provider" => self.llm.provider = value.parse()?,
            "llm.endpoint" => self.llm.endpoint = non_empty(value),
            "llm.model" => self.llm.model = value.to_string(),
            "llm.deployment" => self.llm.deployment = non_empty(value),
            "llm.api_version" => self.llm.api_version = value.to_string(),
            "llm.max_retries" => self.llm.max_retries = parse_value(key, value)?,
            "salesforce.domain" => self.salesforce.domain = value.to_string(),
            "salesforce.username" => self.salesforce.username = value.to_string(),
            "salesforce.client_id" => self.salesforce.client_id = value.to_string(),
            "salesforce.api_version" => self.salesforce.api_version = value.to_string(),
            "extractor.max_prompt_length" => {
                self.extractor.max_prompt_length = parse_value(key, value)?
            }
            "extractor.vocabulary_correction" => {
                self.extractor.vocabulary_correction = parse_value(key, value)?
            }
            "extractor.structured_output" => {
                self.extractor.structured_output = parse_value(key, value)?
            }
            "agent.surface_store_errors" => {
                self.agent.surface_store_errors = parse_value(key, value)?
            }
            "settings.color" => self.settings.color = parse_value(key, value)?,
            "settings.format" => self.settings.format = value.parse()?,
            "settings.history_size" => self.settings.history_size = parse_value(key, value)?,
            "llm.api_key"
            | "salesforce.password"
            | "salesforce.security_token"
            | "salesforce.client_secret" => {
                return Err(CliError::InvalidInput(format!(
                    "'{}' is a secret; set it through the environment ({})",
                    key,
                    ENV_OVERRIDES.join(", ")
                )))
            }
            _ => match key.strip_prefix("field_mapping.") {
                Some(name) if LogicalField::from_name(name).is_some() => {
                    self.field_mapping.insert(name.to_string(), value.to_string());
                }
                _ => return Err(CliError::InvalidInput(format!("Unknown key '{}'", key))),
            },
        }

        self.extractor.validate().map_err(CliError::Config)
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: None,
            model: default_model(),
            deployment: None,
            api_version: default_api_version(),
            api_key: None,
            max_retries: default_max_retries(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidInput(format!("Invalid value '{}' for '{}'", value, key)))
}

fn default_provider() -> ProviderKind {
    ProviderKind::Ollama
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_api_version() -> String {
    custref_llm::azure::DEFAULT_API_VERSION.to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}
