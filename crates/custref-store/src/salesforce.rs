//! Salesforce REST client
//!
//! Each query logs in with the OAuth 2.0 username-password flow and then
//! calls the REST `query` resource:
//!
//! ```text
//! POST https://{domain}.salesforce.com/services/oauth2/token
//! GET  {instance_url}/services/data/v{version}/query?q={soql}
//! ```
//!
//! Sessions are not cached; the store holds no state between calls.

use crate::error::StoreError;
use custref_domain::traits::RecordStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Login domain for production orgs (`test` for sandboxes)
pub const DEFAULT_DOMAIN: &str = "login";

/// REST API version
pub const DEFAULT_API_VERSION: &str = "59.0";

/// Request timeout for login and query calls
const TIMEOUT_SECS: u64 = 30;

/// Salesforce connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesforceConfig {
    /// `login`, `test`, or a full My Domain host
    pub domain: String,
    /// API user name
    pub username: String,
    /// API user password
    pub password: String,
    /// Security token appended to the password
    pub security_token: String,
    /// Connected app consumer key
    pub client_id: String,
    /// Connected app consumer secret
    pub client_secret: String,
    /// REST API version
    pub api_version: String,
}

impl Default for SalesforceConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            username: String::new(),
            password: String::new(),
            security_token: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl SalesforceConfig {
    /// OAuth token endpoint for the configured domain
    pub fn token_url(&self) -> String {
        let domain = self.domain.trim().trim_end_matches('/');
        let host = if domain.contains('.') {
            domain.trim_start_matches("https://").to_string()
        } else {
            format!("{}.salesforce.com", domain)
        };
        format!("https://{}/services/oauth2/token", host)
    }

    /// Check that every credential is present
    pub fn validate(&self) -> Result<(), StoreError> {
        let missing: Vec<&str> = [
            ("username", &self.username),
            ("password", &self.password),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::NotConfigured(format!(
                "missing Salesforce {}",
                missing.join(", ")
            )))
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    instance_url: String,
}

/// Record store backed by the Salesforce REST API
pub struct SalesforceStore {
    config: SalesforceConfig,
    client: reqwest::blocking::Client,
}

impl SalesforceStore {
    /// Create a store from connection settings
    pub fn new(config: SalesforceConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Connection settings
    pub fn config(&self) -> &SalesforceConfig {
        &self.config
    }

    fn login(&self) -> Result<TokenResponse, StoreError> {
        self.config.validate()?;

        let password = format!("{}{}", self.config.password, self.config.security_token);
        let form = [
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("username", self.config.username.as_str()),
            ("password", password.as_str()),
        ];

        let url = self.config.token_url();
        debug!(%url, "Logging in to Salesforce");
        let response = self.client.post(&url).form(&form).send()?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StoreError::Authentication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        Ok(response.json()?)
    }

    fn query_url(&self, instance_url: &str) -> String {
        format!(
            "{}/services/data/v{}/query",
            instance_url.trim_end_matches('/'),
            self.config.api_version
        )
    }
}

impl RecordStore for SalesforceStore {
    type Error = StoreError;

    fn query(&self, soql: &str) -> Result<Value, Self::Error> {
        let session = self.login()?;

        info!("Executing Salesforce query: {}", soql);
        let response = self
            .client
            .get(self.query_url(&session.instance_url))
            .bearer_auth(&session.access_token)
            .query(&[("q", soql)])
            .send()?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(StoreError::Authentication("Session rejected".to_string()));
        }
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StoreError::Query {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json()?;
        debug!("Raw Salesforce response received");
        Ok(body)
    }
}
