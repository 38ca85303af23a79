//! HTTP client for the model endpoint.

use std::future::Future;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AnalyzeError, failure_message};
use crate::prompt::{PromptLanguage, build_prompt};
use crate::wire::{ChatRequest, ChatResponse};

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://zheng.2020classes4.dpdns.org";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "qwen/qwen3-235b-a22b:free";

/// Configuration for analysis requests.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct AnalyzeConfig {
    /// URL the request is POSTed to.
    #[builder(default = "DEFAULT_ENDPOINT.to_string()")]
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Language of the prompt template.
    #[builder(default)]
    #[serde(default)]
    pub language: PromptLanguage,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl AnalyzeConfig {
    /// Create a new config builder.
    pub fn builder() -> AnalyzeConfigBuilder {
        AnalyzeConfigBuilder::default()
    }
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            language: PromptLanguage::default(),
        }
    }
}

/// Something that turns a formatted structure into a textual guess.
///
/// Implementations never fail: errors come back as a readable message.
pub trait Analyzer {
    /// Analyze `structure` with the named model.
    fn analyze(&self, structure: &str, model: &str) -> impl Future<Output = String>;
}

/// Sends one unauthenticated chat-completion request per analysis.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    config: AnalyzeConfig,
}

impl AnalysisClient {
    /// Create a client with the given configuration.
    pub fn new(config: AnalyzeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client around an existing HTTP client.
    pub fn with_http_client(config: AnalyzeConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    /// Send one request and return the model's answer.
    pub async fn request(&self, structure: &str, model: &str) -> Result<String, AnalyzeError> {
        let prompt = build_prompt(structure, self.config.language);
        let body = ChatRequest::user_text(model, prompt);

        debug!(endpoint = %self.config.endpoint, model, "requesting analysis");

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(AnalyzeError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        ChatResponse::content_of(&text)
    }
}

impl Analyzer for AnalysisClient {
    async fn analyze(&self, structure: &str, model: &str) -> String {
        match self.request(structure, model).await {
            Ok(content) => content,
            Err(err) => {
                warn!(error = %err, "analysis request failed");
                failure_message(&err)
            }
        }
    }
}

impl Default for AnalysisClient {
    fn default() -> Self {
        Self::new(AnalyzeConfig::default())
    }
}
