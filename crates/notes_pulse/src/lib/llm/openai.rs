use reqwest::Client;
use serde::Deserialize;

use crate::llm::summarizer::{looks_rate_limited, CompletionError, Summarizer};

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
///
/// Defaults to Google's OpenAI-compatible Gemini endpoint.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("No content in completion response")]
    EmptyResponse,
}

impl CompletionError for OpenAIError {
    fn is_rate_limited(&self) -> bool {
        match self {
            OpenAIError::Api { status, message } => *status == 429 || looks_rate_limited(message),
            OpenAIError::Request(e) => e.status().is_some_and(|s| s.as_u16() == 429),
            OpenAIError::EmptyResponse => false,
        }
    }
}

impl OpenAIClient {
    pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.into(),
            model: Self::DEFAULT_MODEL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub async fn send_completion_request(
        &self,
        system_content: &str,
        user_content: &str,
    ) -> Result<CompletionResponse, OpenAIError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": system_content
                },
                {
                    "role": "user",
                    "content": user_content
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: Option<String>,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl CompletionResponse {
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
    }
}

impl Summarizer for OpenAIClient {
    type Error = OpenAIError;

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, instructions: &str, content: &str) -> Result<String, Self::Error> {
        let response = self
            .send_completion_request(instructions, content)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

        response.into_content().ok_or(OpenAIError::EmptyResponse)
    }
}
