//! Text-generation provider.
//!
//! The message composer talks to this through the [`GenerationClient`] trait
//! so the HTTP client can be swapped for a mock in tests. When no API key is
//! configured the service simply holds no client and the composer takes its
//! fallback path without ever attempting a call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const GEMINI_MODEL: &str = "gemini-1.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Http(String),
    #[error("generation provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("generation response contained no text")]
    EmptyResponse,
}

#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Produce a free-text completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini REST client.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(GEMINI_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("reqwest client construction cannot fail with static config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, GEMINI_MODEL, self.api_key
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        parsed
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| p.drain(..).next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

/// Mock client for tests: returns a fixed response or a fixed failure.
pub struct MockGenerationClient {
    response: Option<String>,
}

impl MockGenerationClient {
    pub fn replying(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(GenerationError::Http("mock failure".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_client_replies_with_configured_text() {
        let client = MockGenerationClient::replying("a message");
        assert_eq!(client.generate("prompt").await.unwrap(), "a message");
    }

    #[tokio::test]
    async fn mock_client_can_simulate_failure() {
        let client = MockGenerationClient::failing();
        assert!(client.generate("prompt").await.is_err());
    }
}
