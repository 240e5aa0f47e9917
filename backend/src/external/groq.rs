//! Groq completion API client
//!
//! Chat-completions client used for AI-generated farming recommendations.
//! The API is OpenAI-compatible: one POST per completion, Bearer auth, the
//! completion text in the first choice of the response.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GroqConfig;
use crate::error::{AppError, AppResult};

/// Groq chat-completions client
#[derive(Clone)]
pub struct GroqClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

/// Chat completion request payload
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// One chat message
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat completion response payload
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: String,
}

impl GroqClient {
    /// Create a new Groq client
    pub fn new(api_key: String, config: &GroqConfig) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        }
    }

    /// Create a client from the GROQ_API_KEY environment variable
    ///
    /// Returns None when the credential is absent or empty, which disables
    /// the AI recommendation strategy for the process lifetime.
    pub fn from_env(config: &GroqConfig) -> Option<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())?;

        Some(Self::new(api_key, config))
    }

    /// The model identifier sent with each request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request one completion for a single user prompt
    pub async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::AiService(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::AiService(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::AiService(format!("Failed to parse response: {}", e)))?;

        first_content(&completion)
            .ok_or_else(|| AppError::AiService("Response contained no completion text".to_string()))
    }
}

/// Extract the trimmed text of the first choice, if any
fn first_content(completion: &ChatCompletionResponse) -> Option<String> {
    completion
        .choices
        .first()
        .map(|choice| choice.message.content.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payload_shape() {
        let request = ChatCompletionRequest {
            model: "llama-3.3-70b-versatile".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "advise me".to_string(),
            }],
        };

        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(payload["model"], "llama-3.3-70b-versatile");
        assert_eq!(payload["messages"][0]["role"], "user");
        assert_eq!(payload["messages"][0]["content"], "advise me");
    }

    #[test]
    fn test_response_first_choice_extracted_and_trimmed() {
        let raw = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "  1. Apply compost.\n2. Mulch.  " } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }"#;
        let completion: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            first_content(&completion).unwrap(),
            "1. Apply compost.\n2. Mulch."
        );
    }

    #[test]
    fn test_empty_choices_yield_no_content() {
        let completion: ChatCompletionResponse =
            serde_json::from_str(r#"{ "choices": [] }"#).unwrap();
        assert_eq!(first_content(&completion), None);

        let blank: ChatCompletionResponse = serde_json::from_str(
            r#"{ "choices": [ { "message": { "content": "   " } } ] }"#,
        )
        .unwrap();
        assert_eq!(first_content(&blank), None);
    }
}
