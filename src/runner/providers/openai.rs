//! @ai:module:intent OpenAI Chat Completions adapter
//! @ai:module:layer infrastructure
//! @ai:module:public_api OpenAiClient
//! @ai:module:stateless true

use crate::config::ApiConfig;
use crate::error::ProviderError;
use crate::runner::client::ProviderClient;
use crate::runner::providers::{api_key, check_status, http_client, non_empty_text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// @ai:intent OpenAI API client
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
    api_key: String,
}

impl OpenAiClient {
    /// @ai:effects pure
    pub fn new(api: &ApiConfig, api_key: String) -> Self {
        Self {
            client: http_client(api),
            base_url: api.endpoints.openai.trim_end_matches('/').to_string(),
            max_tokens: api.max_tokens,
            temperature: api.temperature,
            api_key,
        }
    }

    /// @ai:intent Create a client keyed from OPENAI_API_KEY
    /// @ai:effects env
    pub fn from_env(api: &ApiConfig) -> Result<Self, ProviderError> {
        Ok(Self::new(api, api_key(&["OPENAI_API_KEY"])?))
    }
}

/// @ai:intent Text of the first choice
/// @ai:effects pure
fn first_choice_text(response: ChatResponse) -> Result<String, ProviderError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse("no choices".to_string()))?;

    non_empty_text(choice.message.content)
}

impl ProviderClient for OpenAiClient {
    /// @ai:effects network
    async fn complete(&self, model_id: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let chat: ChatResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        first_choice_text(chat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_choice_text() {
        let body = r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "D"}}]}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(first_choice_text(response).unwrap(), "D");
    }

    #[test]
    fn test_null_content_is_empty_response() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            first_choice_text(response),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn test_no_choices_is_malformed() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            first_choice_text(response),
            Err(ProviderError::MalformedResponse(_))
        ));
    }
}
