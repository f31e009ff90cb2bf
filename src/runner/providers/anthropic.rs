//! @ai:module:intent Anthropic Messages API adapter
//! @ai:module:layer infrastructure
//! @ai:module:public_api AnthropicClient
//! @ai:module:stateless true

use crate::config::ApiConfig;
use crate::error::ProviderError;
use crate::runner::client::ProviderClient;
use crate::runner::providers::{api_key, check_status, http_client, non_empty_text};
use serde::{Deserialize, Serialize};

/// @ai:intent Claude API request body
#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// @ai:intent Claude API response body
#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// @ai:intent Claude API client
pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
    api_key: String,
}

impl AnthropicClient {
    /// @ai:intent Create a client with an explicit key
    /// @ai:effects pure
    pub fn new(api: &ApiConfig, api_key: String) -> Self {
        Self {
            client: http_client(api),
            base_url: api.endpoints.anthropic.trim_end_matches('/').to_string(),
            max_tokens: api.max_tokens,
            temperature: api.temperature,
            api_key,
        }
    }

    /// @ai:intent Create a client keyed from ANTHROPIC_API_KEY
    /// @ai:effects env
    pub fn from_env(api: &ApiConfig) -> Result<Self, ProviderError> {
        Ok(Self::new(api, api_key(&["ANTHROPIC_API_KEY"])?))
    }
}

impl ProviderClient for AnthropicClient {
    /// @ai:effects network
    async fn complete(&self, model_id: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = ApiRequest {
            model: model_id,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await?;

        let api_response: ApiResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        non_empty_text(api_response.content.into_iter().filter_map(|c| c.text))
    }
}
