//! @ai:module:intent Gemini generateContent adapter
//! @ai:module:layer infrastructure
//! @ai:module:public_api GeminiClient
//! @ai:module:stateless true

use crate::config::ApiConfig;
use crate::error::ProviderError;
use crate::runner::client::ProviderClient;
use crate::runner::providers::{api_key, check_status, http_client, non_empty_text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// @ai:intent Gemini API client
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
    api_key: String,
}

impl GeminiClient {
    /// @ai:effects pure
    pub fn new(api: &ApiConfig, api_key: String) -> Self {
        Self {
            client: http_client(api),
            base_url: api.endpoints.gemini.trim_end_matches('/').to_string(),
            max_tokens: api.max_tokens,
            temperature: api.temperature,
            api_key,
        }
    }

    /// @ai:intent Create a client keyed from GEMINI_API_KEY, falling back to GOOGLE_API_KEY
    /// @ai:effects env
    pub fn from_env(api: &ApiConfig) -> Result<Self, ProviderError> {
        Ok(Self::new(api, api_key(&["GEMINI_API_KEY", "GOOGLE_API_KEY"])?))
    }
}

/// @ai:intent Text parts of the first candidate
/// @ai:effects pure
fn candidate_text(response: GenerateResponse) -> Result<String, ProviderError> {
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default();

    non_empty_text(parts.into_iter().filter_map(|p| p.text))
}

impl ProviderClient for GeminiClient {
    /// @ai:effects network
    async fn complete(&self, model_id: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, model_id
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let generated: GenerateResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        candidate_text(generated)
    }
}
