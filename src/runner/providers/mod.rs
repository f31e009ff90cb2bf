//! @ai:module:intent HTTP adapters for the supported model providers
//! @ai:module:layer infrastructure
//! @ai:module:public_api AnthropicClient, OpenAiClient, GeminiClient

pub mod anthropic;
pub mod gemini;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

use crate::config::ApiConfig;
use crate::error::ProviderError;

/// @ai:intent Shared HTTP client with the configured request timeout
/// @ai:effects pure
fn http_client(api: &ApiConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(api.request_timeout_secs))
        .build()
        .expect("Failed to create HTTP client")
}

/// @ai:intent Read an API key from the first set variable
/// @ai:effects env
fn api_key(vars: &[&'static str]) -> Result<String, ProviderError> {
    vars.iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .ok_or(ProviderError::MissingApiKey(vars[0]))
}

/// @ai:intent Turn a non-success HTTP status into a classified error
/// @ai:effects network
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        status: status.as_u16(),
        body,
    })
}

/// @ai:intent Join text parts, treating all-empty output as no answer
/// @ai:effects pure
fn non_empty_text<I>(parts: I) -> Result<String, ProviderError>
where
    I: IntoIterator<Item = String>,
{
    let text = parts.into_iter().collect::<Vec<_>>().join("\n");

    if text.trim().is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(text)
    }
}
