//! @ai:module:intent Provider client abstraction and per-run client set
//! @ai:module:layer infrastructure
//! @ai:module:public_api ProviderClient, Provider, ProviderSet, MockProviderClient
//! @ai:module:stateless false

use crate::config::{ApiConfig, ModelSpec, ProviderKind};
use crate::error::ProviderError;
use crate::runner::providers::{AnthropicClient, GeminiClient, OpenAiClient};
use anyhow::Result;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

/// @ai:intent Trait for a model provider that answers a prompt with raw text
pub trait ProviderClient: Send + Sync {
    /// @ai:intent Send one prompt to model_id and return the response text
    /// @ai:effects network
    fn complete(
        &self,
        model_id: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

/// @ai:intent Any of the supported provider adapters
pub enum Provider {
    Anthropic(AnthropicClient),
    OpenAi(OpenAiClient),
    Gemini(GeminiClient),
}

impl Provider {
    /// @ai:intent Build the adapter for a provider, reading its API key
    /// @ai:pre the provider's API key variable is set
    /// @ai:effects env
    pub fn from_env(kind: ProviderKind, api: &ApiConfig) -> Result<Self> {
        let provider = match kind {
            ProviderKind::Anthropic => Provider::Anthropic(AnthropicClient::from_env(api)?),
            ProviderKind::OpenAi => Provider::OpenAi(OpenAiClient::from_env(api)?),
            ProviderKind::Gemini => Provider::Gemini(GeminiClient::from_env(api)?),
        };
        Ok(provider)
    }
}

impl ProviderClient for Provider {
    async fn complete(&self, model_id: &str, prompt: &str) -> Result<String, ProviderError> {
        match self {
            Provider::Anthropic(client) => client.complete(model_id, prompt).await,
            Provider::OpenAi(client) => client.complete(model_id, prompt).await,
            Provider::Gemini(client) => client.complete(model_id, prompt).await,
        }
    }
}

/// @ai:intent Clients constructed once at startup, one per provider in use
pub struct ProviderSet<C> {
    clients: BTreeMap<ProviderKind, Arc<C>>,
}

impl<C> ProviderSet<C> {
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            clients: BTreeMap::new(),
        }
    }

    /// @ai:effects pure
    pub fn insert(&mut self, kind: ProviderKind, client: C) {
        self.clients.insert(kind, Arc::new(client));
    }

    /// @ai:effects pure
    pub fn get(&self, kind: ProviderKind) -> Option<Arc<C>> {
        self.clients.get(&kind).cloned()
    }
}

impl<C> Default for ProviderSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderSet<Provider> {
    /// @ai:intent Build exactly the adapters the selected models need
    /// @ai:post fails before any network call if an API key is missing
    /// @ai:effects env
    pub fn for_models(models: &[ModelSpec], api: &ApiConfig) -> Result<Self> {
        let mut set = Self::new();

        for model in models {
            if set.get(model.provider).is_none() {
                set.insert(model.provider, Provider::from_env(model.provider, api)?);
                tracing::debug!("Initialized {} client", model.provider);
            }
        }

        Ok(set)
    }
}

/// @ai:intent Mock client for testing
pub struct MockProviderClient {
    response: String,
}

impl MockProviderClient {
    /// @ai:intent Create a mock client that returns a fixed response
    /// @ai:effects pure
    pub fn new(response: String) -> Self {
        Self { response }
    }
}

impl ProviderClient for MockProviderClient {
    /// @ai:intent Return mock response
    /// @ai:effects pure
    async fn complete(&self, _model_id: &str, _prompt: &str) -> Result<String, ProviderError> {
        Ok(self.response.clone())
    }
}
