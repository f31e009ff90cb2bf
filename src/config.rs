//! @ai:module:intent Configuration structs and model registry for the benchmark
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkConfig, ApiConfig, RunConfig, PathConfig, ModelSpec, ProviderKind
//! @ai:module:stateless true

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// @ai:intent Main configuration for the benchmark system
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default = "default_models")]
    pub models: Vec<ModelSpec>,
}

/// @ai:intent Request shaping shared by every provider adapter
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

/// @ai:intent Base URLs of the provider APIs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub anthropic: String,
    pub openai: String,
    pub gemini: String,
}

/// @ai:intent Run configuration for benchmark execution
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
    #[serde(default = "default_progress_interval")]
    pub progress_interval_ms: u64,
}

/// @ai:intent Path configuration for datasets and cached results
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    pub data_dir: PathBuf,
    pub results_dir: PathBuf,
}

/// @ai:intent Provider family a model is served by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Anthropic,
        ProviderKind::OpenAi,
        ProviderKind::Gemini,
    ];

    /// @ai:intent Convert provider to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownProvider(s.to_string()))
    }
}

/// @ai:intent One entry of the model registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub provider: ProviderKind,
    /// Short name used on the command line and in cache file names
    pub key: String,
    /// Identifier sent to the provider API
    pub id: String,
}

impl ModelSpec {
    fn new(provider: ProviderKind, key: &str, id: &str) -> Self {
        Self {
            provider,
            key: key.to_string(),
            id: id.to_string(),
        }
    }

    /// @ai:intent Label used in logs and the summary table
    /// @ai:effects pure
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider, self.key)
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            run: RunConfig::default(),
            paths: PathConfig::default(),
            models: default_models(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            request_timeout_secs: default_request_timeout(),
            endpoints: EndpointConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            anthropic: "https://api.anthropic.com".to_string(),
            openai: "https://api.openai.com".to_string(),
            gemini: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
            progress_interval_ms: default_progress_interval(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            results_dir: PathBuf::from("results"),
        }
    }
}

fn default_models() -> Vec<ModelSpec> {
    use ProviderKind::*;

    vec![
        ModelSpec::new(Anthropic, "sonnet", "claude-sonnet-4-5-20250929"),
        ModelSpec::new(Anthropic, "opus", "claude-opus-4-5-20251101"),
        ModelSpec::new(Anthropic, "haiku", "claude-haiku-4-5-20251001"),
        ModelSpec::new(OpenAi, "gpt-5.2-pro", "gpt-5.2-pro"),
        ModelSpec::new(OpenAi, "gpt-5.2", "gpt-5.2"),
        ModelSpec::new(OpenAi, "gpt-5-mini", "gpt-5-mini"),
        ModelSpec::new(OpenAi, "gpt-4.1", "gpt-4.1"),
        ModelSpec::new(OpenAi, "gpt-4.1-mini", "gpt-4.1-mini"),
        ModelSpec::new(Gemini, "gemini-3-pro", "gemini-3-pro-preview"),
        ModelSpec::new(Gemini, "gemini-3-flash", "gemini-3-flash-preview"),
        ModelSpec::new(Gemini, "gemini-2.5", "gemini-2.5-pro"),
        ModelSpec::new(Gemini, "gemini-2.0-flash-lite", "gemini-2.0-flash-lite"),
    ]
}

fn default_max_tokens() -> u32 {
    5
}

fn default_request_timeout() -> u64 {
    120
}

fn default_concurrency() -> usize {
    15
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    2_000
}

fn default_max_backoff() -> u64 {
    30_000
}

fn default_progress_interval() -> u64 {
    2_000
}

impl BenchmarkConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Resolve the models to run from optional provider and model filters
    /// @ai:post result is non-empty on success and keeps registry order
    /// @ai:effects pure
    pub fn select_models(
        &self,
        provider: Option<ProviderKind>,
        model: Option<&str>,
    ) -> Result<Vec<ModelSpec>, ConfigError> {
        let candidates: Vec<&ModelSpec> = self
            .models
            .iter()
            .filter(|m| provider.map_or(true, |p| m.provider == p))
            .collect();

        match model {
            // Without a provider the first provider serving the key wins
            Some(key) => candidates
                .iter()
                .find(|m| m.key == key)
                .map(|m| vec![(*m).clone()])
                .ok_or_else(|| ConfigError::UnknownModel {
                    model: key.to_string(),
                    available: candidates.iter().map(|m| m.key.clone()).collect(),
                }),
            None if candidates.is_empty() => Err(ConfigError::UnknownProvider(
                provider.map(|p| p.to_string()).unwrap_or_default(),
            )),
            None => Ok(candidates.into_iter().cloned().collect()),
        }
    }
}

impl RunConfig {
    /// @ai:intent Delay before the first retry
    /// @ai:effects pure
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    /// @ai:effects pure
    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }

    /// @ai:effects pure
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select_all_models_by_default() {
        let config = BenchmarkConfig::default();
        let models = config.select_models(None, None).unwrap();
        assert_eq!(models.len(), 12);
        assert_eq!(models[0].label(), "anthropic/sonnet");
    }

    #[test]
    fn test_select_models_for_provider() {
        let config = BenchmarkConfig::default();
        let models = config
            .select_models(Some(ProviderKind::Gemini), None)
            .unwrap();
        assert_eq!(models.len(), 4);
        assert!(models.iter().all(|m| m.provider == ProviderKind::Gemini));
    }

    #[test]
    fn test_select_model_without_provider() {
        let config = BenchmarkConfig::default();
        let models = config.select_models(None, Some("gpt-4.1")).unwrap();
        assert_eq!(
            models,
            vec![ModelSpec::new(ProviderKind::OpenAi, "gpt-4.1", "gpt-4.1")]
        );
    }

    #[test]
    fn test_select_unknown_model_for_provider() {
        let config = BenchmarkConfig::default();
        let err = config
            .select_models(Some(ProviderKind::Anthropic), Some("gpt-4.1"))
            .unwrap_err();
        match err {
            ConfigError::UnknownModel { model, available } => {
                assert_eq!(model, "gpt-4.1");
                assert_eq!(available, vec!["sonnet", "opus", "haiku"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_provider_kind() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert!("mistral".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BenchmarkConfig = toml::from_str(
            r#"
[run]
concurrency = 4

[[models]]
provider = "anthropic"
key = "sonnet"
id = "claude-sonnet-4-5-20250929"
"#,
        )
        .unwrap();

        assert_eq!(config.run.concurrency, 4);
        assert_eq!(config.run.max_attempts, 3);
        assert_eq!(config.api.max_tokens, 5);
        assert_eq!(config.models.len(), 1);
        assert_eq!(config.paths.results_dir, PathBuf::from("results"));
    }

    #[test]
    fn test_config_roundtrip_through_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("mcq-bench.toml");

        let config = BenchmarkConfig::default();
        config.save(&path).unwrap();
        let loaded = BenchmarkConfig::load(&path).unwrap();

        assert_eq!(loaded.models, config.models);
        assert_eq!(loaded.run.max_backoff_ms, 30_000);
    }
}
