//! @ai:module:intent Multiple-choice LLM benchmark library
//! @ai:module:layer application
//! @ai:module:public_api cache, config, corpus, error, evaluator, metrics, report, runner

pub mod cache;
pub mod config;
pub mod corpus;
pub mod error;
pub mod evaluator;
pub mod metrics;
pub mod report;
pub mod runner;

pub use cache::{CacheRecord, ResultCache};
pub use config::{BenchmarkConfig, ModelSpec, ProviderKind};
pub use corpus::{Answer, DatasetLoader, Question, QuestionRange};
pub use error::{ConfigError, ProviderError};
pub use evaluator::AnswerExtractor;
pub use metrics::{MetricsAggregator, ModelReport, Outcome};
pub use report::{ConsoleReporter, JsonReporter};
pub use runner::{BenchmarkExecutor, Provider, ProviderClient, ProviderSet};
