//! @ai:module:intent Question scheduling, provider clients, retries and live progress
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkExecutor, Provider, ProviderSet, ConcurrencyLimiter, RetryPolicy

pub mod client;
pub mod executor;
pub mod limiter;
pub mod progress;
pub mod providers;
pub mod retry;

pub use client::{MockProviderClient, Provider, ProviderClient, ProviderSet};
pub use executor::{build_prompt, BenchmarkExecutor};
pub use limiter::{ConcurrencyLimiter, ConcurrencyLimiterTrait, LimiterPermit};
pub use progress::{ProgressHandle, ProgressReporter};
pub use retry::RetryPolicy;
