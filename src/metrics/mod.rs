//! @ai:module:intent Outcomes, live run counters and accuracy aggregation
//! @ai:module:layer application
//! @ai:module:public_api Outcome, RunStatus, StatusSnapshot, AccuracyStats, ModelReport, MetricsAggregator

pub mod aggregator;
pub mod status;
pub mod types;

pub use aggregator::{MetricsAggregator, MetricsAggregatorTrait};
pub use status::{RunStatus, StatusSnapshot};
pub use types::{AccuracyStats, ModelReport, Outcome};
