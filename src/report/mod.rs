//! @ai:module:intent Report generation for benchmark results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ConsoleReporter, JsonReporter, SummaryReport

pub mod console;
pub mod json_report;

pub use console::{ConsoleReporter, RunBanner};
pub use json_report::{JsonReporter, JsonReporterTrait, SummaryReport};
