//! @ai:module:intent Console output for runs, models and the cross-model summary
//! @ai:module:layer presentation
//! @ai:module:public_api ConsoleReporter, RunBanner
//! @ai:module:stateless true

use crate::config::ModelSpec;
use crate::metrics::ModelReport;
use std::fmt::Write as FmtWrite;

const RULE_WIDTH: usize = 60;

/// @ai:intent Facts shown at the top of a run
#[derive(Debug, Clone)]
pub struct RunBanner {
    pub dataset: String,
    pub dataset_size: usize,
    pub first_index: u32,
    pub last_index: u32,
    pub selected: usize,
    pub models: usize,
    pub concurrency: usize,
}

/// @ai:intent Formats and prints human-readable run output
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:effects pure
    pub fn format_banner(&self, banner: &RunBanner) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut output = String::new();

        writeln!(output, "{}", rule).unwrap();
        writeln!(output, "  MCQ Benchmark").unwrap();
        writeln!(output, "{}", rule).unwrap();
        writeln!(
            output,
            "  Dataset:     {} ({} questions)",
            banner.dataset, banner.dataset_size
        )
        .unwrap();
        writeln!(
            output,
            "  Range:       {}-{} ({} questions)",
            banner.first_index, banner.last_index, banner.selected
        )
        .unwrap();
        writeln!(output, "  Models:      {}", banner.models).unwrap();
        writeln!(output, "  Concurrency: {}", banner.concurrency).unwrap();
        write!(output, "{}", rule).unwrap();

        output
    }

    /// @ai:effects pure
    pub fn format_model_header(&self, model: &ModelSpec, cached: usize, total: usize) -> String {
        format!(
            "\n  Model:   {} ({})\n  Cached:  {}/{} - running {}",
            model.key,
            model.id,
            cached,
            total,
            total - cached
        )
    }

    /// @ai:effects pure
    pub fn format_model_result(&self, report: &ModelReport) -> String {
        format!(
            "  Result:  {}/{} ({:.1}%)",
            report.correct, report.total, report.accuracy
        )
    }

    /// @ai:intent Summary table; reports are expected already ranked
    /// @ai:effects pure
    pub fn format_summary(&self, dataset: &str, ranked: &[ModelReport]) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut output = String::new();

        writeln!(output).unwrap();
        writeln!(output, "{}", rule).unwrap();
        writeln!(output, "  SUMMARY: {}", dataset).unwrap();
        writeln!(output, "{}", rule).unwrap();

        for report in ranked {
            writeln!(output, "  {:<30}  {:.1}%", report.label(), report.accuracy).unwrap();
        }

        write!(output, "{}", rule).unwrap();
        output
    }

    /// @ai:effects io
    pub fn print_banner(&self, banner: &RunBanner) {
        println!("{}", self.format_banner(banner));
    }

    /// @ai:effects io
    pub fn print_model_header(&self, model: &ModelSpec, cached: usize, total: usize) {
        println!("{}", self.format_model_header(model, cached, total));
    }

    /// @ai:effects io
    pub fn print_all_cached(&self) {
        println!("  All cached.");
    }

    /// @ai:effects io
    pub fn print_model_result(&self, report: &ModelReport) {
        println!("{}", self.format_model_result(report));
    }

    /// @ai:effects io
    pub fn print_summary(&self, dataset: &str, ranked: &[ModelReport]) {
        println!("{}", self.format_summary(dataset, ranked));
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;
    use crate::metrics::AccuracyStats;

    fn report(provider: ProviderKind, key: &str, correct: usize, total: usize) -> ModelReport {
        let model = ModelSpec {
            provider,
            key: key.to_string(),
            id: key.to_string(),
        };
        ModelReport::new(&model, AccuracyStats { correct, total }, 0, 0)
    }

    #[test]
    fn test_model_result_line() {
        let line = ConsoleReporter::new()
            .format_model_result(&report(ProviderKind::Anthropic, "sonnet", 3, 4));
        assert_eq!(line, "  Result:  3/4 (75.0%)");
    }

    #[test]
    fn test_summary_lists_models_in_given_order() {
        let ranked = vec![
            report(ProviderKind::Anthropic, "opus", 9, 10),
            report(ProviderKind::OpenAi, "gpt-4.1", 7, 10),
        ];

        let summary = ConsoleReporter::new().format_summary("expert_written", &ranked);

        assert!(summary.contains("SUMMARY: expert_written"));
        let opus = summary.find("anthropic/opus").unwrap();
        let gpt = summary.find("openai/gpt-4.1").unwrap();
        assert!(opus < gpt);
        assert!(summary.contains("90.0%"));
    }

    #[test]
    fn test_banner() {
        let banner = RunBanner {
            dataset: "qa500".to_string(),
            dataset_size: 500,
            first_index: 1,
            last_index: 100,
            selected: 100,
            models: 2,
            concurrency: 15,
        };

        let text = ConsoleReporter::new().format_banner(&banner);
        assert!(text.contains("Dataset:     qa500 (500 questions)"));
        assert!(text.contains("Range:       1-100 (100 questions)"));
    }
}
