//! @ai:module:intent Accuracy aggregation across outcomes and models
//! @ai:module:layer application
//! @ai:module:public_api MetricsAggregator
//! @ai:module:stateless true

use crate::metrics::types::{AccuracyStats, ModelReport, Outcome};

/// @ai:intent Trait for metrics aggregation
pub trait MetricsAggregatorTrait: Send + Sync {
    /// @ai:intent Count correct outcomes over all given outcomes
    fn accuracy<'a, I>(&self, outcomes: I) -> AccuracyStats
    where
        I: IntoIterator<Item = &'a Outcome>;

    /// @ai:intent Order model reports for the cross-model summary
    fn rank(&self, reports: &[ModelReport]) -> Vec<ModelReport>;
}

/// @ai:intent Aggregates outcomes into accuracy figures
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// @ai:intent Create a new metrics aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsAggregatorTrait for MetricsAggregator {
    /// @ai:effects pure
    fn accuracy<'a, I>(&self, outcomes: I) -> AccuracyStats
    where
        I: IntoIterator<Item = &'a Outcome>,
    {
        outcomes
            .into_iter()
            .fold(AccuracyStats::default(), |stats, outcome| AccuracyStats {
                correct: stats.correct + usize::from(outcome.is_correct),
                total: stats.total + 1,
            })
    }

    /// @ai:intent Sort by descending accuracy; ties keep run order
    /// @ai:effects pure
    fn rank(&self, reports: &[ModelReport]) -> Vec<ModelReport> {
        let mut ranked = reports.to_vec();
        ranked.sort_by(|a, b| b.accuracy.total_cmp(&a.accuracy));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModelSpec, ProviderKind};
    use crate::corpus::Answer;

    fn outcome(is_correct: bool) -> Outcome {
        if is_correct {
            Outcome::new(Answer::A, Answer::A)
        } else {
            Outcome::new(Answer::B, Answer::A)
        }
    }

    fn report(key: &str, correct: usize, total: usize) -> ModelReport {
        let model = ModelSpec {
            provider: ProviderKind::OpenAi,
            key: key.to_string(),
            id: key.to_string(),
        };
        ModelReport::new(&model, AccuracyStats { correct, total }, 0, 0)
    }

    #[test]
    fn test_accuracy_three_of_four() {
        let outcomes = [outcome(true), outcome(false), outcome(true), outcome(true)];
        let stats = MetricsAggregator::new().accuracy(&outcomes);

        assert_eq!(stats, AccuracyStats { correct: 3, total: 4 });
        assert!((stats.percent() - 75.0).abs() < f64::EPSILON);
        assert_eq!(format!("{:.1}%", stats.percent()), "75.0%");
    }

    #[test]
    fn test_accuracy_empty() {
        let none: [Outcome; 0] = [];
        let stats = MetricsAggregator::new().accuracy(&none);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percent(), 0.0);
    }

    #[test]
    fn test_rank_descending() {
        let reports = vec![report("low", 1, 4), report("high", 4, 4), report("mid", 2, 4)];
        let ranked = MetricsAggregator::new().rank(&reports);

        let keys: Vec<_> = ranked.iter().map(|r| r.model_key.as_str()).collect();
        assert_eq!(keys, vec!["high", "mid", "low"]);
    }
}
