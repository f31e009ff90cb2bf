//! @ai:module:intent Metric types for benchmark results
//! @ai:module:layer domain
//! @ai:module:public_api Outcome, AccuracyStats, ModelReport
//! @ai:module:stateless true

use crate::config::ModelSpec;
use crate::corpus::Answer;
use serde::{Deserialize, Serialize};

/// @ai:intent Scored result of one model answering one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub predicted: Answer,
    pub correct: Answer,
    pub is_correct: bool,
}

impl Outcome {
    /// @ai:intent Score a prediction against the solution
    /// @ai:post is_correct == (predicted == correct)
    /// @ai:effects pure
    pub fn new(predicted: Answer, correct: Answer) -> Self {
        Self {
            predicted,
            correct,
            is_correct: predicted == correct,
        }
    }
}

/// @ai:intent Correct count over a set of outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracyStats {
    pub correct: usize,
    pub total: usize,
}

impl AccuracyStats {
    /// @ai:intent Accuracy as a percentage, 0 when nothing was scored
    /// @ai:effects pure
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

/// @ai:intent Final result of one model on one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    pub provider: String,
    pub model_key: String,
    pub model_id: String,
    pub correct: usize,
    pub total: usize,
    pub accuracy: f64,
    /// Outcomes produced by this run, excluding cache hits
    pub evaluated: usize,
    /// Questions that exhausted their retries and were left unscored
    pub failed: usize,
}

impl ModelReport {
    /// @ai:effects pure
    pub fn new(model: &ModelSpec, stats: AccuracyStats, evaluated: usize, failed: usize) -> Self {
        Self {
            provider: model.provider.to_string(),
            model_key: model.key.clone(),
            model_id: model.id.clone(),
            correct: stats.correct,
            total: stats.total,
            accuracy: stats.percent(),
            evaluated,
            failed,
        }
    }

    /// @ai:effects pure
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider, self.model_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_correctness() {
        assert!(Outcome::new(Answer::B, Answer::B).is_correct);
        assert!(!Outcome::new(Answer::A, Answer::B).is_correct);
        assert!(!Outcome::new(Answer::Unrecognized, Answer::C).is_correct);
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_string(&Outcome::new(Answer::Unrecognized, Answer::C)).unwrap();
        assert_eq!(json, r#"{"predicted":"?","correct":"C","is_correct":false}"#);
    }

    #[test]
    fn test_percent_of_empty_stats() {
        assert_eq!(AccuracyStats::default().percent(), 0.0);
    }
}
