//! @ai:module:intent Extract the chosen label from a model response
//! @ai:module:layer application
//! @ai:module:public_api AnswerExtractor
//! @ai:module:stateless true

use crate::corpus::Answer;
use regex::Regex;

/// @ai:intent Trait for answer extraction
pub trait AnswerExtractorTrait: Send + Sync {
    /// @ai:intent Map raw response text to a label or the unrecognized sentinel
    fn extract(&self, response: &str) -> Answer;
}

/// @ai:intent Finds the first A-D label in free-form response text
pub struct AnswerExtractor {
    /// A label letter standing alone as a word, e.g. "B", "(c)", "answer: d"
    standalone_label: Regex,
    any_label: Regex,
}

impl AnswerExtractor {
    /// @ai:intent Create a new answer extractor
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            standalone_label: Regex::new(r"(?i)\b[a-d]\b").unwrap(),
            any_label: Regex::new(r"(?i)[a-d]").unwrap(),
        }
    }
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerExtractorTrait for AnswerExtractor {
    /// @ai:intent Extract the first label, preferring letters that stand alone
    /// @ai:post result is A, B, C, D or Unrecognized; never fails
    /// @ai:effects pure
    fn extract(&self, response: &str) -> Answer {
        self.standalone_label
            .find(response)
            .or_else(|| self.any_label.find(response))
            .and_then(|m| m.as_str().chars().next())
            .map(Answer::from_char)
            .unwrap_or(Answer::Unrecognized)
    }
}
