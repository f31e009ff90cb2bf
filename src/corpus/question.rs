//! @ai:module:intent Question and answer-label definitions for benchmark datasets
//! @ai:module:layer domain
//! @ai:module:public_api Question, Answer, QuestionRecord
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Choice label of a four-option question, or the unrecognized sentinel
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    A,
    B,
    C,
    D,
    #[serde(rename = "?")]
    Unrecognized,
}

impl Answer {
    pub const CHOICES: [Answer; 4] = [Answer::A, Answer::B, Answer::C, Answer::D];

    /// @ai:intent Convert answer to its single-character label
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::A => "A",
            Answer::B => "B",
            Answer::C => "C",
            Answer::D => "D",
            Answer::Unrecognized => "?",
        }
    }

    /// @ai:intent Map a label character to a choice, case-insensitively
    /// @ai:effects pure
    pub fn from_char(c: char) -> Answer {
        match c.to_ascii_uppercase() {
            'A' => Answer::A,
            'B' => Answer::B,
            'C' => Answer::C,
            'D' => Answer::D,
            _ => Answer::Unrecognized,
        }
    }

    /// @ai:effects pure
    pub fn is_choice(&self) -> bool {
        *self != Answer::Unrecognized
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent A multiple-choice question with its position in the dataset
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// 1-based position in the dataset file; identifies the question in result caches
    pub index: u32,
    pub text: String,
    /// Option texts in label order A, B, C, D
    pub options: [String; 4],
    pub solution: Answer,
}

/// @ai:intent Raw question structure from a dataset JSON file
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
    pub solution: String,
}

impl QuestionRecord {
    /// @ai:intent Attach a dataset position and validate the solution label
    /// @ai:post Ok question has a solution in A-D
    /// @ai:effects pure
    pub fn into_question(self, index: u32) -> Result<Question, String> {
        let mut chars = self.solution.trim().chars();
        let solution = match (chars.next(), chars.next()) {
            (Some(c), None) => Answer::from_char(c),
            _ => Answer::Unrecognized,
        };

        if !solution.is_choice() {
            return Err(format!(
                "question {} has invalid solution '{}'",
                index, self.solution
            ));
        }

        Ok(Question {
            index,
            text: self.question,
            options: [self.a, self.b, self.c, self.d],
            solution,
        })
    }
}
