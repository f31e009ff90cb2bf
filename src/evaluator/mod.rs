//! @ai:module:intent Scoring of model responses
//! @ai:module:layer application
//! @ai:module:public_api AnswerExtractor, AnswerExtractorTrait

pub mod answer_extractor;

pub use answer_extractor::{AnswerExtractor, AnswerExtractorTrait};
