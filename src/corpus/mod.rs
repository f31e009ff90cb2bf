//! @ai:module:intent Question datasets and loading
//! @ai:module:layer domain
//! @ai:module:public_api Question, Answer, DatasetLoader, QuestionRange

pub mod loader;
pub mod question;

pub use loader::{select_range, DatasetLoader, QuestionRange};
pub use question::{Answer, Question, QuestionRecord};
