//! @ai:module:intent JSON dataset loader for benchmark questions
//! @ai:module:layer infrastructure
//! @ai:module:public_api DatasetLoader, QuestionRange
//! @ai:module:stateless true

use crate::corpus::question::{Question, QuestionRecord};
use crate::error::ConfigError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// @ai:intent Inclusive 1-based range of question indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionRange {
    pub start: u32,
    pub end: u32,
}

impl std::str::FromStr for QuestionRange {
    type Err = ConfigError;

    /// @ai:intent Parse "start-end" or a single index
    /// @ai:effects pure
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidRange {
            range: s.to_string(),
            reason: reason.to_string(),
        };

        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| invalid("expected positive integers like 1-100"))
        };

        let (start, end) = match s.split_once('-') {
            Some((start, end)) => (parse(start)?, parse(end)?),
            None => {
                let single = parse(s)?;
                (single, single)
            }
        };

        if start == 0 {
            return Err(invalid("indices are 1-based"));
        }

        if start > end {
            return Err(invalid("start is after end"));
        }

        Ok(Self { start, end })
    }
}

/// @ai:intent Loads question datasets from JSON files
pub struct DatasetLoader {
    data_dir: PathBuf,
}

impl DatasetLoader {
    /// @ai:intent Create a loader that falls back to data_dir
    /// @ai:effects pure
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// @ai:intent Locate a dataset file by name
    /// @ai:post returned path exists
    /// @ai:effects fs:read
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ConfigError> {
        let file_name = format!("{}.json", name);

        [PathBuf::from(&file_name), self.data_dir.join(&file_name)]
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| ConfigError::DatasetNotFound(name.to_string()))
    }

    /// @ai:intent Parse a dataset file, assigning 1-based indices by position
    /// @ai:effects fs:read
    pub fn load(&self, path: &Path) -> Result<Vec<Question>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

        let records: Vec<QuestionRecord> =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidDataset {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let questions = records
            .into_iter()
            .zip(1u32..)
            .map(|(record, index)| record.into_question(index))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|reason| ConfigError::InvalidDataset {
                path: path.to_path_buf(),
                reason,
            })?;

        tracing::debug!("Loaded {} questions from {}", questions.len(), path.display());
        Ok(questions)
    }

    /// @ai:intent Resolve and load a dataset by name
    /// @ai:effects fs:read
    pub fn load_by_name(&self, name: &str) -> Result<Vec<Question>> {
        let path = self.resolve(name)?;
        self.load(&path)
    }
}

/// @ai:intent Restrict questions to a range, or keep all when no range is given
/// @ai:pre questions are ordered by index starting at 1
/// @ai:effects pure
pub fn select_range(
    questions: Vec<Question>,
    range: Option<QuestionRange>,
) -> Result<Vec<Question>, ConfigError> {
    let Some(range) = range else {
        return Ok(questions);
    };

    if range.end as usize > questions.len() {
        return Err(ConfigError::InvalidRange {
            range: format!("{}-{}", range.start, range.end),
            reason: format!("dataset has only {} questions", questions.len()),
        });
    }

    Ok(questions
        .into_iter()
        .filter(|q| (range.start..=range.end).contains(&q.index))
        .collect())
}
