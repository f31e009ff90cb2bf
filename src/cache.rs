//! @ai:module:intent Persisted per-model result cache enabling resumable runs
//! @ai:module:layer infrastructure
//! @ai:module:public_api ResultCache, CacheRecord
//! @ai:module:stateless true

use crate::config::ProviderKind;
use crate::metrics::Outcome;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Outcomes keyed by 1-based question index; serialized with decimal string keys
pub type CacheRecord = BTreeMap<u32, Outcome>;

/// @ai:intent Reads and atomically rewrites cache files in a results directory
#[derive(Debug, Clone)]
pub struct ResultCache {
    results_dir: PathBuf,
}

impl ResultCache {
    /// @ai:intent Create a cache rooted at results_dir
    /// @ai:effects pure
    pub fn new(results_dir: PathBuf) -> Self {
        Self { results_dir }
    }

    /// @ai:intent File holding outcomes for one provider, model and dataset
    /// @ai:effects pure
    pub fn path(&self, provider: ProviderKind, model_key: &str, dataset: &str) -> PathBuf {
        self.results_dir
            .join(format!("{}__{}_{}.json", dataset, provider, model_key))
    }

    /// @ai:intent Load prior outcomes, treating a missing or unreadable file as empty
    /// @ai:post never fails; the run continues without prior results on error
    /// @ai:effects fs:read
    pub fn load(&self, provider: ProviderKind, model_key: &str, dataset: &str) -> CacheRecord {
        let path = self.path(provider, model_key, dataset);

        if !path.exists() {
            return CacheRecord::new();
        }

        match read_record(&path) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable cache {}: {:#}",
                    path.display(),
                    e
                );
                CacheRecord::new()
            }
        }
    }

    /// @ai:intent Replace the cache file with record via temp file and rename
    /// @ai:post the destination holds either the old or the new content, never a partial write
    /// @ai:effects fs:write
    pub fn save(
        &self,
        provider: ProviderKind,
        model_key: &str,
        dataset: &str,
        record: &CacheRecord,
    ) -> Result<()> {
        let path = self.path(provider, model_key, dataset);

        std::fs::create_dir_all(&self.results_dir).with_context(|| {
            format!("Failed to create results directory: {}", self.results_dir.display())
        })?;

        let json = serde_json::to_string_pretty(record)?;

        // Same directory as the destination so the rename never crosses filesystems
        let mut tmp = NamedTempFile::new_in(&self.results_dir)
            .context("Failed to create temporary cache file")?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;

        tmp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace cache file: {}", path.display()))?;

        tracing::debug!("Saved {} outcomes to {}", record.len(), path.display());
        Ok(())
    }
}

fn read_record(path: &Path) -> Result<CacheRecord> {
    let content = std::fs::read_to_string(path)?;
    let record = serde_json::from_str(&content)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Answer;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_record() -> CacheRecord {
        let mut record = CacheRecord::new();
        record.insert(1, Outcome::new(Answer::A, Answer::A));
        record.insert(2, Outcome::new(Answer::Unrecognized, Answer::C));
        record.insert(10, Outcome::new(Answer::D, Answer::B));
        record
    }

    #[test]
    fn test_path_layout() {
        let cache = ResultCache::new(PathBuf::from("results"));
        let path = cache.path(ProviderKind::Anthropic, "sonnet", "expert_written");
        assert_eq!(path, PathBuf::from("results/expert_written__anthropic_sonnet.json"));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let cache = ResultCache::new(temp.path().join("results"));

        assert!(cache.load(ProviderKind::OpenAi, "gpt-4.1", "qa500").is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let cache = ResultCache::new(temp.path().to_path_buf());
        let path = cache.path(ProviderKind::OpenAi, "gpt-4.1", "qa500");
        std::fs::write(&path, "{\"1\": {\"predicted\": ").unwrap();

        assert!(cache.load(ProviderKind::OpenAi, "gpt-4.1", "qa500").is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let cache = ResultCache::new(temp.path().join("results"));
        let record = sample_record();

        cache
            .save(ProviderKind::Gemini, "gemini-2.5", "complete", &record)
            .unwrap();

        assert_eq!(cache.load(ProviderKind::Gemini, "gemini-2.5", "complete"), record);
    }

    #[test]
    fn test_file_format() {
        let temp = TempDir::new().unwrap();
        let cache = ResultCache::new(temp.path().to_path_buf());
        let mut record = CacheRecord::new();
        record.insert(3, Outcome::new(Answer::B, Answer::B));

        cache
            .save(ProviderKind::Anthropic, "haiku", "qa500", &record)
            .unwrap();

        let content =
            std::fs::read_to_string(cache.path(ProviderKind::Anthropic, "haiku", "qa500")).unwrap();
        assert_eq!(
            content,
            "{\n  \"3\": {\n    \"predicted\": \"B\",\n    \"correct\": \"B\",\n    \"is_correct\": true\n  }\n}"
        );
    }

    #[test]
    fn test_resave_is_byte_identical() {
        let temp = TempDir::new().unwrap();
        let cache = ResultCache::new(temp.path().to_path_buf());
        let path = cache.path(ProviderKind::OpenAi, "gpt-5-mini", "qa500");

        cache
            .save(ProviderKind::OpenAi, "gpt-5-mini", "qa500", &sample_record())
            .unwrap();
        let first = std::fs::read(&path).unwrap();

        let reloaded = cache.load(ProviderKind::OpenAi, "gpt-5-mini", "qa500");
        cache
            .save(ProviderKind::OpenAi, "gpt-5-mini", "qa500", &reloaded)
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_failed_persist_leaves_destination_untouched() {
        let temp = TempDir::new().unwrap();
        let cache = ResultCache::new(temp.path().to_path_buf());

        // A non-empty directory at the destination makes the final rename fail
        let destination = cache.path(ProviderKind::Anthropic, "opus", "qa500");
        std::fs::create_dir_all(&destination).unwrap();
        let previous = destination.join("previous.json");
        std::fs::write(&previous, b"{\"1\": {}}").unwrap();

        assert!(cache
            .save(ProviderKind::Anthropic, "opus", "qa500", &sample_record())
            .is_err());
        assert!(destination.is_dir());
        assert_eq!(std::fs::read(&previous).unwrap(), b"{\"1\": {}}");

        let leftovers: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path != &destination)
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {:?}", leftovers);
    }

    #[test]
    fn test_orphan_temp_file_does_not_affect_load() {
        let temp = TempDir::new().unwrap();
        let cache = ResultCache::new(temp.path().to_path_buf());
        let record = sample_record();
        cache
            .save(ProviderKind::Anthropic, "opus", "qa500", &record)
            .unwrap();

        // A temp file written but never renamed, as left by a killed process
        let mut orphan = NamedTempFile::new_in(temp.path()).unwrap();
        orphan.write_all(b"{\"1\": {\"predic").unwrap();
        let (_file, _orphan_path) = orphan.keep().unwrap();

        assert_eq!(cache.load(ProviderKind::Anthropic, "opus", "qa500"), record);
    }

    #[test]
    fn test_save_creates_results_dir() {
        let temp = TempDir::new().unwrap();
        let cache = ResultCache::new(temp.path().join("nested").join("results"));

        cache
            .save(ProviderKind::Gemini, "gemini-3-pro", "qa500", &sample_record())
            .unwrap();

        assert!(cache
            .path(ProviderKind::Gemini, "gemini-3-pro", "qa500")
            .exists());
    }
}
