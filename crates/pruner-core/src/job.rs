//! Job files describing a complete pruning run
//!
//! A job file is JSON holding everything a run needs: the inputs, the
//! exclusion source, the pruning field and the separators. Omitted settings
//! fall back to tab separators, the `specimenid` field and `pruned.tsv`.

use crate::batch::{run_batch, BatchInput, BatchReport, ExclusionSource};
use crate::error::{Error, Result};
use crate::exclusion::ExclusionSet;
use crate::filter::{PruneConfig, DEFAULT_PRUNING_FIELD};
use crate::separator::{Separator, SeparatorConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Output name used for text inputs when none is configured
pub const DEFAULT_FALLBACK_OUTPUT: &str = "pruned.tsv";

/// A complete, self-contained pruning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneJob {
    /// Tables to prune
    pub input: BatchInput,
    /// Values to prune them by
    pub exclusions: ExclusionSource,
    /// Column tested in the inputs and read from an exclusion table
    #[serde(default = "default_pruning_field")]
    pub pruning_field: String,
    #[serde(default)]
    pub separators: SeparatorConfig,
    /// Separator of the exclusion table; the input separator when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion_separator: Option<Separator>,
    /// Compare case-folded values with separator characters removed
    #[serde(default)]
    pub fuzzy: bool,
    /// Output file for inputs that have no file name of their own
    #[serde(default = "default_fallback_output")]
    pub fallback_output: PathBuf,
}

fn default_pruning_field() -> String {
    DEFAULT_PRUNING_FIELD.to_string()
}

fn default_fallback_output() -> PathBuf {
    PathBuf::from(DEFAULT_FALLBACK_OUTPUT)
}

impl PruneJob {
    /// Create a job with default field, separators and fallback output
    pub fn new(input: BatchInput, exclusions: ExclusionSource) -> Self {
        Self {
            input,
            exclusions,
            pruning_field: default_pruning_field(),
            separators: SeparatorConfig::default(),
            exclusion_separator: None,
            fuzzy: false,
            fallback_output: default_fallback_output(),
        }
    }

    /// Load a job file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::UnreadableSource {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the job file as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content).map_err(|e| Error::Write {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Filtering settings shared by every item of the batch
    pub fn config(&self) -> PruneConfig {
        PruneConfig {
            separators: self.separators,
            pruning_field: self.pruning_field.clone(),
        }
    }

    /// Build the exclusion set this job prunes by
    pub fn exclusion_set(&self) -> Result<ExclusionSet> {
        let separator = self.exclusion_separator.unwrap_or(self.separators.input);
        self.exclusions
            .build(&self.pruning_field, separator, self.fuzzy)
    }

    /// Run the whole job, aborting at the first failing item
    pub fn run(&self) -> Result<BatchReport> {
        let exclusions = self.exclusion_set()?;
        let sources = self.input.sources()?;

        tracing::info!(
            items = sources.len(),
            exclusions = exclusions.len(),
            mode = ?exclusions.mode(),
            field = %self.pruning_field,
            "Starting pruning run"
        );

        run_batch(&sources, &self.config(), &exclusions, &self.fallback_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_job_uses_defaults() {
        let json = r#"{
            "input": { "file": "specimens.tsv" },
            "exclusions": { "text": "S-1,S-2" }
        }"#;
        let job: PruneJob = serde_json::from_str(json).unwrap();

        assert_eq!(job.input, BatchInput::File(PathBuf::from("specimens.tsv")));
        assert_eq!(job.pruning_field, "specimenid");
        assert_eq!(job.separators, SeparatorConfig::new(Separator::TAB, Separator::TAB));
        assert_eq!(job.fallback_output, PathBuf::from("pruned.tsv"));
        assert!(!job.fuzzy);
    }

    #[test]
    fn test_full_job_parses() {
        let json = r#"{
            "input": { "directory": "batch" },
            "exclusions": { "file": "prune.csv" },
            "pruning_field": "voucher",
            "separators": { "input": "comma", "output": ";" },
            "exclusion_separator": "tab",
            "fuzzy": true,
            "fallback_output": "out.csv"
        }"#;
        let job: PruneJob = serde_json::from_str(json).unwrap();

        assert_eq!(job.input, BatchInput::Directory(PathBuf::from("batch")));
        assert_eq!(job.exclusions, ExclusionSource::File(PathBuf::from("prune.csv")));
        assert_eq!(job.config().separators.output, Separator::SEMICOLON);
        assert_eq!(job.exclusion_separator, Some(Separator::TAB));
        assert!(job.fuzzy);
    }

    #[test]
    fn test_invalid_separator_rejected() {
        let json = r#"{
            "input": { "text": "id\n1" },
            "exclusions": { "text": "1" },
            "separators": { "input": "pipe-ish", "output": "tab" }
        }"#;
        assert!(serde_json::from_str::<PruneJob>(json).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");

        let mut job = PruneJob::new(
            BatchInput::Text("specimenid\n1\n".to_string()),
            ExclusionSource::Text("1".to_string()),
        );
        job.fuzzy = true;
        job.save(&path).unwrap();

        assert_eq!(PruneJob::load(&path).unwrap(), job);
    }

    #[test]
    fn test_exclusion_table_uses_input_separator_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let prune = dir.path().join("prune.csv");
        fs::write(&prune, "specimenid,note\nS-1,dup\n").unwrap();

        let mut job = PruneJob::new(
            BatchInput::Text(String::new()),
            ExclusionSource::File(prune.clone()),
        );
        job.separators = SeparatorConfig::new(Separator::COMMA, Separator::TAB);
        assert!(job.exclusion_set().unwrap().contains("S-1"));

        job.separators = SeparatorConfig::new(Separator::TAB, Separator::TAB);
        assert!(job.exclusion_set().is_err());

        job.exclusion_separator = Some(Separator::COMMA);
        assert!(job.exclusion_set().unwrap().contains("S-1"));
    }

    #[test]
    fn test_run_file_job() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("specimens.csv");
        fs::write(&input, "specimenid,species\nS-1,Apis\nS-2,Bombus\nS_1,Apis\n").unwrap();

        let mut job = PruneJob::new(
            BatchInput::File(input),
            ExclusionSource::Text("s1".to_string()),
        );
        job.separators = SeparatorConfig::new(Separator::COMMA, Separator::TAB);
        job.fuzzy = true;

        let report = job.run().unwrap();
        assert_eq!(report.exclusion_count, 1);
        assert_eq!(report.items[0].rows_retained, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("specimens_pruned.csv")).unwrap(),
            "specimenid\tspecies\nS-2\tBombus\n"
        );
    }
}
