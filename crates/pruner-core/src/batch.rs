//! Batch orchestration: one exclusion set, many inputs
//!
//! Inputs are resolved to a list of sources up front and then filtered
//! strictly one after another. The first failure aborts the batch.

use crate::error::{Error, Result};
use crate::exclusion::ExclusionSet;
use crate::filter::{filter_with_counts, PruneConfig};
use crate::naming::resolve_output_destination;
use crate::separator::Separator;
use crate::source::TableSource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What the batch reads its tables from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchInput {
    /// A single table file
    File(PathBuf),
    /// Every regular file directly inside this directory
    Directory(PathBuf),
    /// A table pasted as text
    Text(String),
}

impl BatchInput {
    /// Classify a path as a file or directory input
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|e| Error::UnreadableSource {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(if meta.is_dir() {
            BatchInput::Directory(path.to_path_buf())
        } else {
            BatchInput::File(path.to_path_buf())
        })
    }

    /// Resolve to the ordered list of sources making up the batch
    pub fn sources(&self) -> Result<Vec<TableSource>> {
        match self {
            BatchInput::File(path) => Ok(vec![TableSource::File(path.clone())]),
            BatchInput::Directory(dir) => scan_directory(dir),
            BatchInput::Text(text) => Ok(vec![TableSource::text(text.clone())]),
        }
    }
}

/// Where the exclusion values come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionSource {
    /// A delimited reference table holding the pruning field
    File(PathBuf),
    /// Values pasted as text, one per line or comma-separated on one line
    Text(String),
}

impl ExclusionSource {
    /// Build the exclusion set, normalizing it when `fuzzy` is set
    ///
    /// A reference table is looked up by the same column name as the inputs.
    pub fn build(&self, column: &str, separator: Separator, fuzzy: bool) -> Result<ExclusionSet> {
        let set = match self {
            ExclusionSource::File(path) => {
                ExclusionSet::from_delimited_source(&TableSource::File(path.clone()), column, separator)?
            }
            ExclusionSource::Text(text) => ExclusionSet::from_free_text(text),
        };

        Ok(if fuzzy {
            set.apply_fuzzy_normalization()
        } else {
            set
        })
    }
}

/// List the regular files directly inside `dir`, sorted by file name
///
/// Subdirectories are skipped. The listing is taken before any output is
/// written, so files created by the batch are never picked up as inputs.
pub fn scan_directory(dir: &Path) -> Result<Vec<TableSource>> {
    if !dir.is_dir() {
        return Err(Error::UnreadableSource {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            sources.push(TableSource::File(entry.into_path()));
        } else {
            tracing::debug!(path = %entry.path().display(), "Skipping non-file entry");
        }
    }

    tracing::debug!(dir = %dir.display(), files = sources.len(), "Scanned input directory");
    Ok(sources)
}

/// Outcome of one batch item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReport {
    /// Identity of the input table
    pub source: String,
    /// File the retained rows were written to
    pub destination: PathBuf,
    pub rows_read: usize,
    pub rows_retained: usize,
}

/// Outcome of a whole batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Size of the exclusion set used
    pub exclusion_count: usize,
    /// Items in processing order
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    pub fn total_read(&self) -> usize {
        self.items.iter().map(|i| i.rows_read).sum()
    }

    pub fn total_retained(&self) -> usize {
        self.items.iter().map(|i| i.rows_retained).sum()
    }
}

/// Filter every source in order, writing each to its derived destination
///
/// `fallback` names the output of sources without a file identity.
pub fn run_batch(
    sources: &[TableSource],
    config: &PruneConfig,
    exclusions: &ExclusionSet,
    fallback: &Path,
) -> Result<BatchReport> {
    let mut report = BatchReport {
        exclusion_count: exclusions.len(),
        items: Vec::with_capacity(sources.len()),
    };

    for source in sources {
        let destination = resolve_output_destination(source, fallback);
        let outcome = filter_with_counts(source, &destination, config, exclusions)?;

        tracing::info!(
            source = %source.display_name(),
            destination = %destination.display(),
            removed = outcome.rows_removed(),
            retained = outcome.rows_retained,
            "Pruned table"
        );

        report.items.push(ItemReport {
            source: source.display_name(),
            destination,
            rows_read: outcome.rows_read,
            rows_retained: outcome.rows_retained,
        });
    }

    tracing::info!(
        items = report.items.len(),
        read = report.total_read(),
        retained = report.total_retained(),
        "Batch complete"
    );

    Ok(report)
}
