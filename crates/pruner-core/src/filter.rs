//! Row filtering against an exclusion set
//!
//! Filtering is a pure function of the configuration, the exclusion set and
//! the parsed table. The I/O wrappers here only parse the source first and
//! write the survivors afterwards.

use crate::error::{Error, Result};
use crate::exclusion::ExclusionSet;
use crate::parser::parse_table;
use crate::separator::{Separator, SeparatorConfig};
use crate::source::TableSource;
use crate::table::Table;
use crate::writer::write_table_to_path;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column used when none is configured
pub const DEFAULT_PRUNING_FIELD: &str = "specimenid";

/// Immutable settings for one filtering pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneConfig {
    pub separators: SeparatorConfig,
    /// Header name whose values are tested, matched exactly
    pub pruning_field: String,
}

impl PruneConfig {
    pub fn new(input: Separator, output: Separator, pruning_field: impl Into<String>) -> Self {
        Self {
            separators: SeparatorConfig::new(input, output),
            pruning_field: pruning_field.into(),
        }
    }
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            separators: SeparatorConfig::default(),
            pruning_field: DEFAULT_PRUNING_FIELD.to_string(),
        }
    }
}

/// Row counts from a single filtering pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub rows_read: usize,
    pub rows_retained: usize,
}

impl FilterOutcome {
    pub fn rows_removed(&self) -> usize {
        self.rows_read - self.rows_retained
    }
}

/// Keep the rows of `table` whose pruning field is not excluded
///
/// Fails if the header lacks the pruning field, or if a row ends before it.
pub fn filter_table(table: &Table, field: &str, exclusions: &ExclusionSet) -> Result<Table> {
    let col = table.find_column(field).ok_or_else(|| Error::MissingColumn {
        field: field.to_string(),
        source_name: table.source_name.clone(),
    })?;

    let mut kept = Vec::with_capacity(table.row_count());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let value = row.get(col.index).ok_or_else(|| Error::MissingField {
            field: field.to_string(),
            row: row_idx + 1,
            source_name: table.source_name.clone(),
        })?;

        if !exclusions.excludes(value) {
            kept.push(row.clone());
        }
    }

    Ok(table.with_rows(kept))
}

/// Parse `source`, drop excluded rows and write the rest to `destination`
///
/// The destination is created or overwritten. Returns the number of rows
/// written, not counting the header.
pub fn filter(
    source: &TableSource,
    destination: &Path,
    config: &PruneConfig,
    exclusions: &ExclusionSet,
) -> Result<usize> {
    filter_with_counts(source, destination, config, exclusions).map(|o| o.rows_retained)
}

/// Same as [`filter`], also reporting how many rows were read
pub fn filter_with_counts(
    source: &TableSource,
    destination: &Path,
    config: &PruneConfig,
    exclusions: &ExclusionSet,
) -> Result<FilterOutcome> {
    let table = parse_table(source, config.separators.input)?;
    let pruned = filter_table(&table, &config.pruning_field, exclusions)?;

    write_table_to_path(&pruned, destination, config.separators.output)?;

    let outcome = FilterOutcome {
        rows_read: table.row_count(),
        rows_retained: pruned.row_count(),
    };

    tracing::debug!(
        source = %source.display_name(),
        destination = %destination.display(),
        field = %config.pruning_field,
        mode = ?exclusions.mode(),
        rows_read = outcome.rows_read,
        rows_retained = outcome.rows_retained,
        "Filtered table"
    );

    Ok(outcome)
}
