//! pruner-core: Core library for pruning rows out of delimited tables
//!
//! This library provides functionality to:
//! - Build an exclusion set from a reference table column or pasted text
//! - Parse CSV/TSV-like tables with any single-character separator
//! - Drop rows whose pruning field is excluded, exactly or fuzzily
//! - Derive `_pruned` output names and write the survivors
//! - Run a whole batch (file, directory or text) from a JSON job file

pub mod batch;
pub mod error;
pub mod exclusion;
pub mod filter;
pub mod job;
pub mod naming;
pub mod parser;
pub mod separator;
pub mod source;
pub mod table;
pub mod writer;

pub use batch::{run_batch, scan_directory, BatchInput, BatchReport, ExclusionSource, ItemReport};
pub use error::{Error, Result};
pub use exclusion::{normalize, ExclusionSet, MatchMode};
pub use filter::{filter, filter_table, filter_with_counts, FilterOutcome, PruneConfig};
pub use job::PruneJob;
pub use naming::{pruned_path, resolve_output_destination};
pub use parser::{parse_str, parse_table};
pub use separator::{Separator, SeparatorConfig};
pub use source::TableSource;
pub use table::{Column, Row, Table};
pub use writer::{write_table, write_table_to_path};
