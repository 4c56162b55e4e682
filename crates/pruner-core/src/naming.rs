//! Output naming policy, kept free of I/O

use crate::source::TableSource;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix inserted before the extension of pruned files
pub const PRUNED_SUFFIX: &str = "_pruned";

/// Where the pruned copy of `source` should be written
///
/// File sources get `<stem>_pruned<.ext>` next to the original; sources
/// without a file identity (pasted text) go to `fallback`.
pub fn resolve_output_destination(source: &TableSource, fallback: &Path) -> PathBuf {
    match source.path() {
        Some(path) => pruned_path(path),
        None => fallback.to_path_buf(),
    }
}

/// Insert `_pruned` before the last extension of `path`
///
/// Examples:
/// - "data.csv" -> "data_pruned.csv"
/// - "dir/a.tar.gz" -> "dir/a.tar_pruned.gz"
/// - "README" -> "README_pruned"
/// - ".hidden" -> ".hidden_pruned"
pub fn pruned_path(path: &Path) -> PathBuf {
    let Some(stem) = path.file_stem() else {
        // No file name component ("", "..", "/"); append to the whole path
        let mut name = path.as_os_str().to_os_string();
        name.push(PRUNED_SUFFIX);
        return PathBuf::from(name);
    };

    let mut name = OsString::from(stem);
    name.push(PRUNED_SUFFIX);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}
