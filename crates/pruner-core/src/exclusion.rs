//! Exclusion sets and the comparison keys rows are matched with
//!
//! An exclusion set is built once per run, either from one column of a
//! reference table or from free text, and is immutable afterwards. Fuzzy
//! mode stores every member normalized so lookups never mix forms.

use crate::error::{Error, Result};
use crate::parser::parse_table;
use crate::separator::Separator;
use crate::source::TableSource;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

/// Characters deleted by fuzzy normalization
pub const FUZZY_STRIPPED: &[char] = &['-', ' ', '_', '.', '/', '\\'];

/// How cell values are compared against the exclusion set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Raw cell text must equal a member
    #[default]
    Exact,
    /// Case-folded text with separator characters removed must equal a member
    Fuzzy,
}

impl MatchMode {
    /// Comparison key for a value under this mode
    pub fn key<'a>(self, value: &'a str) -> Cow<'a, str> {
        match self {
            MatchMode::Exact => Cow::Borrowed(value),
            MatchMode::Fuzzy => Cow::Owned(normalize(value)),
        }
    }
}

/// Case-fold `value` and delete every `-`, space, `_`, `.`, `/` and `\`
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !FUZZY_STRIPPED.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The set of values that cause a row to be dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    values: HashSet<String>,
    mode: MatchMode,
}

impl ExclusionSet {
    /// Build an exact-mode set from raw values
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            mode: MatchMode::Exact,
        }
    }

    /// Collect the distinct values of `column` from a delimited source
    ///
    /// Empty cells contribute the empty string. Rows too short to reach the
    /// column contribute nothing.
    pub fn from_delimited_source(
        source: &TableSource,
        column: &str,
        separator: Separator,
    ) -> Result<Self> {
        let table = parse_table(source, separator)?;
        let col = table.find_column(column).ok_or_else(|| Error::MissingColumn {
            field: column.to_string(),
            source_name: source.display_name(),
        })?;

        let set = Self::from_values(table.rows.iter().filter_map(|r| r.get(col.index)));

        tracing::debug!(
            source = %source.display_name(),
            column,
            values = set.len(),
            "Built exclusion set from table"
        );

        Ok(set)
    }

    /// Build a set from pasted text
    ///
    /// Several lines are taken one value per line, verbatim. A single line
    /// is split on commas instead, so `a,b,c` yields three values.
    pub fn from_free_text(text: &str) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let set = match lines.as_slice() {
            [line] => Self::from_values(line.split(',')),
            _ => Self::from_values(lines),
        };

        tracing::debug!(values = set.len(), "Built exclusion set from text");
        set
    }

    /// Normalize every member, switching the set to fuzzy mode
    pub fn apply_fuzzy_normalization(self) -> Self {
        if self.mode == MatchMode::Fuzzy {
            return self;
        }

        Self {
            values: self.values.iter().map(|v| normalize(v)).collect(),
            mode: MatchMode::Fuzzy,
        }
    }

    /// The mode rows must be keyed with when tested against this set
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether a raw cell value is excluded under this set's mode
    pub fn excludes(&self, value: &str) -> bool {
        self.values.contains(&*self.mode.key(value))
    }

    /// Whether `key` is a member, with no normalization applied
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(set: &ExclusionSet) -> Vec<&str> {
        let mut v: Vec<&str> = set.iter().collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_free_text_single_line_splits_on_commas() {
        let set = ExclusionSet::from_free_text("a,b,c");
        assert_eq!(members(&set), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_free_text_lines() {
        let set = ExclusionSet::from_free_text("a\nb\nc");
        assert_eq!(members(&set), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_free_text_multi_line_keeps_commas() {
        let set = ExclusionSet::from_free_text("a,b\nc,d");
        assert_eq!(members(&set), vec!["a,b", "c,d"]);
    }

    #[test]
    fn test_free_text_single_value_without_commas() {
        let set = ExclusionSet::from_free_text("Apis mellifera");
        assert_eq!(members(&set), vec!["Apis mellifera"]);
    }

    #[test]
    fn test_free_text_empty_lines_and_duplicates() {
        let set = ExclusionSet::from_free_text("a\n\na\n b\n");
        assert_eq!(members(&set), vec!["", " b", "a"]);
        assert!(set.contains(""));
    }

    #[test]
    fn test_free_text_empty_input() {
        let set = ExclusionSet::from_free_text("");
        assert_eq!(members(&set), vec![""]);
    }

    #[test]
    fn test_normalize_strips_separators_and_case() {
        assert_eq!(normalize("Ab-Cd"), "abcd");
        for variant in ["ab_cd", "ab.cd", "ab/cd", "ab\\cd", "ab  cd", "AB - cd"] {
            assert_eq!(normalize(variant), "abcd", "variant {:?}", variant);
        }
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in ["", "Ab-Cd", "x__Y..z", "ÉTÉ / été", "İstanbul", "ẞ-street"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {:?}", s);
        }
    }

    #[test]
    fn test_fuzzy_set_matches_variants() {
        let set = ExclusionSet::from_free_text("Ab-Cd").apply_fuzzy_normalization();

        assert_eq!(set.mode(), MatchMode::Fuzzy);
        assert_eq!(members(&set), vec!["abcd"]);
        assert!(set.excludes("abcd"));
        assert!(set.excludes("AB_CD"));
        assert!(set.excludes("ab.cd"));
        assert!(!set.excludes("abce"));
    }

    #[test]
    fn test_fuzzy_normalization_collapses_members() {
        let set = ExclusionSet::from_values(["A-1", "a_1", "a1"]).apply_fuzzy_normalization();
        assert_eq!(set.len(), 1);

        let again = set.clone().apply_fuzzy_normalization();
        assert_eq!(again, set);
    }

    #[test]
    fn test_exact_mode_is_case_sensitive() {
        let set = ExclusionSet::from_values(["abcd"]);
        assert!(set.excludes("abcd"));
        assert!(!set.excludes("ABCD"));
        assert!(!set.excludes("ab-cd"));
    }

    #[test]
    fn test_from_delimited_source() {
        let source = TableSource::named_text(
            "specimenid\tspecies\n1\tApis\n2\tBombus\n3\tApis\n4\t\n",
            "prune.tsv",
        );
        let set = ExclusionSet::from_delimited_source(&source, "species", Separator::TAB).unwrap();

        assert_eq!(set.mode(), MatchMode::Exact);
        assert_eq!(members(&set), vec!["", "Apis", "Bombus"]);
    }

    #[test]
    fn test_from_delimited_source_missing_column() {
        let source = TableSource::named_text("specimenid,species\n1,Apis\n", "prune.csv");
        let err =
            ExclusionSet::from_delimited_source(&source, "locality", Separator::COMMA).unwrap_err();

        match &err {
            Error::MissingColumn { field, source_name } => {
                assert_eq!(field, "locality");
                assert_eq!(source_name, "'prune.csv'");
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("locality"));
        assert!(message.contains("prune.csv"));
    }

    #[test]
    fn test_from_delimited_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prune.csv");
        std::fs::write(&path, "voucher;species\nV-1;Apis\nV-2;Bombus\n").unwrap();

        let set = ExclusionSet::from_delimited_source(
            &TableSource::file(&path),
            "voucher",
            Separator::SEMICOLON,
        )
        .unwrap();
        assert_eq!(members(&set), vec!["V-1", "V-2"]);
    }
}
