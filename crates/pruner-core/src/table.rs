//! Core table types for representing delimited data

/// A parsed table held fully in memory
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column definitions, in header order
    pub columns: Vec<Column>,
    /// Data rows, in file order
    pub rows: Vec<Row>,
    /// Identity of the source the table came from
    pub source_name: String,
}

impl Table {
    /// Create a new empty table
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            source_name: source_name.into(),
        }
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column by exact, case-sensitive name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Header names in order
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Copy of this table's header with a new set of rows
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
            source_name: self.source_name.clone(),
        }
    }
}

/// A column definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name as written in the header
    pub name: String,
    /// Column index (0-based)
    pub index: usize,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, index: usize) -> Self {
        Self { name, index }
    }
}

/// A row of raw cell text
///
/// Rows keep the field count they were read with; a short row is not padded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(Into::into).collect())
    }
}
