//! Delimited text writer

use crate::error::{Error, Result};
use crate::separator::Separator;
use crate::table::Table;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the header and every row of `table` with the given separator
///
/// Fields are quoted only when they contain the separator, a quote or a line
/// break. No row index column is added.
pub fn write_table<W: Write>(table: &Table, writer: W, separator: Separator) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(separator.as_byte())
        .flexible(true) // Rows keep the field count they were read with
        .from_writer(writer);

    csv_writer.write_record(table.header())?;
    for row in &table.rows {
        csv_writer.write_record(&row.cells)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `table` into it
///
/// The file handle is dropped on every exit path; a failed write may leave a
/// partial file behind, which is not removed.
pub fn write_table_to_path(table: &Table, path: &Path, separator: Separator) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    write_table(table, BufWriter::new(file), separator).map_err(|e| Error::Csv {
        source_name: format!("'{}'", path.display()),
        source: e,
    })
}
