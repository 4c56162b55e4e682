//! Delimited text parser

use crate::error::{Error, Result};
use crate::separator::Separator;
use crate::source::TableSource;
use crate::table::{Column, Row, Table};

/// Parse a source into a Table using the given separator
///
/// The source is read fully into memory; undecodable bytes are replaced
/// rather than rejected.
pub fn parse_table(source: &TableSource, separator: Separator) -> Result<Table> {
    let content = source.read_text()?;
    parse_str(&content, separator, &source.display_name())
}

/// Parse delimited text held in memory
pub fn parse_str(content: &str, separator: Separator, source_name: &str) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(separator.as_byte())
        .flexible(true) // Allow varying number of fields
        .from_reader(content.as_bytes());

    let csv_error = |e: csv::Error| Error::Csv {
        source_name: source_name.to_string(),
        source: e,
    };

    // Parse headers into columns
    let headers = csv_reader.headers().map_err(csv_error)?;

    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(name.to_string(), i))
        .collect();

    if columns.is_empty() {
        return Err(Error::EmptyTable(source_name.to_string()));
    }

    // Parse rows
    let mut rows = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(csv_error)?;

        if record.len() > columns.len() {
            tracing::debug!(
                source = source_name,
                row = row_idx + 1,
                fields = record.len(),
                columns = columns.len(),
                "Row has more fields than the header"
            );
        }

        rows.push(record.iter().collect::<Row>());
    }

    tracing::debug!(
        source = source_name,
        columns = columns.len(),
        rows = rows.len(),
        separator = %separator,
        "Parsed table"
    );

    Ok(Table {
        columns,
        rows,
        source_name: source_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_tsv() {
        let tsv = "specimenid\tspecies\tlocality\n1\tApis\tParis\n2\tBombus\tLyon\n";
        let table = parse_str(tsv, Separator::TAB, "test.tsv").unwrap();

        assert_eq!(table.header(), vec!["specimenid", "species", "locality"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1].get(1), Some("Bombus"));
    }

    #[test]
    fn test_parse_semicolon_with_quotes() {
        let csv = "id;note\n1;\"a;b\"\n2;\"say \"\"hi\"\"\"\n";
        let table = parse_str(csv, Separator::SEMICOLON, "test.csv").unwrap();

        assert_eq!(table.rows[0].get(1), Some("a;b"));
        assert_eq!(table.rows[1].get(1), Some("say \"hi\""));
    }

    #[test]
    fn test_parse_keeps_raw_cell_text() {
        let csv = "id,name\n007, padded \n";
        let table = parse_str(csv, Separator::COMMA, "test.csv").unwrap();

        assert_eq!(table.rows[0].get(0), Some("007"));
        assert_eq!(table.rows[0].get(1), Some(" padded "));
    }

    #[test]
    fn test_parse_ragged_rows_unpadded() {
        let csv = "a,b,c\n1\n1,2,3,4\n";
        let table = parse_str(csv, Separator::COMMA, "test.csv").unwrap();

        assert_eq!(table.rows[0].cells.len(), 1);
        assert_eq!(table.rows[1].cells.len(), 4);
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let csv = "id,name\r\n1,x\r\n";
        let table = parse_str(csv, Separator::COMMA, "test.csv").unwrap();

        assert_eq!(table.header(), vec!["id", "name"]);
        assert_eq!(table.rows[0].get(1), Some("x"));
    }

    #[test]
    fn test_parse_empty_input() {
        let err = parse_str("", Separator::TAB, "empty.tsv").unwrap_err();
        assert!(matches!(err, Error::EmptyTable(_)));
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse_str("id\tname\n", Separator::TAB, "test.tsv").unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
    }
}
