//! CSV file reading.

use std::path::Path;

use semtpl_model::{CellValue, Table};

use crate::error::{IngestError, Result};

use super::decode::{decode_bytes, sniff_delimiter};

/// Data cells read as missing, matched exactly.
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True for empty fields and the NA spellings in [`NA_TOKENS`].
pub fn is_na_token(field: &str) -> bool {
    field.is_empty() || NA_TOKENS.contains(&field)
}

fn data_cell(field: &str) -> CellValue {
    if is_na_token(field) {
        CellValue::Missing
    } else {
        CellValue::text(field)
    }
}

/// Parses CSV text into a table.
///
/// The first record is the header row. Header text is kept verbatim; data
/// cells are all [`CellValue::Text`] except empty and NA-like fields, which
/// are [`CellValue::Missing`]. Short rows are padded and long rows truncated.
pub fn parse_csv_text(text: &str, path: &Path) -> Result<Table> {
    let delimiter = sniff_delimiter(text);
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let Some(header) = records.next() else {
        return Ok(Table::default());
    };
    let header = header.map_err(|source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    })?;
    let mut table = Table::new(header.iter().map(str::to_string).collect());

    let mut ragged = 0usize;
    for record in records {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        if record.len() != table.width() {
            ragged += 1;
        }
        table.push_row(record.iter().map(data_cell).collect());
    }

    if ragged > 0 {
        tracing::debug!(
            path = %path.display(),
            rows = ragged,
            "Padded or truncated ragged CSV rows"
        );
    }
    tracing::debug!(
        path = %path.display(),
        delimiter = %char::from(delimiter).escape_default(),
        columns = table.width(),
        rows = table.height(),
        "Read CSV table"
    );
    Ok(table)
}

/// Reads a CSV file from disk.
pub fn read_csv_table(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::file_read(path, e))?;
    let text = decode_bytes(&bytes);
    parse_csv_text(&text, path)
}
