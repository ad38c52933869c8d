//! Excel and OpenDocument workbooks.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use semtpl_model::{CellValue, SourceTable, Table};

use crate::csv::is_na_token;
use crate::error::{IngestError, Result};

/// File extensions read as workbooks (compared case-insensitively).
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// True when the path has a workbook extension.
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Converts one workbook data cell.
///
/// Floats without a fractional part become integers so that `1.0` in a
/// spreadsheet reads the same as `1` in a CSV file. Text cells holding an NA
/// spelling are missing, as in CSV input.
pub fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(value) if is_na_token(value) => CellValue::Missing,
        Data::String(value) => CellValue::text(value.as_str()),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => integral(*value).map_or(CellValue::Float(*value), CellValue::Int),
        Data::Bool(value) => CellValue::Bool(*value),
        other => CellValue::text(other.to_string()),
    }
}

fn integral(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

/// Header cells are kept verbatim, NA spellings included.
fn header_text(data: &Data) -> String {
    match data {
        Data::String(value) => value.clone(),
        other => cell_from_data(other).to_string(),
    }
}

/// Builds a table from a sheet range; the first row is the header.
pub fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::default();
    };
    let columns = header.iter().map(header_text).collect();
    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(row.iter().map(cell_from_data).collect());
    }
    table
}

/// Reads every sheet of a workbook, in workbook order.
///
/// Each sheet becomes one source whose hint is the sheet name.
pub fn read_workbook(path: &Path) -> Result<Vec<SourceTable>> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sources = Vec::with_capacity(sheet_names.len());
    for sheet in sheet_names {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| workbook_error(format!("sheet '{sheet}': {e}")))?;
        let table = table_from_range(&range);
        tracing::debug!(
            path = %path.display(),
            sheet = %sheet,
            columns = table.width(),
            rows = table.height(),
            "Read worksheet"
        );
        sources.push(SourceTable::new(
            format!("{file_name}#{sheet}"),
            sheet,
            table,
        ));
    }
    Ok(sources)
}
