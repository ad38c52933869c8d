//! Input discovery: template folders, workbooks, and single CSV files.

use std::path::{Path, PathBuf};

use semtpl_model::{Category, SourceTable};

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};
use crate::workbook::{is_workbook, read_workbook};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Loads a template folder.
///
/// Only `cubes.csv`, `joins.csv`, `dimensions.csv` and `measures.csv` are
/// read (file names compared case-insensitively), each pinned to its
/// category. Sources come back in category order; other files are ignored.
pub fn load_directory(dir: &Path) -> Result<Vec<SourceTable>> {
    let files = list_csv_files(dir)?;
    let mut sources = Vec::new();

    for category in Category::ALL {
        let expected = category.fixed_file_name();
        let Some(path) = files.iter().find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.eq_ignore_ascii_case(expected))
        }) else {
            tracing::debug!(dir = %dir.display(), file = expected, "Template file not present");
            continue;
        };

        let table = read_csv_table(path)?;
        sources.push(SourceTable::new(expected, category.section(), table).with_category(category));
    }

    let ignored = files.len() - sources.len();
    if ignored > 0 {
        tracing::debug!(dir = %dir.display(), ignored, "Ignored CSV files with other names");
    }
    Ok(sources)
}

/// Loads every source table found at `path`.
///
/// - a directory is read as a template folder ([`load_directory`]);
/// - a workbook yields one source per sheet;
/// - any other file is read as CSV with its stem as hint.
pub fn load_sources(path: &Path) -> Result<Vec<SourceTable>> {
    if !path.exists() {
        return Err(IngestError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let sources = if path.is_dir() {
        load_directory(path)?
    } else if is_workbook(path) {
        read_workbook(path)?
    } else {
        let table = read_csv_table(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let hint = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        vec![SourceTable::new(name, hint, table)]
    };

    tracing::info!(path = %path.display(), tables = sources.len(), "Loaded input");
    Ok(sources)
}
