//! Table cleanup: cell normalization, drop-empty pass, header normalization.

use std::collections::{BTreeMap, BTreeSet};

use semtpl_model::{CellValue, Table, normalize_cell};

/// Normalizes a header to snake_case-ish form.
///
/// Trims, lowercases, and replaces each space with an underscore. An empty
/// header becomes `unnamed_<position>` (1-based).
pub fn normalize_header(raw: &str, position: usize) -> String {
    let normalized = raw.trim().to_lowercase().replace(' ', "_");
    if normalized.is_empty() {
        format!("unnamed_{position}")
    } else {
        normalized
    }
}

/// De-duplicates header names left to right.
///
/// The first occurrence keeps its name; later occurrences get `_2`, `_3`, ...
/// in order of appearance. A suffix that would collide with another header
/// in the same table is skipped.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut taken: BTreeSet<String> = headers.iter().cloned().collect();
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        let count = seen.entry(header.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            out.push(header);
            continue;
        }
        let mut candidate = format!("{header}_{count}");
        while taken.contains(&candidate) {
            *count += 1;
            candidate = format!("{header}_{count}");
        }
        taken.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

/// Normalizes and de-duplicates every header of a table.
pub fn normalize_headers(mut table: Table) -> Table {
    let headers = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, raw)| normalize_header(raw, idx + 1))
        .collect();
    table.columns = dedupe_headers(headers);
    table
}

/// Runs every cell through [`normalize_cell`]; absent cells become `Missing`.
pub fn normalize_cells(mut table: Table) -> Table {
    for row in &mut table.rows {
        for cell in row.iter_mut() {
            let value = std::mem::replace(cell, CellValue::Missing);
            if let Some(normalized) = normalize_cell(value) {
                *cell = normalized;
            }
        }
    }
    table
}

/// Removes columns whose cells are all missing, then rows that are all
/// missing across the remaining columns.
pub fn drop_empty(mut table: Table) -> Table {
    if table.is_empty() {
        return table;
    }
    let keep: Vec<bool> = (0..table.width())
        .map(|idx| {
            table
                .rows
                .iter()
                .any(|row| row.get(idx).is_some_and(|cell| !cell.is_missing()))
        })
        .collect();
    if keep.iter().any(|kept| !kept) {
        tracing::trace!(
            dropped = keep.iter().filter(|kept| !**kept).count(),
            "Dropping empty columns"
        );
        table.columns = table
            .columns
            .into_iter()
            .zip(&keep)
            .filter_map(|(column, kept)| kept.then_some(column))
            .collect();
        for row in &mut table.rows {
            let cells = std::mem::take(row);
            *row = cells
                .into_iter()
                .zip(&keep)
                .filter_map(|(cell, kept)| kept.then_some(cell))
                .collect();
        }
    }
    table
        .rows
        .retain(|row| row.iter().any(|cell| !cell.is_missing()));
    table
}

/// Full cleanup applied to every source table before classification.
pub fn clean_table(table: Table) -> Table {
    normalize_headers(drop_empty(normalize_cells(table)))
}
