use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use semtpl_core::{RejectReason, Rejection, RoutedTables};
use semtpl_map::{Classification, MIN_CATEGORY_SCORE};
use semtpl_model::Category;

use crate::types::{ConvertResult, InspectResult};

pub fn print_convert_summary(result: &ConvertResult) {
    match &result.output {
        Some(path) => println!("Wrote {} to: {}", result.format.label(), path.display()),
        None => println!("Dry run: no output written"),
    }
    println!("{}", convert_table(result));
    let routed = &result.outcome.routed;
    if !routed.rejected.is_empty() {
        println!("{}", rejected_table(&routed.rejected));
    }
}

pub fn print_inspect_report(result: &InspectResult) {
    println!("Input: {}", result.input.display());
    println!("{}", inspect_table(&result.routed));
}

/// Per-category record counts and source tables.
pub fn convert_table(result: &ConvertResult) -> Table {
    let document = &result.outcome.document;
    let routed = &result.outcome.routed;

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Records"),
        header_cell("Rows in"),
        header_cell("Sources"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    for category in Category::ALL {
        let sources: Vec<&str> = routed
            .accepted
            .iter()
            .filter(|accepted| accepted.category == category)
            .map(|accepted| accepted.source.as_str())
            .collect();
        let sources = if sources.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(sources.join("\n"))
        };
        table.add_row(vec![
            Cell::new(category.section()),
            count_cell(document.records(category).len()),
            dim_cell(routed.row_count(category)),
            sources,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(document.len()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell(format!("{} accepted", routed.accepted.len())),
    ]);
    table
}

/// Tables that were skipped and why.
pub fn rejected_table(rejected: &[Rejection]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Skipped"), header_cell("Reason")]);
    apply_table_style(&mut table);
    for rejection in rejected {
        table.add_row(vec![
            Cell::new(&rejection.source).fg(Color::Yellow),
            Cell::new(reason_text(&rejection.reason)),
        ]);
    }
    table
}

/// One row per source table with its score for every category.
pub fn inspect_table(routed: &RoutedTables) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Source"), header_cell("Hint")];
    header.extend(Category::ALL.iter().map(|category| header_cell(category.label())));
    header.push(header_cell("Result"));
    table.set_header(header);
    apply_table_style(&mut table);
    for idx in 2..6 {
        align_column(&mut table, idx, CellAlignment::Right);
    }

    for accepted in &routed.accepted {
        let mut row = vec![Cell::new(&accepted.source), Cell::new(&accepted.hint)];
        row.extend(score_cells(accepted.classification.as_ref(), Some(accepted.category)));
        let result = if accepted.classification.is_some() {
            format!("{} ({} rows)", accepted.category.section(), accepted.rows)
        } else {
            format!("{} ({} rows, by file name)", accepted.category.section(), accepted.rows)
        };
        row.push(Cell::new(result).fg(Color::Green));
        table.add_row(row);
    }
    for rejection in &routed.rejected {
        let mut row = vec![Cell::new(&rejection.source), Cell::new(&rejection.hint)];
        row.extend(score_cells(rejection.classification.as_ref(), None));
        row.push(Cell::new(reason_text(&rejection.reason)).fg(Color::Yellow));
        table.add_row(row);
    }
    table
}

fn score_cells(classification: Option<&Classification>, winner: Option<Category>) -> Vec<Cell> {
    Category::ALL
        .into_iter()
        .map(|category| {
            match classification.and_then(|classification| classification.score_for(category)) {
                Some(score) if Some(category) == winner => {
                    Cell::new(score).add_attribute(Attribute::Bold)
                }
                Some(score) => Cell::new(score),
                None => dim_cell("-"),
            }
        })
        .collect()
}

fn reason_text(reason: &RejectReason) -> String {
    match reason {
        RejectReason::Empty => "skipped: empty".to_string(),
        RejectReason::BelowThreshold { best } => {
            format!("skipped: best score {best} < {MIN_CATEGORY_SCORE}")
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
