//! Table text parsing.
//!
//! Turns the recognized text of a table region into a cell grid. Plain
//! lines are split on whitespace runs, which cannot recover cells with
//! internal spaces (`New York` becomes two cells). Lines that start with
//! `|` are read as pipe-table rows instead, so rendered markdown tables
//! parse back to the grid they came from.

use crate::model::{RecognizedText, Table, TableRow};

/// Parse recognized table text into rows of cells.
///
/// Blank lines are dropped and line order is kept. Row 0 is the header.
/// Rows may differ in length. A dash separator is skipped only on the line
/// right after a pipe header; anywhere else it is a data row.
pub fn parse_table(text: &RecognizedText) -> Table {
    let mut table = Table::new();
    let mut after_pipe_header = false;

    for line in text.non_blank_lines() {
        let line = line.trim();
        let expect_separator = std::mem::take(&mut after_pipe_header);
        let row = if line.starts_with('|') {
            let cells = split_pipe_row(line);
            if expect_separator && is_separator_row(&cells) {
                continue;
            }
            after_pipe_header = table.is_empty();
            TableRow::new(cells)
        } else {
            TableRow::from_strings(line.split_whitespace())
        };

        if !row.is_blank() {
            table.add_row(row);
        } else {
            after_pipe_header = false;
        }
    }

    log::debug!(
        "parsed table: {} rows, header width {}",
        table.row_count(),
        table.column_count()
    );
    table
}

/// Split a pipe-table row into trimmed cells.
///
/// Outer pipes are optional and `\|` stands for a literal pipe.
pub fn split_pipe_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = match line.strip_suffix('|') {
        Some(inner) if !inner.ends_with('\\') => inner,
        _ => line,
    };

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

/// Header separator such as `| --- | :---: | ---: |`.
fn is_separator_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| {
        cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':' || c == ' ')
    })
}
