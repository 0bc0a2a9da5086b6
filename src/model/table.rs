//! Table types.

use serde::{Deserialize, Serialize};

/// A grid of text cells. Row 0 is the header row.
///
/// Rows may hold different numbers of cells; see [`Table::padded`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a table from nested string rows.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(TableRow::from_strings).collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on the header row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Width of the widest row.
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if every row has the header's cell count.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|r| r.cells.len() == width)
    }

    /// Get the header row.
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    /// Get body rows (everything after the header).
    pub fn body(&self) -> &[TableRow] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Copy of the table with every row padded by empty cells to the widest row.
    pub fn padded(&self) -> Table {
        let width = self.max_width();
        Table {
            rows: self
                .rows
                .iter()
                .map(|row| {
                    let mut cells = row.cells.clone();
                    cells.resize(width, String::new());
                    TableRow::new(cells)
                })
                .collect(),
        }
    }

    /// Cell contents as nested vectors.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|r| r.cells.clone()).collect()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<String>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(Into::into).collect())
    }

    /// Check if every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells.join("\t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert!(table.header().is_none());
        assert!(table.body().is_empty());
    }

    #[test]
    fn test_table_with_data() {
        let table = Table::from_rows([["Name", "Age"], ["Alice", "30"], ["Bob", "25"]]);

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.header().unwrap().cells, vec!["Name", "Age"]);
        assert_eq!(table.body().len(), 2);
        assert!(table.is_rectangular());
    }

    #[test]
    fn test_padded_ragged_rows() {
        let table = Table::from_rows(vec![vec!["a", "b"], vec!["c"], vec!["d", "e", "f"]]);
        assert!(!table.is_rectangular());
        assert_eq!(table.max_width(), 3);

        let padded = table.padded();
        assert!(padded.is_rectangular());
        assert_eq!(
            padded.to_grid(),
            vec![
                vec!["a", "b", ""],
                vec!["c", "", ""],
                vec!["d", "e", "f"],
            ]
        );
    }

    #[test]
    fn test_row_blank() {
        assert!(TableRow::from_strings(["", " "]).is_blank());
        assert!(!TableRow::from_strings(["", "x"]).is_blank());
    }
}
