//! Markdown rendering for converted documents.

use crate::convert::assemble;
use crate::error::Result;
use crate::model::{Document, Table};

use super::{RenderOptions, TableFormat};

/// Narrowest column, so the separator row always holds `---`.
const MIN_COLUMN_WIDTH: usize = 3;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Render a table in the requested format.
///
/// Row 0 is the header. Ragged rows are padded with empty cells to the
/// widest row; nothing is truncated. An empty table renders as an empty
/// string.
pub fn render_table(table: &Table, format: TableFormat) -> String {
    if table.is_empty() || table.max_width() == 0 {
        return String::new();
    }
    let table = table.padded();
    match format {
        TableFormat::Markdown => render_table_markdown(&table),
        TableFormat::Html => render_table_html(&table),
    }
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document: body text first, then its table.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
        }

        let table = doc
            .table()
            .map(|t| render_table(t, self.options.table_format))
            .filter(|t| !t.is_empty());
        output.push_str(&assemble(&doc.body, table.as_deref()));

        Ok(output)
    }
}

fn render_table_markdown(table: &Table) -> String {
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|c| escape_cell(c)).collect())
        .collect();
    let column_count = table.max_width();

    let widths: Vec<usize> = (0..column_count)
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();
    let numeric: Vec<bool> = (0..column_count)
        .map(|col| is_numeric_column(&rows[1..], col))
        .collect();

    let mut output = String::new();
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let width = widths[col];
                if numeric[col] && i > 0 {
                    format!("{:>width$}", cell)
                } else {
                    format!("{:<width$}", cell)
                }
            })
            .collect();
        output.push_str(&format!("| {} |\n", cells.join(" | ")));

        // Separator after header row
        if i == 0 {
            let markers: Vec<String> = (0..column_count)
                .map(|col| {
                    if numeric[col] {
                        format!("{}:", "-".repeat(widths[col] - 1))
                    } else {
                        "-".repeat(widths[col])
                    }
                })
                .collect();
            output.push_str(&format!("| {} |\n", markers.join(" | ")));
        }
    }

    output
}

fn render_table_html(table: &Table) -> String {
    let mut output = String::from("<table>\n");

    if let Some(header) = table.header() {
        output.push_str("<thead>\n");
        render_html_row(&mut output, &header.cells, "th");
        output.push_str("</thead>\n");
    }

    output.push_str("<tbody>\n");
    for row in table.body() {
        render_html_row(&mut output, &row.cells, "td");
    }
    output.push_str("</tbody>\n");

    output.push_str("</table>\n");
    output
}

fn render_html_row(output: &mut String, cells: &[String], tag: &str) {
    output.push_str("<tr>");
    for cell in cells {
        output.push_str(&format!("<{}>{}</{}>", tag, escape_html(cell), tag));
    }
    output.push_str("</tr>\n");
}

/// Right-align a body column when all its non-empty cells are numbers.
fn is_numeric_column(body: &[Vec<String>], col: usize) -> bool {
    let mut values = body
        .iter()
        .map(|row| row[col].as_str())
        .filter(|c| !c.is_empty())
        .peekable();
    values.peek().is_some() && values.all(|c| c.replace(',', "").parse::<f64>().is_ok())
}

/// Keep cell text on one line and protect column delimiters.
fn escape_cell(text: &str) -> String {
    text.replace('\n', " ").replace('|', "\\|")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Headings, Metadata, RecognizedText, Region, TableSection};
    use crate::parser::parse_table;

    fn people() -> Table {
        Table::from_rows([["Name", "Age"], ["Ann", "30"], ["Bo", "25"]])
    }

    fn document(body: &str, table: TableSection) -> Document {
        Document::new(Metadata::default(), body.to_string(), Headings::new(), table)
    }

    #[test]
    fn test_render_pipe_table() {
        let markdown = render_table(&people(), TableFormat::Markdown);
        assert_eq!(
            markdown,
            "| Name | Age |\n| ---- | --: |\n| Ann  |  30 |\n| Bo   |  25 |\n"
        );
    }

    #[test]
    fn test_render_then_parse_round_trip() {
        let table = people();
        let markdown = render_table(&table, TableFormat::Markdown);
        let parsed = parse_table(&RecognizedText::from(markdown));
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_round_trip_with_pipes_in_cells() {
        let table = Table::from_rows([["a|b", "c"], ["1", "x|"]]);
        let markdown = render_table(&table, TableFormat::Markdown);
        assert_eq!(parse_table(&RecognizedText::from(markdown)), table);
    }

    #[test]
    fn test_ragged_rows_padded() {
        let table = Table::from_rows(vec![vec!["A", "B"], vec!["x"], vec!["y", "z", "w"]]);
        let markdown = render_table(&table, TableFormat::Markdown);
        let lines: Vec<_> = markdown.lines().collect();
        assert_eq!(lines[0], "| A   | B   |     |");
        assert_eq!(lines[2], "| x   |     |     |");
        assert_eq!(lines[3], "| y   | z   | w   |");
    }

    #[test]
    fn test_header_only_table() {
        let table = Table::from_rows([["Only", "Header"]]);
        let markdown = render_table(&table, TableFormat::Markdown);
        assert_eq!(markdown, "| Only | Header |\n| ---- | ------ |\n");
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        assert_eq!(render_table(&Table::new(), TableFormat::Markdown), "");
        assert_eq!(render_table(&Table::new(), TableFormat::Html), "");
    }

    #[test]
    fn test_render_html_table() {
        let table = Table::from_rows([["A<", "B"], ["1", "2"]]);
        let html = render_table(&table, TableFormat::Html);
        assert!(html.starts_with("<table>\n<thead>\n<tr><th>A&lt;</th><th>B</th></tr>"));
        assert!(html.contains("<tbody>\n<tr><td>1</td><td>2</td></tr>\n</tbody>"));
    }

    #[test]
    fn test_document_without_table_is_body() {
        let doc = document("# Title <br>\nbody text\n", TableSection::NotFound);
        let markdown = to_markdown(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(markdown, "# Title <br>\nbody text\n");
    }

    #[test]
    fn test_document_body_then_table() {
        let doc = document(
            "body",
            TableSection::Found {
                region: Region::new(0, 0, 10, 10),
                table: people(),
            },
        );
        let markdown = to_markdown(&doc, &RenderOptions::default()).unwrap();
        assert!(markdown.starts_with("body\n\n| Name | Age |\n"));
    }

    #[test]
    fn test_render_with_frontmatter() {
        let mut doc = document("text", TableSection::NotFound);
        doc.metadata.source = Some("scan.png".to_string());

        let options = RenderOptions::new().with_frontmatter(true);
        let markdown = to_markdown(&doc, &options).unwrap();
        assert!(markdown.starts_with("---\nsource: \"scan.png\""));
        assert!(markdown.ends_with("---\ntext"));
    }
}
