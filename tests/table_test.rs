//! Integration tests for table parsing, rendering and substitution.

use unscan::render::render_table;
use unscan::substitute::{Substitution, SubstringSubstitution, TokenSubstitution};
use unscan::{parse_table, RecognizedText, SubstitutionMode, Table, TableFormat};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ==================== Round Trip ====================

#[test]
fn test_people_table_round_trip() {
    let table = Table::from_rows([["Name", "Age"], ["Ann", "30"], ["Bo", "25"]]);
    let rendered = render_table(&table, TableFormat::Markdown);
    assert_eq!(parse_table(&RecognizedText::from(rendered)), table);
}

#[test]
fn test_wide_table_round_trip() {
    let table = Table::from_rows([
        ["Item", "Qty", "Price", "Note"],
        ["bolt", "120", "0.25", "zinc"],
        ["nut", "1,400", "0.05", "-"],
        ["washer", "8", "0.02", "steel"],
    ]);
    let rendered = render_table(&table, TableFormat::Markdown);
    assert_eq!(parse_table(&RecognizedText::from(rendered)), table);
}

#[test]
fn test_multi_word_cells_survive_pipe_round_trip() {
    let table = Table::from_rows([["City", "Country"], ["New York", "United States"]]);
    let rendered = render_table(&table, TableFormat::Markdown);
    assert_eq!(parse_table(&RecognizedText::from(rendered)), table);
}

#[test]
fn test_dash_only_data_row_round_trip() {
    let table = Table::from_rows([["Name", "Score"], ["Ann", "30"], ["-", "--"]]);
    let rendered = render_table(&table, TableFormat::Markdown);
    assert_eq!(parse_table(&RecognizedText::from(rendered)), table);
}

#[test]
fn test_whitespace_table_renders_with_header() {
    let table = parse_table(&RecognizedText::from("Col1 Col2\nx y\n\n"));
    let rendered = render_table(&table, TableFormat::Markdown);
    assert_eq!(
        rendered,
        "| Col1 | Col2 |\n| ---- | ---- |\n| x    | y    |\n"
    );
}

#[test]
fn test_ragged_rows_keep_every_cell() {
    let table = parse_table(&RecognizedText::from("A B\nq r s t\nu"));
    let rendered = render_table(&table, TableFormat::Markdown);
    assert!(rendered.starts_with("| A   | B   |     |     |\n"));
    assert!(rendered.contains("| q   | r   | s   | t   |\n"));
    assert!(rendered.ends_with("| u   |     |     |     |\n"));
}

// ==================== Substitution ====================

#[test]
fn test_substitution_identity_without_matches() {
    let body = "nothing\n  to   see here\n";
    let matches = strings(&["absent"]);
    let replacements = strings(&["# absent <br>"]);
    for mode in [SubstitutionMode::Token, SubstitutionMode::Substring] {
        assert_eq!(mode.apply(body, &matches, &replacements).unwrap(), body);
    }
}

#[test]
fn test_substitution_is_deterministic() {
    let body = "Intro\nIntro text Intro";
    let matches = strings(&["Intro", "text"]);
    let replacements = strings(&["# Intro <br>", "# text <br>"]);
    for mode in [SubstitutionMode::Token, SubstitutionMode::Substring] {
        let first = mode.apply(body, &matches, &replacements).unwrap();
        let second = mode.apply(body, &matches, &replacements).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_strategies_disagree_inside_words() {
    let body = "Title Titles";
    let matches = strings(&["Title"]);
    let replacements = strings(&["# Title <br>"]);

    assert_eq!(
        TokenSubstitution.apply(body, &matches, &replacements).unwrap(),
        "# Title <br> Titles"
    );
    assert_eq!(
        SubstringSubstitution
            .apply(body, &matches, &replacements)
            .unwrap(),
        "# Title <br> # Title <br>s"
    );
}

#[test]
fn test_report_scenario() {
    let out = TokenSubstitution
        .apply(
            "Report Title content",
            &strings(&["Report"]),
            &strings(&["# Report <br>"]),
        )
        .unwrap();
    assert_eq!(out, "# Report <br> Title content");
}
