//! Recognized-text parsing.

mod table_parser;

pub use table_parser::{parse_table, split_pipe_row};
