//! Rendering module for converting documents to output formats.

mod json;
mod markdown;
mod options;

pub use json::{to_json, JsonFormat};
pub use markdown::{render_table, to_markdown, MarkdownRenderer};
pub use options::{RenderOptions, TableFormat};
