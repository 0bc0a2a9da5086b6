//! Rendering options and configuration.

/// Options for rendering a converted document.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// How the table section is written
    pub table_format: TableFormat,

    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table format.
    pub fn with_table_format(mut self, format: TableFormat) -> Self {
        self.table_format = format;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }
}

/// Output syntax for tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Pipe-delimited Markdown table with a header separator row
    #[default]
    Markdown,
    /// HTML `<table>` markup
    Html,
}
