//! Output assembly and the file sink.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Join the substituted body and a rendered table in page order.
///
/// Without a table the body is returned unchanged. With one, a non-empty
/// body is closed by a blank line before the table starts.
pub fn assemble(body: &str, table: Option<&str>) -> String {
    let Some(table) = table else {
        return body.to_string();
    };

    let mut output = String::with_capacity(body.len() + table.len() + 2);
    output.push_str(body);
    if !output.is_empty() {
        if !output.ends_with('\n') {
            output.push('\n');
        }
        if !output.ends_with("\n\n") {
            output.push('\n');
        }
    }
    output.push_str(table);
    output
}

/// Write assembled output to `path` in a single write.
pub fn write_document<P: AsRef<Path>>(content: &str, path: P) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Write assembled output to `path` without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn write_document_async<P: AsRef<Path>>(content: &str, path: P) -> Result<()> {
    tokio::fs::write(path, content.as_bytes()).await?;
    Ok(())
}
