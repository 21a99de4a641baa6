//! Remove one section from the resource file without rewriting the others
//!
//! The file is cut at token boundaries, so every byte outside the removed
//! section is written back untouched (comments, spacing and key order of
//! the other sections included).

use std::fs;
use std::ops::Range;
use std::path::Path;
use tracing::info;

use crate::error::StoreError;
use crate::keyfile::{LineKind, tokenize};
use crate::store::read_text;

/// Byte spans of every `[section]` block, in file order
///
/// A block runs from its header line up to the next header or EOF. Repeated
/// headers yield one span each, matching the parser, which merges them.
pub fn section_spans(text: &str, section: &str) -> Vec<Range<usize>> {
    let lines = tokenize(text);
    let mut spans = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if line.kind != LineKind::Group(section) {
            continue;
        }
        let end = lines[idx + 1..]
            .iter()
            .find(|line| line.starts_group())
            .map(|line| line.span.start)
            .unwrap_or(text.len());
        spans.push(line.span.start..end);
    }
    spans
}

/// Excise every `[section]` block from the file at `path`
///
/// Fails with [`StoreError::NotFound`] (file left as is) when no such
/// header exists.
pub fn erase(path: &Path, section: &str) -> Result<(), StoreError> {
    let text = read_text(path)?;

    let spans = section_spans(&text, section);
    if spans.is_empty() {
        return Err(StoreError::not_found(section));
    }

    let removed: usize = spans.iter().map(|span| span.len()).sum();
    let mut out = String::with_capacity(text.len() - removed);
    let mut kept_from = 0;
    for span in &spans {
        out.push_str(&text[kept_from..span.start]);
        kept_from = span.end;
    }
    out.push_str(&text[kept_from..]);

    fs::write(path, out).map_err(|e| StoreError::io(path, e))?;
    info!(
        path = %path.display(),
        section = %section,
        blocks = spans.len(),
        removed_bytes = removed,
        "Removed section"
    );
    Ok(())
}
