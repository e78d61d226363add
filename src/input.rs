//! Heading discovery with tree-sitter, used by the rendered (reading) view.
//!
//! The rendered view works like a post-processor: the document is parsed once, and every heading
//! node the grammar finds becomes a heading element that remembers the source line it starts on.
//! That line is what section commands are later invoked with.

use crate::error::{Error, Result};
use crate::formats::Format;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A heading found by the grammar.
pub struct HeadingNode {
    /// Source line the heading starts on.
    pub line: usize,
    /// Marker length (`#` count).
    pub level: usize,
    /// Heading text without markers, trimmed.
    pub title: String,
}

/// Parses `source` and returns its headings in document order.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded, the query does not compile, or the parser
/// gives up on the input.
pub fn extract_headings(source: &str, format: &dyn Format) -> Result<Vec<HeadingNode>> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser.parse(source, None).ok_or(Error::Parse)?;

    let query = Query::new(&language, format.heading_query())?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

    let mut headings = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            headings.push(heading_node(capture.node, source.as_bytes()));
        }
    }
    headings.sort_by_key(|h| h.line);
    headings.dedup_by_key(|h| h.line);

    tracing::trace!(count = headings.len(), "extracted headings");
    Ok(headings)
}

fn heading_node(node: Node, bytes: &[u8]) -> HeadingNode {
    let mut level = 0;
    let mut title = String::new();

    let mut walker = node.walk();
    for child in node.children(&mut walker) {
        let kind = child.kind();
        if kind.starts_with("atx_h") && kind.ends_with("_marker") {
            level = child.utf8_text(bytes).map_or(0, |t| t.trim().len());
        } else if kind == "inline" {
            title = child.utf8_text(bytes).unwrap_or_default().trim().to_string();
        }
    }

    HeadingNode {
        line: node.start_position().row,
        level,
        title,
    }
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
