//! Markdown format implementation using tree-sitter-md.
//!
//! Only ATX-style headings (# syntax) are captured; setext underlines are not sections.

use crate::formats::Format;

/// Tree-sitter query for ATX-style markdown headings (# syntax).
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }
}
