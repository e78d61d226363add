//! Format trait and implementations for locating headings in rendered documents.
//!
//! This module defines the `Format` trait which abstracts over the grammar used to find heading
//! elements, by providing the tree-sitter language and the query that captures a heading node.

pub mod markdown;

/// Grammar and query used to find heading nodes.
pub trait Format {
    /// Tree-sitter grammar for the document type.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing each heading node as `@heading`.
    fn heading_query(&self) -> &str;
}
