//! Error types shared across the library.
//!
//! Section resolution itself never fails: a line that is not a heading or a section with
//! nothing in it resolves to `None`. Errors only come from the plumbing around it (files,
//! the settings store, the tree-sitter grammar and the system clipboard).

use std::io;

/// Everything that can go wrong outside of section resolution.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reading or writing a document, settings or log file failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The settings file could not be (de)serialised.
    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// The markdown grammar could not be loaded into the parser.
    #[error("grammar error: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// A heading query did not compile against the grammar.
    #[error("query error: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// The parser returned no tree for the document.
    #[error("markdown parse produced no tree")]
    Parse,

    /// The system clipboard refused the write (or could not be opened).
    #[error("clipboard error: {0}")]
    Clipboard(String),
}

impl From<arboard::Error> for Error {
    fn from(err: arboard::Error) -> Self {
        Self::Clipboard(err.to_string())
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
