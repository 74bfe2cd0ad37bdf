//! Error types for fulltext query parsing.

use thiserror::Error;

/// Result type for fulltext query parsing.
pub type ParseResult<T> = std::result::Result<T, QuerySyntaxError>;

/// What is wrong with a rejected query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("unterminated phrase")]
    UnterminatedPhrase,

    #[error("double quotes in word")]
    QuoteInWord,

    #[error("standalone OR")]
    StandaloneOr,

    #[error("OR OR")]
    DoubledOr,

    #[error("final OR")]
    TrailingOr,

    #[error("standalone {0}")]
    StandaloneModifier(char),
}

/// A malformed fulltext query. Raised by the parser only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid fulltext query ({kind}): {query}")]
pub struct QuerySyntaxError {
    pub kind: SyntaxErrorKind,
    pub query: String,
}

impl QuerySyntaxError {
    pub fn new(kind: SyntaxErrorKind, query: impl Into<String>) -> Self {
        Self {
            kind,
            query: query.into(),
        }
    }
}
