use thiserror::Error;

/// Errors produced when lexing or parsing a brand query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `"` or `'` phrase was opened but never closed.
    #[error("unterminated phrase at byte {position}")]
    UnterminatedPhrase {
        /// Byte offset of the failure in the query string.
        position: usize,
    },

    /// The query contained no tokens at all.
    #[error("empty query")]
    EmptyQuery,

    /// An operator or `)` appeared where an operand was expected.
    #[error("unexpected {found}")]
    UnexpectedToken {
        /// Display form of the offending token.
        found: String,
    },

    /// The query ended while an operand or `)` was still required.
    #[error("unexpected end of query")]
    UnexpectedEnd,

    /// Input remained after a complete query was parsed.
    #[error("unexpected {found} after end of query")]
    TrailingTokens {
        /// Display form of the first leftover token.
        found: String,
    },

    /// A bare term normalized to nothing (e.g. `!!!`).
    #[error("term '{term}' is empty after normalization")]
    EmptyTerm {
        /// The raw term as written in the query.
        term: String,
    },

    /// A wildcard's prefix normalized to nothing (e.g. `*` or `!*`).
    #[error("wildcard '{term}' has an empty prefix after normalization")]
    EmptyWildcard {
        /// The raw term as written in the query.
        term: String,
    },
}
