mod error;
mod grammar;
mod lexer;

pub use error::ParseError;

use crate::types::Expr;

/// Parse a brand query string into an [`Expr`].
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid query.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = lexer::lex(input)?;
    grammar::parse_tokens(&tokens)
}
