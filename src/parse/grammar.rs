use super::error::ParseError;
use super::lexer::Tok;
use crate::text;
use crate::types::Expr;

/// Parse a lexed token stream into an AST.
///
/// Precedence, loosest to tightest: `OR` < `AND` < `NEAR` < `NOT` < primary.
/// All binary operators are left-associative. A `NOT` in infix position is
/// treated as `AND NOT`.
pub(super) fn parse_tokens(tokens: &[Tok]) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyQuery);
    }
    let mut cursor = Cursor { tokens, pos: 0 };
    let expr = cursor.or_expr()?;
    match cursor.peek() {
        Some(tok) => Err(ParseError::TrailingTokens {
            found: tok.to_string(),
        }),
        None => Ok(expr),
    }
}

struct Cursor<'a> {
    tokens: &'a [Tok],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Tok> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.and_expr()?;
        while matches!(self.peek(), Some(Tok::Or)) {
            self.pos += 1;
            expr = expr.or(self.and_expr()?);
        }
        Ok(expr)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.near_expr()?;
        loop {
            match self.peek() {
                Some(Tok::And) => {
                    self.pos += 1;
                    expr = expr.and(self.near_expr()?);
                }
                // Implicit AND: the NOT stays put for unary() to consume.
                Some(Tok::Not) => expr = expr.and(self.near_expr()?),
                _ => break,
            }
        }
        Ok(expr)
    }

    fn near_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;
        while let Some(Tok::Near(distance)) = self.peek() {
            let distance = *distance;
            self.pos += 1;
            expr = expr.near(distance, self.unary()?);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.peek(), Some(Tok::Not)) {
            self.pos += 1;
            Ok(!self.unary()?)
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.advance().cloned() {
            None => Err(ParseError::UnexpectedEnd),
            Some(Tok::LParen) => {
                let expr = self.or_expr()?;
                match self.advance() {
                    Some(Tok::RParen) => Ok(expr),
                    Some(tok) => Err(ParseError::UnexpectedToken {
                        found: tok.to_string(),
                    }),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Some(Tok::Phrase(body)) => Ok(Expr::Phrase(text::tokenize(&body))),
            Some(Tok::Term(raw)) => term_leaf(&raw),
            Some(tok) => Err(ParseError::UnexpectedToken {
                found: tok.to_string(),
            }),
        }
    }
}

/// Turn a bare term into a leaf: a trailing `*` makes it a wildcard, and the
/// value is normalized the way article text is.
fn term_leaf(raw: &str) -> Result<Expr, ParseError> {
    if let Some(prefix) = raw.strip_suffix('*') {
        let normalized = text::normalize(prefix);
        if normalized.is_empty() {
            return Err(ParseError::EmptyWildcard {
                term: raw.to_owned(),
            });
        }
        return Ok(Expr::Wildcard(normalized));
    }
    let normalized = text::normalize(raw);
    if normalized.is_empty() {
        return Err(ParseError::EmptyTerm {
            term: raw.to_owned(),
        });
    }
    Ok(Expr::Term(normalized))
}
