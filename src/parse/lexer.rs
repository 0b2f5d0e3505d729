use std::fmt;

use winnow::combinator::{alt, cut_err, preceded, repeat, terminated};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::take_while;

use super::error::ParseError;
use crate::types::DEFAULT_NEAR_DISTANCE;

/// Structural token of the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Tok {
    LParen,
    RParen,
    And,
    Or,
    Not,
    /// `NEAR/N`, or a bare `NEAR` resolved to the default distance.
    Near(u32),
    /// Phrase body, still raw; the parser tokenizes it.
    Phrase(String),
    /// Bare run that is not a keyword, original casing preserved.
    Term(String),
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::LParen => write!(f, "("),
            Tok::RParen => write!(f, ")"),
            Tok::And => write!(f, "AND"),
            Tok::Or => write!(f, "OR"),
            Tok::Not => write!(f, "NOT"),
            Tok::Near(d) => write!(f, "NEAR/{d}"),
            Tok::Phrase(body) => write!(f, "\"{body}\""),
            Tok::Term(raw) => write!(f, "'{raw}'"),
        }
    }
}

/// Lex a query string into structural tokens.
///
/// The only lexical failure is an unterminated phrase; everything else is a
/// parenthesis, a quoted body, or a bare run ending at whitespace, a
/// parenthesis, or a quote.
pub(super) fn lex(input: &str) -> Result<Vec<Tok>, ParseError> {
    let raw = raw_tokens
        .parse(input)
        .map_err(|err| ParseError::UnterminatedPhrase {
            position: err.offset(),
        })?;
    Ok(classify(raw))
}

#[derive(Clone)]
enum RawTok {
    LParen,
    RParen,
    Phrase(String),
    Bare(String),
}

fn raw_tokens(input: &mut &str) -> ModalResult<Vec<RawTok>> {
    terminated(repeat(0.., preceded(ws, raw_tok)), ws).parse_next(input)
}

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

fn raw_tok(input: &mut &str) -> ModalResult<RawTok> {
    alt((
        '('.value(RawTok::LParen),
        ')'.value(RawTok::RParen),
        quoted('"'),
        quoted('\''),
        bare_run,
    ))
    .parse_next(input)
}

fn quoted(quote: char) -> impl FnMut(&mut &str) -> ModalResult<RawTok> {
    move |input: &mut &str| {
        let mut quote = quote;
        quote.parse_next(input)?;
        let body = cut_err(terminated(take_while(0.., move |c| c != quote), quote))
            .parse_next(input)?;
        Ok(RawTok::Phrase(body.to_owned()))
    }
}

fn bare_run(input: &mut &str) -> ModalResult<RawTok> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, '(' | ')' | '"' | '\'')
    })
    .map(|run: &str| RawTok::Bare(run.to_owned()))
    .parse_next(input)
}

/// Keyword recognition on completed bare runs, including pairing a bare
/// `NEAR` with a following `/N` run.
fn classify(raw: Vec<RawTok>) -> Vec<Tok> {
    let mut out = Vec::with_capacity(raw.len());
    let mut iter = raw.into_iter().peekable();
    while let Some(tok) = iter.next() {
        let run = match tok {
            RawTok::LParen => {
                out.push(Tok::LParen);
                continue;
            }
            RawTok::RParen => {
                out.push(Tok::RParen);
                continue;
            }
            RawTok::Phrase(body) => {
                out.push(Tok::Phrase(body));
                continue;
            }
            RawTok::Bare(run) => run,
        };

        let upper = run.to_ascii_uppercase();
        out.push(match upper.as_str() {
            "AND" => Tok::And,
            "OR" => Tok::Or,
            "NOT" => Tok::Not,
            "NEAR" => {
                let paired = match iter.peek() {
                    Some(RawTok::Bare(next)) => slash_distance(next),
                    _ => None,
                };
                match paired {
                    Some(distance) => {
                        iter.next();
                        Tok::Near(distance)
                    }
                    None => Tok::Near(DEFAULT_NEAR_DISTANCE),
                }
            }
            _ => match upper.strip_prefix("NEAR/").and_then(|n| n.parse().ok()) {
                Some(distance) => Tok::Near(distance),
                None => Tok::Term(run),
            },
        });
    }
    out
}

fn slash_distance(run: &str) -> Option<u32> {
    run.strip_prefix('/')?.parse().ok()
}
