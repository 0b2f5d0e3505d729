use std::fmt;
use std::ops::Not;

use crate::text;

/// Distance used by a bare `NEAR` with no explicit `/N`.
pub const DEFAULT_NEAR_DISTANCE: u32 = 9;

/// Compiled form of a brand query.
///
/// Leaves hold normalized values: the parser runs every term and phrase
/// through the article normalizer, so evaluation compares like with like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Matches a single token, with `@`/`#` prefix flexibility.
    Term(String),
    /// Matches any token whose normalized form begins with the prefix.
    Wildcard(String),
    /// Matches a contiguous run of tokens. An empty phrase matches nothing.
    Phrase(Vec<String>),
    /// Marks a forbidden subtree; a positive match anywhere inside it vetoes
    /// the whole rule.
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    /// Both sides match with spans within the given token distance.
    Near(u32, Box<Expr>, Box<Expr>),
}

impl Expr {
    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn near(self, distance: u32, other: Expr) -> Expr {
        Expr::Near(distance, Box::new(self), Box::new(other))
    }

    /// Evaluate this query against article text.
    pub fn evaluate(&self, text: &str) -> super::QueryMatch {
        self.evaluate_tokens(&text::tokenize(text))
    }

    /// Evaluate this query against a pre-tokenized article.
    pub fn evaluate_tokens(&self, tokens: &[String]) -> super::QueryMatch {
        crate::evaluate::evaluate(self, tokens)
    }

    /// Whether this query matches the article text.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.evaluate(text).matched
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Term(value) => write!(f, "{value}"),
            Expr::Wildcard(prefix) => write!(f, "{prefix}*"),
            Expr::Phrase(tokens) => write!(f, "\"{}\"", tokens.join(" ")),
            Expr::Not(inner) => write!(f, "(NOT {inner})"),
            Expr::And(a, b) => write!(f, "({a} AND {b})"),
            Expr::Or(a, b) => write!(f, "({a} OR {b})"),
            Expr::Near(d, a, b) => write!(f, "({a} NEAR/{d} {b})"),
        }
    }
}

/// Build a single-token leaf from raw text, normalizing it the way the
/// parser would.
#[must_use]
pub fn term(value: &str) -> Expr {
    Expr::Term(text::normalize(value))
}

/// Build a prefix-match leaf from raw text.
#[must_use]
pub fn wildcard(prefix: &str) -> Expr {
    Expr::Wildcard(text::normalize(prefix))
}

/// Build a phrase leaf by tokenizing raw text with the article tokenizer.
#[must_use]
pub fn phrase(body: &str) -> Expr {
    Expr::Phrase(text::tokenize(body))
}
