use crate::types::{Expr, QueryMatch, Span, merge_spans};

/// Evaluate a compiled query against an article token vector.
///
/// Two passes over the same tree: the positive pass collects match spans
/// while treating negations as neutral, and the forbidden pass vetoes the
/// rule if any negated subtree fires anywhere in the article. A rule built
/// only from negations matches exactly when nothing forbidden fired.
pub(crate) fn evaluate(expr: &Expr, tokens: &[String]) -> QueryMatch {
    if has_forbidden(expr, tokens) {
        return QueryMatch::no_match();
    }
    let positive = eval_positive(expr, tokens);
    if has_positive(expr) {
        let spans = if positive.matched {
            merge_spans(positive.spans)
        } else {
            Vec::new()
        };
        QueryMatch {
            matched: positive.matched,
            spans,
        }
    } else {
        QueryMatch {
            matched: true,
            spans: Vec::new(),
        }
    }
}

struct Positive {
    matched: bool,
    spans: Vec<Span>,
}

fn eval_positive(expr: &Expr, tokens: &[String]) -> Positive {
    match expr {
        Expr::Term(value) => leaf(term_spans(tokens, value)),
        Expr::Wildcard(prefix) => leaf(wildcard_spans(tokens, prefix)),
        Expr::Phrase(words) => leaf(phrase_spans(tokens, words)),
        Expr::Not(_) => Positive {
            matched: true,
            spans: Vec::new(),
        },
        Expr::And(left, right) => {
            let l = eval_positive(left, tokens);
            let r = eval_positive(right, tokens);
            let mut spans = l.spans;
            spans.extend(r.spans);
            Positive {
                matched: l.matched && r.matched,
                spans,
            }
        }
        Expr::Or(left, right) => {
            let l = eval_positive(left, tokens);
            let r = eval_positive(right, tokens);
            let mut spans = Vec::new();
            if l.matched {
                spans.extend(l.spans);
            }
            if r.matched {
                spans.extend(r.spans);
            }
            Positive {
                matched: l.matched || r.matched,
                spans,
            }
        }
        Expr::Near(distance, left, right) => {
            let l = eval_positive(left, tokens);
            let r = eval_positive(right, tokens);
            let mut spans = Vec::new();
            for ls in &l.spans {
                for rs in &r.spans {
                    if ls.distance(rs) <= *distance as usize {
                        spans.push(ls.cover(rs));
                    }
                }
            }
            Positive {
                matched: !spans.is_empty(),
                spans,
            }
        }
    }
}

fn leaf(spans: Vec<Span>) -> Positive {
    Positive {
        matched: !spans.is_empty(),
        spans,
    }
}

/// Whether the subtree carries any positive requirement.
fn has_positive(expr: &Expr) -> bool {
    match expr {
        Expr::Term(_) | Expr::Wildcard(_) | Expr::Phrase(_) => true,
        Expr::Not(inner) => has_positive(inner),
        Expr::And(left, right) | Expr::Or(left, right) => {
            has_positive(left) || has_positive(right)
        }
        Expr::Near(..) => true,
    }
}

/// Structure-blind exclusion check: any `NOT` whose child matches the
/// article, no matter where it sits in the tree, suppresses the rule.
fn has_forbidden(expr: &Expr, tokens: &[String]) -> bool {
    match expr {
        Expr::Term(_) | Expr::Wildcard(_) | Expr::Phrase(_) => false,
        Expr::Not(inner) => {
            eval_positive(inner, tokens).matched || has_forbidden(inner, tokens)
        }
        Expr::And(left, right) | Expr::Or(left, right) | Expr::Near(_, left, right) => {
            has_forbidden(left, tokens) || has_forbidden(right, tokens)
        }
    }
}

// -- Match primitives -------------------------------------------------------

/// Per-token equality with prefix flexibility: an unprefixed query value also
/// matches its `@`/`#` variants, while a prefixed value requires the literal
/// token.
fn token_eq(token: &str, value: &str) -> bool {
    if value.starts_with('@') || value.starts_with('#') {
        token == value
    } else {
        token == value
            || ((token.starts_with('@') || token.starts_with('#')) && &token[1..] == value)
    }
}

fn token_starts_with(token: &str, prefix: &str) -> bool {
    if prefix.starts_with('@') || prefix.starts_with('#') {
        token.starts_with(prefix)
    } else {
        token.starts_with(prefix)
            || ((token.starts_with('@') || token.starts_with('#'))
                && token[1..].starts_with(prefix))
    }
}

fn term_spans(tokens: &[String], value: &str) -> Vec<Span> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token_eq(token, value))
        .map(|(i, _)| Span::new(i, i + 1))
        .collect()
}

fn wildcard_spans(tokens: &[String], prefix: &str) -> Vec<Span> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token_starts_with(token, prefix))
        .map(|(i, _)| Span::new(i, i + 1))
        .collect()
}

fn phrase_spans(tokens: &[String], words: &[String]) -> Vec<Span> {
    if words.is_empty() || words.len() > tokens.len() {
        return Vec::new();
    }
    (0..=tokens.len() - words.len())
        .filter(|&start| {
            words
                .iter()
                .enumerate()
                .all(|(offset, word)| token_eq(&tokens[start + offset], word))
        })
        .map(|start| Span::new(start, start + words.len()))
        .collect()
}
