use serde::{Deserialize, Serialize};

use super::expr::Expr;
use super::span::Span;

/// A compiled catalog entry: the classification metadata from one CSV row
/// plus the compiled query. Immutable after compilation.
#[derive(Debug, Clone)]
pub struct BrandRule {
    pub topic: String,
    pub sub_topic: String,
    pub query_name: String,
    pub internal_id: String,
    /// The original query text the rule was compiled from.
    pub source: String,
    pub expr: Expr,
}

impl BrandRule {
    /// Evaluate this rule's query against a pre-tokenized article.
    pub fn evaluate(&self, tokens: &[String]) -> QueryMatch {
        self.expr.evaluate_tokens(tokens)
    }

    /// The classification tuple this rule tags matching articles with.
    #[must_use]
    pub fn classification(&self) -> Classification {
        Classification {
            topic: self.topic.clone(),
            sub_topic: self.sub_topic.clone(),
            query_name: self.query_name.clone(),
            internal_id: self.internal_id.clone(),
        }
    }
}

/// The `(topic, subTopic, queryName, internalId)` tuple of the first rule to
/// match an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub topic: String,
    pub sub_topic: String,
    pub query_name: String,
    pub internal_id: String,
}

/// Verdict of evaluating one query against one article.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct QueryMatch {
    pub matched: bool,
    /// Merged match positions; empty when the rule did not match or the
    /// match is negation-only.
    pub spans: Vec<Span>,
}

impl QueryMatch {
    pub(crate) fn no_match() -> Self {
        Self {
            matched: false,
            spans: Vec::new(),
        }
    }
}
