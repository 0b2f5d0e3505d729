mod error;
mod expr;
mod rule;
mod span;

pub use error::CatalogError;
pub use expr::{DEFAULT_NEAR_DISTANCE, Expr, phrase, term, wildcard};
pub use rule::{BrandRule, Classification, QueryMatch};
pub use span::{Span, merge_spans};
