mod classifier;
mod compile;
mod evaluate;
mod parse;
mod pipeline;
mod text;
mod types;

pub use classifier::{Classifier, ClassifierStatus};
pub use compile::Catalog;
pub use parse::{ParseError, parse};
pub use pipeline::{
    BATCH_INTERVAL, BATCH_SIZE, DEFAULT_QUEUE_CAPACITY, DrainStats, IngestError, Mention,
    MentionQueue, MentionStore, Pipeline, ProcessedMention, StoreError,
};
pub use text::{normalize, tokenize};
pub use types::{
    BrandRule, CatalogError, Classification, DEFAULT_NEAR_DISTANCE, Expr, QueryMatch, Span,
    merge_spans, phrase, term, wildcard,
};
