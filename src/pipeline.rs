use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use md5::{Digest, Md5};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::types::Classification;

/// Maximum records drained per batch.
pub const BATCH_SIZE: usize = 10;
/// Interval between drains when driven by [`Pipeline::run`].
pub const BATCH_INTERVAL: Duration = Duration::from_secs(60);
/// Default bound on the in-memory ingest queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

const REQUIRED_FIELDS: &[&str] = &["platform", "query", "datetime", "link", "author", "content"];

/// An inbound social-media record, as enqueued by the webhook surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    /// MD5 hex of `platform|datetime|author|now_ms`; the store's unique key.
    pub id: String,
    pub platform: String,
    pub query: String,
    pub datetime: String,
    pub link: String,
    pub author: String,
    #[serde(default)]
    pub title: String,
    pub content: String,
    #[serde(default = "default_sentiment")]
    pub sentiment: String,
    pub received_at: String,
    pub processed: bool,
}

fn default_sentiment() -> String {
    "neutral".to_owned()
}

impl Mention {
    /// The article submitted to classification: title plus body.
    #[must_use]
    pub fn article(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

/// A raw mention plus the classification of the first matching rule, as
/// written to the processed container.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedMention {
    #[serde(flatten)]
    pub mention: Mention,
    #[serde(flatten)]
    pub classification: Classification,
}

/// Errors surfaced to the webhook caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// A required payload field is absent; lists the keys that were present.
    #[error("missing required fields; received: [{}]", received.join(", "))]
    MissingFields { received: Vec<String> },

    /// The bounded queue is at capacity and the record was shed.
    #[error("ingest queue is full ({capacity} records)")]
    QueueFull { capacity: usize },
}

/// Errors reported by a [`MentionStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-key violation: the record id already exists in the container.
    #[error("unique key conflict")]
    Conflict,

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Seam to the external document store: one raw container, one processed.
#[async_trait]
pub trait MentionStore: Send + Sync {
    async fn insert_raw(&self, mention: &Mention) -> Result<(), StoreError>;
    async fn insert_processed(&self, record: &ProcessedMention) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: MentionStore + ?Sized> MentionStore for Arc<T> {
    async fn insert_raw(&self, mention: &Mention) -> Result<(), StoreError> {
        (**self).insert_raw(mention).await
    }

    async fn insert_processed(&self, record: &ProcessedMention) -> Result<(), StoreError> {
        (**self).insert_processed(record).await
    }
}

/// Bounded in-memory buffer between webhook ingestion and the drain task.
///
/// Appended by ingest callers, drained only by the pipeline. When full the
/// push is shed rather than blocking the caller.
#[derive(Debug)]
pub struct MentionQueue {
    buf: Mutex<Vec<Mention>>,
    capacity: usize,
}

impl MentionQueue {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// # Errors
    ///
    /// Returns [`IngestError::QueueFull`] when the queue is at capacity.
    pub fn push(&self, mention: Mention) -> Result<(), IngestError> {
        let mut buf = self.buf.lock();
        if buf.len() >= self.capacity {
            return Err(IngestError::QueueFull {
                capacity: self.capacity,
            });
        }
        buf.push(mention);
        Ok(())
    }

    fn take_batch(&self, max: usize) -> Vec<Mention> {
        let mut buf = self.buf.lock();
        let n = max.min(buf.len());
        buf.drain(..n).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.lock().is_empty()
    }
}

/// Outcome of one drain pass, for logs and health reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainStats {
    /// True when this pass found another drain in flight and did nothing.
    pub skipped: bool,
    pub drained: usize,
    pub raw_written: usize,
    pub matched: usize,
    pub processed_written: usize,
    pub conflicts: usize,
    pub failures: usize,
}

/// The thin ingestion pipeline: validate, enqueue, batch-write, classify.
pub struct Pipeline<S> {
    queue: MentionQueue,
    store: S,
    classifier: Arc<Classifier>,
    draining: AtomicBool,
}

impl<S: MentionStore> Pipeline<S> {
    pub fn new(store: S, classifier: Arc<Classifier>) -> Self {
        Self::with_queue_capacity(store, classifier, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_queue_capacity(store: S, classifier: Arc<Classifier>, capacity: usize) -> Self {
        Self {
            queue: MentionQueue::new(capacity),
            store,
            classifier,
            draining: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn queue(&self) -> &MentionQueue {
        &self.queue
    }

    /// Validate a webhook payload and enqueue the resulting record.
    ///
    /// Returns the new record's id; the caller can acknowledge as soon as
    /// this returns.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::MissingFields`] when a required key is absent
    /// and [`IngestError::QueueFull`] when the record was shed.
    pub fn ingest(&self, payload: &Value) -> Result<String, IngestError> {
        let mention = mention_from_payload(payload)?;
        let id = mention.id.clone();
        self.queue.push(mention)?;
        debug!(id = %id, queued = self.queue.len(), "mention enqueued");
        Ok(id)
    }

    /// Drain up to [`BATCH_SIZE`] records: write each to the raw container,
    /// then classify and write matches to the processed container.
    ///
    /// Non-reentrant: if a drain is already in flight this returns
    /// immediately with `skipped` set.
    pub async fn drain_once(&self) -> DrainStats {
        if self.draining.swap(true, Ordering::Acquire) {
            return DrainStats {
                skipped: true,
                ..DrainStats::default()
            };
        }
        let stats = self.drain_batch().await;
        self.draining.store(false, Ordering::Release);
        if stats.drained > 0 {
            info!(
                drained = stats.drained,
                matched = stats.matched,
                conflicts = stats.conflicts,
                failures = stats.failures,
                "drained mention batch"
            );
        }
        stats
    }

    async fn drain_batch(&self) -> DrainStats {
        let batch = self.queue.take_batch(BATCH_SIZE);
        let mut stats = DrainStats {
            drained: batch.len(),
            ..DrainStats::default()
        };

        for mention in &batch {
            match self.store.insert_raw(mention).await {
                Ok(()) => stats.raw_written += 1,
                Err(StoreError::Conflict) => {
                    stats.conflicts += 1;
                    debug!(id = %mention.id, "raw record already stored");
                }
                Err(err) => {
                    stats.failures += 1;
                    warn!(id = %mention.id, error = %err, "raw write failed");
                }
            }
        }

        for mention in batch {
            let Some(classification) = self.classifier.classify(&mention.article()) else {
                continue;
            };
            stats.matched += 1;
            let id = mention.id.clone();
            let record = ProcessedMention {
                mention,
                classification,
            };
            match self.store.insert_processed(&record).await {
                Ok(()) => stats.processed_written += 1,
                Err(StoreError::Conflict) => {
                    stats.conflicts += 1;
                    debug!(id = %id, "processed record already stored");
                }
                Err(err) => {
                    stats.failures += 1;
                    warn!(id = %id, error = %err, "processed write failed");
                }
            }
        }

        stats
    }

    /// Drive [`drain_once`](Self::drain_once) on the batch interval until the
    /// owning task is dropped.
    pub async fn run(&self) {
        let mut interval = tokio::time::interval(BATCH_INTERVAL);
        loop {
            interval.tick().await;
            self.drain_once().await;
        }
    }
}

fn mention_from_payload(payload: &Value) -> Result<Mention, IngestError> {
    let Some(object) = payload.as_object() else {
        return Err(IngestError::MissingFields {
            received: Vec::new(),
        });
    };
    let text_field = |key: &str| object.get(key).and_then(Value::as_str);
    if REQUIRED_FIELDS.iter().any(|key| text_field(key).is_none()) {
        return Err(IngestError::MissingFields {
            received: object.keys().cloned().collect(),
        });
    }

    let platform = text_field("platform").unwrap_or_default().to_owned();
    let datetime = text_field("datetime").unwrap_or_default().to_owned();
    let author = text_field("author").unwrap_or_default().to_owned();
    let now = Utc::now();
    let id = mention_id(&platform, &datetime, &author, now.timestamp_millis());

    Ok(Mention {
        id,
        platform,
        query: text_field("query").unwrap_or_default().to_owned(),
        datetime,
        link: text_field("link").unwrap_or_default().to_owned(),
        author,
        title: text_field("title").unwrap_or_default().to_owned(),
        content: text_field("content").unwrap_or_default().to_owned(),
        sentiment: text_field("sentiment").unwrap_or("neutral").to_owned(),
        received_at: now.to_rfc3339(),
        processed: false,
    })
}

fn mention_id(platform: &str, datetime: &str, author: &str, now_ms: i64) -> String {
    let mut hasher = Md5::new();
    hasher.update(format!("{platform}|{datetime}|{author}|{now_ms}"));
    format!("{:x}", hasher.finalize())
}
