use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::compile::Catalog;
use crate::types::{CatalogError, Classification};

/// Process-wide classifier handle.
///
/// Holds the current catalog behind a lock, but only as a snapshot pointer:
/// `classify` clones the [`Arc`] out and evaluates outside the lock, so a
/// reload never blocks in-flight evaluations. Callers during a reload see
/// either the old snapshot or the new one, never a partial state.
#[derive(Debug, Default)]
pub struct Classifier {
    state: RwLock<CatalogState>,
}

#[derive(Debug, Default)]
enum CatalogState {
    #[default]
    Uninitialized,
    Initializing,
    Ready(Arc<Catalog>),
}

/// Snapshot of the classifier's lifecycle, serialized on the status surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierStatus {
    pub initialized: bool,
    pub query_count: usize,
}

impl Classifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load (or reload) the catalog from a CSV file and atomically swap it in.
    ///
    /// Returns the number of compiled rules. On failure a previously loaded
    /// catalog stays in place; a failed first load falls back to
    /// `Uninitialized`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or its header is
    /// invalid.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        {
            let mut state = self.state.write();
            if matches!(*state, CatalogState::Uninitialized) {
                *state = CatalogState::Initializing;
            }
        }
        match Catalog::load(path) {
            Ok(catalog) => Ok(self.install(catalog)),
            Err(err) => {
                let mut state = self.state.write();
                if matches!(*state, CatalogState::Initializing) {
                    *state = CatalogState::Uninitialized;
                }
                Err(err)
            }
        }
    }

    /// Swap in an already compiled catalog. Returns the rule count.
    pub fn install(&self, catalog: Catalog) -> usize {
        let count = catalog.len();
        *self.state.write() = CatalogState::Ready(Arc::new(catalog));
        info!(rules = count, "classifier ready");
        count
    }

    /// Classify article text against the current catalog snapshot.
    ///
    /// Returns `None` while the classifier is not ready, and for empty or
    /// whitespace-only input.
    #[must_use]
    pub fn classify(&self, article: &str) -> Option<Classification> {
        let snapshot = match &*self.state.read() {
            CatalogState::Ready(catalog) => Arc::clone(catalog),
            _ => return None,
        };
        snapshot.classify(article)
    }

    #[must_use]
    pub fn status(&self) -> ClassifierStatus {
        match &*self.state.read() {
            CatalogState::Ready(catalog) => ClassifierStatus {
                initialized: true,
                query_count: catalog.len(),
            },
            _ => ClassifierStatus {
                initialized: false,
                query_count: 0,
            },
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(*self.state.read(), CatalogState::Ready(_))
    }
}
