//! Catalog loading and the one-shot ready signal.
//!
//! [`ExoplanetService`] owns the current [`CatalogIndex`] and a readiness
//! flag. Loading parses the catalog text, indexes it, swaps the new index in
//! and flips the flag to `true`. The flag flips exactly once per service and
//! also flips when loading fails, in which case the index is empty, so
//! callers waiting on it are never blocked.
//!
//! Subscribers created before or after the flip both observe it:
//!
//! ```no_run
//! # async fn demo() {
//! use exoplanet_catalog::{ExoplanetService, QueryFilter};
//!
//! let service = ExoplanetService::new();
//! service.load_path("exoplanets.csv").await;
//! service.wait_ready().await;
//! let hits = service.search(&QueryFilter::new().with_year(2016));
//! # }
//! ```

use std::fmt::Display;
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::watch;
use tracing::{error, info};

use crate::errors::CatalogError;
use crate::query::{CatalogIndex, CatalogParser, ParseStats, QueryFilter, QueryOptions};
use crate::record::ExoplanetRecord;

/// How a load attempt ended. Either way the service is ready afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The catalog text was indexed (possibly with zero records).
    Loaded(ParseStats),
    /// The text could not be obtained or had no header; the index is empty.
    Failed(String),
}

impl LoadStatus {
    /// Number of records now in the index.
    pub fn records(&self) -> usize {
        match self {
            LoadStatus::Loaded(stats) => stats.retained,
            LoadStatus::Failed(_) => 0,
        }
    }
}

/// Holds the loaded catalog and answers queries against it.
#[derive(Debug)]
pub struct ExoplanetService {
    index: RwLock<Arc<CatalogIndex>>,
    ready: watch::Sender<bool>,
}

impl Default for ExoplanetService {
    fn default() -> Self {
        Self::new()
    }
}

impl ExoplanetService {
    /// Creates a service with an empty catalog that is not yet ready.
    pub fn new() -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            index: RwLock::new(Arc::new(CatalogIndex::default())),
            ready,
        }
    }

    /// A receiver for the ready flag. It starts `false` and becomes `true`
    /// once the first load attempt finishes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.ready.subscribe()
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Resolves once the first load attempt has finished.
    pub async fn wait_ready(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    /// Parses and indexes `text`, replacing any previous catalog.
    pub fn load_text(&self, text: &str) -> LoadStatus {
        info!(characters = text.len(), "Loading exoplanet catalog");
        let status = match CatalogParser::try_parse(text) {
            Ok(parsed) => {
                self.install(CatalogIndex::build(parsed.records));
                LoadStatus::Loaded(parsed.stats)
            }
            Err(e) => {
                error!(error = %e, "Error loading exoplanet data");
                self.install(CatalogIndex::default());
                LoadStatus::Failed(e.to_string())
            }
        };
        self.mark_ready();
        status
    }

    /// Loads the text produced by `fetch`. A fetch error leaves an empty
    /// catalog and still marks the service ready.
    pub async fn load_with<F, E>(&self, fetch: F) -> LoadStatus
    where
        F: Future<Output = Result<String, E>>,
        E: Display,
    {
        match fetch.await {
            Ok(text) => self.load_text(&text),
            Err(e) => {
                error!(error = %e, "Error loading exoplanet data");
                self.install(CatalogIndex::default());
                self.mark_ready();
                LoadStatus::Failed(e.to_string())
            }
        }
    }

    /// Reads a catalog file from disk and loads it.
    pub async fn load_path(&self, path: impl AsRef<Path>) -> LoadStatus {
        let path = path.as_ref();
        self.load_with(async {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| CatalogError::io(path, e))
        })
        .await
    }

    /// A snapshot of the current index. Later reloads do not affect it.
    pub fn catalog(&self) -> Arc<CatalogIndex> {
        Arc::clone(&self.index.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Records matching `filter`, in load order. Empty for an empty filter.
    pub fn search(&self, filter: &QueryFilter) -> Vec<ExoplanetRecord> {
        let catalog = self.catalog();
        let results: Vec<ExoplanetRecord> = catalog.search(filter).into_iter().cloned().collect();
        info!(
            filters = filter.active_count(),
            results = results.len(),
            "Search completed"
        );
        results
    }

    /// Distinct values per field for populating selection lists.
    pub fn query_options(&self) -> QueryOptions {
        self.catalog().options().clone()
    }

    fn install(&self, index: CatalogIndex) {
        let mut guard = self.index.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(index);
    }

    fn mark_ready(&self) {
        self.ready.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        });
    }
}
