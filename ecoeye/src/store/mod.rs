//! Keyed report store.
//!
//! The server-side cache behind the generation service: a document store
//! keyed by the selection cache key, plus a model-to-years registry used by
//! listing endpoints. Entries are created on first successful generation
//! and read on every subsequent request; no TTL or eviction applies.
//!
//! The [`ReportStore`] trait is dyn-compatible (`Pin<Box<dyn Future>>`
//! methods) so generation services can hold `Arc<dyn ReportStore>` and swap
//! backends without code changes.

mod memory;

pub use memory::MemoryReportStore;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::client::BoxFuture;
use crate::report::EcoReport;

/// Errors from store operations.
///
/// Store write failures are non-fatal to generation: the service logs them
/// and still returns the generated report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure in a persistent backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Keyed document store for generated reports.
pub trait ReportStore: Send + Sync {
    /// Look up a cached report by cache key.
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<EcoReport>, StoreError>>;

    /// Store a report under a cache key, replacing any existing entry.
    fn put(&self, key: &str, report: &EcoReport) -> BoxFuture<'_, Result<(), StoreError>>;

    /// Record that a report exists for a model slug and year.
    ///
    /// Set-union semantics: repeating the operation is safe, making the
    /// at-least-once registration after generation idempotent.
    fn register_model_year(&self, slug: &str, year: i32) -> BoxFuture<'_, Result<(), StoreError>>;

    /// The model registry: slug to sorted years with cached reports.
    fn model_years(&self) -> BoxFuture<'_, Result<BTreeMap<String, Vec<i32>>, StoreError>>;
}
