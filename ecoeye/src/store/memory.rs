//! In-memory report store.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use parking_lot::RwLock;

use crate::client::BoxFuture;
use crate::report::EcoReport;

use super::{ReportStore, StoreError};

/// In-memory store for generated reports.
///
/// Reports live for the lifetime of the process; there is no TTL or
/// eviction. Locking uses `parking_lot::RwLock` since operations are short
/// and never held across awaits.
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: RwLock<HashMap<String, EcoReport>>,
    registry: RwLock<BTreeMap<String, BTreeSet<i32>>>,
}

impl MemoryReportStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached reports.
    pub fn entry_count(&self) -> usize {
        self.reports.read().len()
    }
}

impl ReportStore for MemoryReportStore {
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<EcoReport>, StoreError>> {
        let report = self.reports.read().get(key).cloned();
        Box::pin(async move { Ok(report) })
    }

    fn put(&self, key: &str, report: &EcoReport) -> BoxFuture<'_, Result<(), StoreError>> {
        self.reports
            .write()
            .insert(key.to_string(), report.clone());
        Box::pin(async move { Ok(()) })
    }

    fn register_model_year(&self, slug: &str, year: i32) -> BoxFuture<'_, Result<(), StoreError>> {
        self.registry
            .write()
            .entry(slug.to_string())
            .or_default()
            .insert(year);
        Box::pin(async move { Ok(()) })
    }

    fn model_years(&self) -> BoxFuture<'_, Result<BTreeMap<String, Vec<i32>>, StoreError>> {
        let registry = self
            .registry
            .read()
            .iter()
            .map(|(slug, years)| (slug.clone(), years.iter().copied().collect()))
            .collect();
        Box::pin(async move { Ok(registry) })
    }
}
