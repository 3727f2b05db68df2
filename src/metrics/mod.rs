//! Metrics collection module
//!
//! Tracks search volume, zero-result rates, and per-collection read health.

use crate::store::Collection;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Read times kept per collection
const READ_TIME_WINDOW: usize = 100;

/// Process-wide metrics collector
#[derive(Debug)]
pub struct Metrics {
    /// Accepted searches
    total_searches: AtomicU64,
    /// Accepted searches that matched nothing
    zero_result_searches: AtomicU64,
    /// Queries rejected before any read
    rejected_queries: AtomicU64,
    /// Suggestion lists served over HTTP
    suggestion_requests: AtomicU64,
    /// Successful reads per collection
    collection_reads: RwLock<HashMap<Collection, u64>>,
    /// Recent read times in ms
    read_times: RwLock<HashMap<Collection, Vec<u64>>>,
    /// Timeouts and unavailable reads per collection
    collection_failures: RwLock<HashMap<Collection, u64>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            zero_result_searches: AtomicU64::new(0),
            rejected_queries: AtomicU64::new(0),
            suggestion_requests: AtomicU64::new(0),
            collection_reads: RwLock::new(HashMap::new()),
            read_times: RwLock::new(HashMap::new()),
            collection_failures: RwLock::new(HashMap::new()),
        }
    }

    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_zero_results(&self) {
        self.zero_result_searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected(&self) {
        self.rejected_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_suggestions(&self) {
        self.suggestion_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful collection read
    pub fn record_read(&self, collection: Collection, time_ms: u64) {
        {
            let mut reads = self
                .collection_reads
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *reads.entry(collection).or_insert(0) += 1;
        }

        let mut times = self.read_times.write().unwrap_or_else(PoisonError::into_inner);
        let entry = times.entry(collection).or_default();
        if entry.len() >= READ_TIME_WINDOW {
            entry.remove(0);
        }
        entry.push(time_ms);
    }

    /// Record a degraded collection read
    pub fn record_failure(&self, collection: Collection) {
        let mut failures = self
            .collection_failures
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *failures.entry(collection).or_insert(0) += 1;
    }

    pub fn get_total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    /// Average of the recent read times for a collection
    pub fn get_avg_read_time(&self, collection: Collection) -> Option<u64> {
        let times = self.read_times.read().unwrap_or_else(PoisonError::into_inner);
        times.get(&collection).and_then(|t| {
            if t.is_empty() {
                None
            } else {
                Some(t.iter().sum::<u64>() / t.len() as u64)
            }
        })
    }

    /// Share of reads that succeeded, in percent
    pub fn get_reliability(&self, collection: Collection) -> f64 {
        let reads = self.collection_reads.read().unwrap_or_else(PoisonError::into_inner);
        let failures = self
            .collection_failures
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let success_count = reads.get(&collection).copied().unwrap_or(0);
        let failure_count = failures.get(&collection).copied().unwrap_or(0);

        let total = success_count + failure_count;
        if total == 0 {
            100.0
        } else {
            (success_count as f64 / total as f64) * 100.0
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let collections = Collection::ALL
            .into_iter()
            .map(|collection| {
                let reads = self
                    .collection_reads
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get(&collection)
                    .copied()
                    .unwrap_or(0);
                let failures = self
                    .collection_failures
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get(&collection)
                    .copied()
                    .unwrap_or(0);
                (
                    collection.as_str().to_string(),
                    CollectionStats {
                        reads,
                        failures,
                        avg_read_time_ms: self.get_avg_read_time(collection),
                        reliability: self.get_reliability(collection),
                    },
                )
            })
            .collect();

        MetricsSnapshot {
            total_searches: self.get_total_searches(),
            zero_result_searches: self.zero_result_searches.load(Ordering::Relaxed),
            rejected_queries: self.rejected_queries.load(Ordering::Relaxed),
            suggestion_requests: self.suggestion_requests.load(Ordering::Relaxed),
            collections,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Read statistics for one collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionStats {
    pub reads: u64,
    pub failures: u64,
    pub avg_read_time_ms: Option<u64>,
    pub reliability: f64,
}

/// Serializable view served by /stats
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_searches: u64,
    pub zero_result_searches: u64,
    pub rejected_queries: u64,
    pub suggestion_requests: u64,
    pub collections: BTreeMap<String, CollectionStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let metrics = Metrics::new();

        metrics.inc_search();
        metrics.record_read(Collection::Businesses, 100);
        metrics.record_read(Collection::Businesses, 50);
        metrics.record_failure(Collection::Events);

        assert_eq!(metrics.get_total_searches(), 1);
        assert_eq!(metrics.get_avg_read_time(Collection::Businesses), Some(75));
        assert_eq!(metrics.get_reliability(Collection::Businesses), 100.0);
        assert_eq!(metrics.get_reliability(Collection::Events), 0.0);
        assert_eq!(metrics.get_reliability(Collection::Categories), 100.0);
    }

    #[test]
    fn test_snapshot_lists_every_collection() {
        let metrics = Metrics::new();
        metrics.inc_rejected();
        metrics.inc_zero_results();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.rejected_queries, 1);
        assert_eq!(snapshot.zero_result_searches, 1);
        assert_eq!(snapshot.collections.len(), 3);
        assert_eq!(snapshot.collections["events"].avg_read_time_ms, None);
    }

    #[test]
    fn test_read_time_window() {
        let metrics = Metrics::new();
        for _ in 0..READ_TIME_WINDOW {
            metrics.record_read(Collection::Events, 1000);
        }
        metrics.record_read(Collection::Events, 0);
        // oldest sample dropped, so the average falls below 1000
        assert_eq!(metrics.get_avg_read_time(Collection::Events), Some(990));
    }
}
