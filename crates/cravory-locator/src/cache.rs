//! Resolution cache and the batch runner that fills it.
//!
//! The cache maps a map-link string to the coordinate its resolution
//! produced. Only links that fail direct extraction ever get here. Entries
//! are never evicted.
//!
//! Each [`ResolutionManager::run`] takes a generation number when it starts.
//! Starting another run, or calling [`ResolutionManager::supersede`], moves
//! the generation forward; a run whose generation is no longer current drops
//! whatever it resolves from then on.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cravory_core::{Coordinate, RestaurantRecord};
use tokio::sync::RwLock;

use crate::extract::extract_coordinate;
use crate::resolve::ResolveLink;

/// Links resolved per run when no limit is configured.
pub const DEFAULT_BATCH_LIMIT: usize = 5;

/// Map link → resolved coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionCache {
    entries: HashMap<String, Coordinate>,
}

impl ResolutionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, link: &str) -> Option<Coordinate> {
        self.entries.get(link).copied()
    }

    #[must_use]
    pub fn contains(&self, link: &str) -> bool {
        self.entries.contains_key(link)
    }

    /// Insert a resolution. Returns `false` if the link was already cached,
    /// in which case the existing entry is kept.
    pub fn insert(&mut self, link: impl Into<String>, coord: Coordinate) -> bool {
        match self.entries.entry(link.into()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(coord);
                true
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome counters for one [`ResolutionManager::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub generation: u64,
    /// Links picked for this run (after the batch limit).
    pub selected: usize,
    /// Links resolved and written to the cache.
    pub resolved: usize,
    pub unresolved: usize,
    /// Links resolved after the run was superseded; not written.
    pub discarded: usize,
    pub superseded: bool,
}

/// Pick the links that need network resolution, in record order.
///
/// A link qualifies when direct extraction fails and it is not cached yet.
/// Repeated links are taken once. At most `limit` links are returned.
#[must_use]
pub fn pending_links(
    records: &[RestaurantRecord],
    cache: &ResolutionCache,
    limit: usize,
) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|record| record.map_link.as_str())
        .filter(|link| !link.trim().is_empty())
        .filter(|link| extract_coordinate(link).is_none())
        .filter(|link| !cache.contains(link))
        .filter(|link| seen.insert(*link))
        .take(limit)
        .map(str::to_owned)
        .collect()
}

/// Owns the shared cache and the run generation counter.
///
/// Cloning is cheap and every clone shares the same cache.
#[derive(Debug, Clone)]
pub struct ResolutionManager {
    cache: Arc<RwLock<ResolutionCache>>,
    generation: Arc<AtomicU64>,
    batch_limit: usize,
}

impl Default for ResolutionManager {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_LIMIT)
    }
}

impl ResolutionManager {
    /// `batch_limit` is raised to 1 if given as 0.
    #[must_use]
    pub fn new(batch_limit: usize) -> Self {
        Self {
            cache: Arc::new(RwLock::new(ResolutionCache::new())),
            generation: Arc::new(AtomicU64::new(0)),
            batch_limit: batch_limit.max(1),
        }
    }

    #[must_use]
    pub fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Copy of the cache for composing a feed.
    pub async fn snapshot(&self) -> ResolutionCache {
        self.cache.read().await.clone()
    }

    pub async fn lookup(&self, link: &str) -> Option<Coordinate> {
        self.cache.read().await.get(link)
    }

    /// Invalidate any run in progress without starting a new one.
    ///
    /// Returns the new generation.
    pub async fn supersede(&self) -> u64 {
        let _cache = self.cache.write().await;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(generation, "resolution runs superseded");
        generation
    }

    /// Run batches until one writes nothing to the cache.
    ///
    /// Every successful batch changes the cache, which makes the links past
    /// the previous batch eligible, so the next batch starts right away. The
    /// loop ends when a batch resolves nothing (all remaining links failed or
    /// none are pending) or when it was superseded. Failed links are retried
    /// by the next call, not within this one.
    pub async fn run_until_settled<R>(
        &self,
        records: &[RestaurantRecord],
        resolver: &R,
    ) -> Vec<RunReport>
    where
        R: ResolveLink,
    {
        let mut reports = Vec::new();
        loop {
            let report = self.run(records, resolver).await;
            let settled = report.resolved == 0 || report.superseded;
            reports.push(report);
            if settled {
                return reports;
            }
        }
    }

    /// Resolve up to `batch_limit` pending links from `records`, one at a time.
    ///
    /// Starting the run supersedes any earlier run. Each success is written
    /// only while this run is still the current generation; the first stale
    /// write ends the run.
    pub async fn run<R>(&self, records: &[RestaurantRecord], resolver: &R) -> RunReport
    where
        R: ResolveLink,
    {
        // Bump under the write lock so no older run can write after this point.
        let (generation, pending) = {
            let cache = self.cache.write().await;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            (generation, pending_links(records, &cache, self.batch_limit))
        };

        let mut report = RunReport {
            generation,
            selected: pending.len(),
            ..RunReport::default()
        };

        if pending.is_empty() {
            tracing::debug!(generation, "no map links pending resolution");
            return report;
        }

        for link in pending {
            if self.current_generation() != generation {
                report.superseded = true;
                break;
            }

            let Some(coord) = resolver.resolve(&link).await else {
                report.unresolved += 1;
                continue;
            };

            let mut cache = self.cache.write().await;
            if self.current_generation() != generation {
                tracing::debug!(generation, link = %link, "discarding resolution from superseded run");
                report.discarded += 1;
                report.superseded = true;
                break;
            }
            cache.insert(link, coord);
            report.resolved += 1;
        }

        tracing::info!(
            generation,
            selected = report.selected,
            resolved = report.resolved,
            unresolved = report.unresolved,
            discarded = report.discarded,
            superseded = report.superseded,
            "resolution run finished"
        );
        report
    }
}
