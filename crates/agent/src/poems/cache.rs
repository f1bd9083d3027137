//! Process-lifetime cache for the last generated batch.
//!
//! The record is either empty or a whole batch; it is replaced wholesale and
//! never persisted. Staleness is computed on read.

use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use folio_core::PoemArtifact;
use tokio::time::Instant;

/// A stored batch and when it was generated.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedBatch {
    pub poems: Vec<PoemArtifact>,
    pub generated_at: DateTime<Utc>,
}

struct Entry {
    batch: CachedBatch,
    stored_at: Instant,
}

/// TTL cache holding at most one batch.
pub struct PoemCache {
    ttl: Duration,
    slot: RwLock<Option<Entry>>,
    /// Bumped on every `put`, so waiters can tell a new batch arrived.
    generation: AtomicU64,
}

impl PoemCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached batch, if present and younger than the TTL.
    pub fn get(&self) -> Option<CachedBatch> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.batch.clone())
    }

    /// Age of the stored batch, fresh or not.
    pub fn age(&self) -> Option<Duration> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().map(|entry| entry.stored_at.elapsed())
    }

    /// Replace the record with a new batch stamped now.
    pub fn put(&self, poems: Vec<PoemArtifact>) -> CachedBatch {
        let batch = CachedBatch {
            poems,
            generated_at: Utc::now(),
        };
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Entry {
            batch: batch.clone(),
            stored_at: Instant::now(),
        });
        self.generation.fetch_add(1, Ordering::SeqCst);
        batch
    }

    /// Drop the record.
    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    /// Number of `put`s so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
