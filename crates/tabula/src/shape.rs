//! Per-shape SQL caches.
//!
//! A shape is the structural part of a relationship query: which records,
//! how they are joined, and which property is populated. Caller supplied
//! `WHERE`, `ORDER BY` and limit text is never part of a shape, so queries
//! that only differ in those share one entry.

use crate::{mapper::ShapeCacheStats, relation::Kind, Config};

use rand::seq::IteratorRandom;
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering::Relaxed},
        Arc, PoisonError, RwLock,
    },
};

/// Identifies a query shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ShapeKey {
    pub(crate) owner: TypeId,
    pub(crate) related: Option<TypeId>,
    pub(crate) kind: Option<Kind>,
    pub(crate) join_column: Option<String>,
    pub(crate) through_table: Option<String>,
    pub(crate) through_columns: Option<(String, String)>,
    pub(crate) property: Option<String>,
}

/// Validated, generated SQL of one shape.
#[derive(Debug)]
pub(crate) struct Shape {
    pub(crate) sql: String,

    /// True if `sql` already has a `WHERE` clause
    pub(crate) has_filter: bool,
}

/// Bounded map from shape key to generated SQL.
///
/// Entries are inserted once and never mutated. When the cache is full, a
/// random subset of entries is evicted before inserting.
#[derive(Debug)]
pub(crate) struct ShapeCache {
    name: &'static str,
    entries: RwLock<HashMap<ShapeKey, Arc<Shape>>>,
    capacity: usize,
    evict_fraction: f64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl ShapeCache {
    pub(crate) fn new(name: &'static str, config: &Config) -> ShapeCache {
        ShapeCache {
            name,
            entries: RwLock::new(HashMap::new()),
            capacity: config.shape_cache_capacity,
            evict_fraction: config.shape_cache_evict_fraction,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub(crate) fn get(&self, key: &ShapeKey) -> Option<Arc<Shape>> {
        let shape = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();

        match shape {
            Some(_) => self.hits.fetch_add(1, Relaxed),
            None => self.misses.fetch_add(1, Relaxed),
        };

        shape
    }

    /// Returns the cached shape for `key`, calling `build` on a miss.
    ///
    /// `build` runs without holding the lock. Only a successfully built shape
    /// is inserted; an error is returned as is and nothing is cached.
    pub(crate) fn get_or_try_insert<E>(
        &self,
        key: ShapeKey,
        build: impl FnOnce() -> Result<Shape, E>,
    ) -> Result<Arc<Shape>, E> {
        if let Some(shape) = self.get(&key) {
            return Ok(shape);
        }

        let shape = Arc::new(build()?);

        tracing::debug!(cache = self.name, sql = %shape.sql, "shape cached");

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            self.evict(&mut entries);
        }

        Ok(entries.entry(key).or_insert(shape).clone())
    }

    fn evict(&self, entries: &mut HashMap<ShapeKey, Arc<Shape>>) {
        let count = ((self.capacity as f64 * self.evict_fraction).ceil() as usize).max(1);

        let victims = entries
            .keys()
            .cloned()
            .choose_multiple(&mut rand::thread_rng(), count);

        for key in &victims {
            entries.remove(key);
        }

        self.evictions.fetch_add(victims.len() as u64, Relaxed);

        tracing::debug!(
            cache = self.name,
            evicted = victims.len(),
            remaining = entries.len(),
            "shape cache full"
        );
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub(crate) fn stats(&self) -> ShapeCacheStats {
        ShapeCacheStats {
            entries: self.len(),
            hits: self.hits.load(Relaxed),
            misses: self.misses.load(Relaxed),
            evictions: self.evictions.load(Relaxed),
        }
    }
}
