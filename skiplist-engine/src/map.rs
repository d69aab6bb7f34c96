//! Ordered-map façades: the set engine parameterized by a key-only
//! comparator over [`MapEntry`]. Per spec.md §1, the map "carries no
//! additional algorithmic content" beyond the set — this module is
//! exactly that, a thin relabeling of `Container` over `MapEntry<K, V>`.

use crate::comparator::{Comparator, KeyComparator, KeyQuery, MapEntry, NaturalOrder};
use crate::container::{BusyWait, Container, Cursor};
use crate::gc::DeferredGc;
use skiplist_core::{ListConfig, Result};
use std::sync::Arc;

pub type MapCursor<K, V, C, R> = Cursor<MapEntry<K, V>, KeyComparator<K, V, C>, R>;

/// An ordered map reclaiming erased nodes by busy-waiting.
pub struct OrderedMap<K, V, C = NaturalOrder<K>> {
    inner: Arc<Container<MapEntry<K, V>, KeyComparator<K, V, C>, BusyWait>>,
}

impl<K: Ord, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder::new())
    }
}

impl<K: Ord, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_config(cmp, ListConfig::default()).expect("default config always validates")
    }

    pub fn with_config(cmp: C, config: ListConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Container::new(KeyComparator::new(cmp), config, BusyWait)?),
        })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// `insert(key, value) -> (iterator, inserted?)`. On a duplicate
    /// key, the returned cursor points at the existing entry and
    /// `value` is dropped without replacing it.
    pub fn insert(&self, key: K, value: V) -> (MapCursor<K, V, C, BusyWait>, bool) {
        self.inner.insert(MapEntry { key, value })
    }

    pub fn find<Q>(&self, key: &Q) -> MapCursor<K, V, C, BusyWait>
    where
        KeyComparator<K, V, C>: KeyQuery<Q, MapEntry<K, V>>,
    {
        self.inner.find(key)
    }

    pub fn erase(
        &self,
        cursor: MapCursor<K, V, C, BusyWait>,
    ) -> MapCursor<K, V, C, BusyWait> {
        self.inner.erase_cursor(cursor)
    }

    pub fn erase_key<Q>(&self, key: &Q) -> usize
    where
        KeyComparator<K, V, C>: KeyQuery<Q, MapEntry<K, V>>,
    {
        self.inner.erase_key(key)
    }

    pub fn begin(&self) -> MapCursor<K, V, C, BusyWait> {
        self.inner.begin()
    }

    pub fn end(&self) -> MapCursor<K, V, C, BusyWait> {
        self.inner.end()
    }

    pub fn rbegin(&self) -> MapCursor<K, V, C, BusyWait> {
        self.inner.rbegin()
    }

    pub fn rend(&self) -> MapCursor<K, V, C, BusyWait> {
        self.inner.rend()
    }
}

/// An ordered map that defers erased-node reclamation to a GC slot array.
pub struct OrderedMapGc<K, V, C = NaturalOrder<K>> {
    inner: Arc<Container<MapEntry<K, V>, KeyComparator<K, V, C>, DeferredGc<MapEntry<K, V>>>>,
}

impl<K: Ord, V> OrderedMapGc<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder::new())
    }
}

impl<K: Ord, V> Default for OrderedMapGc<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> OrderedMapGc<K, V, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_config(cmp, ListConfig::default()).expect("default config always validates")
    }

    pub fn with_config(cmp: C, config: ListConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Container::new(
                KeyComparator::new(cmp),
                config,
                DeferredGc::new(),
            )?),
        })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn insert(
        &self,
        key: K,
        value: V,
    ) -> (MapCursor<K, V, C, DeferredGc<MapEntry<K, V>>>, bool) {
        self.inner.insert(MapEntry { key, value })
    }

    pub fn find<Q>(&self, key: &Q) -> MapCursor<K, V, C, DeferredGc<MapEntry<K, V>>>
    where
        KeyComparator<K, V, C>: KeyQuery<Q, MapEntry<K, V>>,
    {
        self.inner.find(key)
    }

    pub fn erase(
        &self,
        cursor: MapCursor<K, V, C, DeferredGc<MapEntry<K, V>>>,
    ) -> MapCursor<K, V, C, DeferredGc<MapEntry<K, V>>> {
        self.inner.erase_cursor(cursor)
    }

    pub fn erase_key<Q>(&self, key: &Q) -> usize
    where
        KeyComparator<K, V, C>: KeyQuery<Q, MapEntry<K, V>>,
    {
        self.inner.erase_key(key)
    }

    pub fn begin(&self) -> MapCursor<K, V, C, DeferredGc<MapEntry<K, V>>> {
        self.inner.begin()
    }

    pub fn end(&self) -> MapCursor<K, V, C, DeferredGc<MapEntry<K, V>>> {
        self.inner.end()
    }

    pub fn rbegin(&self) -> MapCursor<K, V, C, DeferredGc<MapEntry<K, V>>> {
        self.inner.rbegin()
    }

    pub fn rend(&self) -> MapCursor<K, V, C, DeferredGc<MapEntry<K, V>>> {
        self.inner.rend()
    }
}
