//! Ordered-set façades (C4): `OrderedSet` (busy-wait reclamation) and
//! `OrderedSetGc` (deferred reclamation).
//!
//! Grounded on `sl_set<K>`/`sl_set_gc<K>` in
//! `examples/original_source/include/sl_set.h`, generalized from C++
//! inheritance to the `Container<T, C, R>` generic built in `container.rs`.

use crate::comparator::{Comparator, KeyQuery, NaturalOrder};
use crate::container::{BusyWait, Container, Cursor};
use crate::gc::DeferredGc;
use skiplist_core::{ListConfig, Result};
use std::sync::Arc;

/// An ordered set reclaiming erased nodes by busy-waiting on the
/// eraser thread until no reader still holds a reference.
pub struct OrderedSet<T, C = NaturalOrder<T>> {
    inner: Arc<Container<T, C, BusyWait>>,
}

impl<T: Ord> OrderedSet<T> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder::new())
    }
}

impl<T: Ord> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> OrderedSet<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_config(cmp, ListConfig::default()).expect("default config always validates")
    }

    pub fn with_config(cmp: C, config: ListConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Container::new(cmp, config, BusyWait)?),
        })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// `insert(key) -> (iterator, inserted?)`. On a duplicate, the
    /// returned cursor points at the existing element.
    pub fn insert(&self, value: T) -> (Cursor<T, C, BusyWait>, bool) {
        self.inner.insert(value)
    }

    pub fn find<Q>(&self, query: &Q) -> Cursor<T, C, BusyWait>
    where
        C: KeyQuery<Q, T>,
    {
        self.inner.find(query)
    }

    pub fn erase(&self, cursor: Cursor<T, C, BusyWait>) -> Cursor<T, C, BusyWait> {
        self.inner.erase_cursor(cursor)
    }

    pub fn erase_key<Q>(&self, query: &Q) -> usize
    where
        C: KeyQuery<Q, T>,
    {
        self.inner.erase_key(query)
    }

    pub fn begin(&self) -> Cursor<T, C, BusyWait> {
        self.inner.begin()
    }

    pub fn end(&self) -> Cursor<T, C, BusyWait> {
        self.inner.end()
    }

    pub fn rbegin(&self) -> Cursor<T, C, BusyWait> {
        self.inner.rbegin()
    }

    pub fn rend(&self) -> Cursor<T, C, BusyWait> {
        self.inner.rend()
    }
}

/// An ordered set that hands erased nodes to a deferred-reclamation
/// slot array instead of blocking the eraser thread.
pub struct OrderedSetGc<T, C = NaturalOrder<T>> {
    inner: Arc<Container<T, C, DeferredGc<T>>>,
}

impl<T: Ord> OrderedSetGc<T> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder::new())
    }
}

impl<T: Ord> Default for OrderedSetGc<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> OrderedSetGc<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_config(cmp, ListConfig::default()).expect("default config always validates")
    }

    pub fn with_config(cmp: C, config: ListConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Container::new(cmp, config, DeferredGc::new())?),
        })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn insert(&self, value: T) -> (Cursor<T, C, DeferredGc<T>>, bool) {
        self.inner.insert(value)
    }

    pub fn find<Q>(&self, query: &Q) -> Cursor<T, C, DeferredGc<T>>
    where
        C: KeyQuery<Q, T>,
    {
        self.inner.find(query)
    }

    pub fn erase(&self, cursor: Cursor<T, C, DeferredGc<T>>) -> Cursor<T, C, DeferredGc<T>> {
        self.inner.erase_cursor(cursor)
    }

    pub fn erase_key<Q>(&self, query: &Q) -> usize
    where
        C: KeyQuery<Q, T>,
    {
        self.inner.erase_key(query)
    }

    pub fn begin(&self) -> Cursor<T, C, DeferredGc<T>> {
        self.inner.begin()
    }

    pub fn end(&self) -> Cursor<T, C, DeferredGc<T>> {
        self.inner.end()
    }

    pub fn rbegin(&self) -> Cursor<T, C, DeferredGc<T>> {
        self.inner.rbegin()
    }

    pub fn rend(&self) -> Cursor<T, C, DeferredGc<T>> {
        self.inner.rend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<C: Comparator<i32>>(set: &OrderedSet<i32, C>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut cursor = set.begin();
        while !cursor.is_sentinel() {
            out.push(*cursor.get().unwrap());
            cursor = cursor.next();
        }
        out
    }

    #[test]
    fn basic_insert_find_erase() {
        let set = OrderedSet::new();
        for k in [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5] {
            set.insert(k);
        }

        assert_eq!(collect(&set), vec![1, 2, 3, 4, 5, 6, 9]);
        assert_eq!(set.len(), 7);

        assert_eq!(set.erase_key(&4), 1);
        assert_eq!(collect(&set), vec![1, 2, 3, 5, 6, 9]);
        assert_eq!(set.len(), 6);
        assert_eq!(set.erase_key(&4), 0);
    }

    #[test]
    fn duplicate_insert_returns_existing_cursor() {
        let set = OrderedSet::new();
        let (first, inserted) = set.insert(7);
        assert!(inserted);
        let (second, inserted) = set.insert(7);
        assert!(!inserted);
        assert_eq!(first, second);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn find_is_exact_only() {
        let set = OrderedSet::new();
        for k in (10..=100).step_by(10) {
            set.insert(k);
        }

        assert_eq!(*set.find(&30).get().unwrap(), 30);
        assert!(set.find(&25).is_sentinel());
        assert!(set.find(&5).is_sentinel());
        assert!(set.find(&105).is_sentinel());
    }

    #[test]
    fn reverse_iteration() {
        let set = OrderedSet::new();
        for k in 0..15 {
            set.insert(k);
        }

        let mut out = Vec::new();
        let mut cursor = set.rbegin();
        while cursor != set.rend() {
            out.push(*cursor.get().unwrap());
            cursor = cursor.prev();
        }
        assert_eq!(out, (0..15).rev().collect::<Vec<_>>());
    }

    #[test]
    fn empty_set_boundaries() {
        let set = OrderedSet::<i32>::new();
        assert!(set.is_empty());
        assert_eq!(set.begin(), set.end());
        assert_eq!(set.rbegin(), set.rend());
        assert!(set.find(&0).is_sentinel());
        assert_eq!(set.erase_key(&0), 0);
    }

    #[test]
    fn erase_by_iterator_returns_successor() {
        let set = OrderedSet::new();
        for k in [1, 2, 3] {
            set.insert(k);
        }
        let cursor = set.find(&2);
        let successor = set.erase(cursor);
        assert_eq!(*successor.get().unwrap(), 3);
        assert_eq!(collect(&set), vec![1, 3]);
    }

    #[test]
    fn gc_variant_matches_busy_wait_semantics() {
        let set = OrderedSetGc::new();
        for k in [5, 3, 8, 1, 9] {
            set.insert(k);
        }
        assert_eq!(set.erase_key(&3), 1);

        let mut out = Vec::new();
        let mut cursor = set.begin();
        while !cursor.is_sentinel() {
            out.push(*cursor.get().unwrap());
            cursor = cursor.next();
        }
        assert_eq!(out, vec![1, 5, 8, 9]);
    }
}
