//! The shared container machinery behind the ordered-set/map façades.
//!
//! `examples/original_source/include/sl_set.h` expresses busy-wait vs.
//! deferred-GC reclamation as two classes, `sl_set<K>` and
//! `sl_set_gc<K> : public sl_set<K>`, overriding only `erase`. Rust has
//! no inheritance; `Container<T, C, R>` takes the reclamation strategy
//! as a type parameter `R: Reclaim<T>` instead, and `set.rs`/`map.rs`
//! are thin generic aliases over it.

use crate::comparator::{Comparator, KeyQuery};
use crate::gc::DeferredGc;
use crate::node::Node;
use crate::raw::RawSkipList;
use skiplist_core::{ListConfig, Result};
use std::sync::Arc;

/// How a container disposes of a node after `erase_node` has unlinked it.
pub trait Reclaim<T>: Send + Sync {
    fn reclaim<C: Comparator<T>>(&self, list: &RawSkipList<T, C>, node: *mut Node<T>);

    /// Called once from the container's `Drop`, before the remaining
    /// linked nodes are freed directly. Only the deferred-GC strategy
    /// has anything pending here.
    fn drain<C: Comparator<T>>(&self, _list: &RawSkipList<T, C>) {}
}

/// Busy-wait reclamation: `wait_for_free` then free, inline in the
/// erasing thread. Matches `sl_set::erase`.
#[derive(Debug, Default)]
pub struct BusyWait;

unsafe impl Send for BusyWait {}
unsafe impl Sync for BusyWait {}

impl<T> Reclaim<T> for BusyWait {
    fn reclaim<C: Comparator<T>>(&self, list: &RawSkipList<T, C>, node: *mut Node<T>) {
        list.wait_for_free(node);
        unsafe { list.free_node(node) };
    }
}

impl<T> Reclaim<T> for DeferredGc<T> {
    fn reclaim<C: Comparator<T>>(&self, list: &RawSkipList<T, C>, node: *mut Node<T>) {
        self.push(list, node);
    }

    fn drain<C: Comparator<T>>(&self, list: &RawSkipList<T, C>) {
        DeferredGc::drain(self, list);
    }
}

/// A cursor over a container's nodes: grab-on-clone, release-on-drop,
/// equality by node identity. `None` represents every sentinel position
/// (`end()`, `rend()`, or "not found") uniformly, matching
/// `set_iterator`'s `cursor == nullptr` convention in the original.
pub struct Cursor<T, C, R> {
    container: Arc<Container<T, C, R>>,
    node: Option<*mut Node<T>>,
}

impl<T, C: Comparator<T>, R: Reclaim<T>> Cursor<T, C, R> {
    fn new(container: Arc<Container<T, C, R>>, node: *mut Node<T>) -> Self {
        let node = if node.is_null() { None } else { Some(node) };
        Self { container, node }
    }

    fn sentinel(container: Arc<Container<T, C, R>>) -> Self {
        Self { container, node: None }
    }

    /// The pointed-to payload, or `None` at a sentinel position.
    pub fn get(&self) -> Option<&T> {
        self.node.map(|n| self.container.list.payload(n))
    }

    pub fn is_sentinel(&self) -> bool {
        self.node.is_none()
    }

    /// `++`: the in-order successor, or a sentinel past the last node.
    /// Advancing a sentinel stays a sentinel, matching `operator++` on
    /// a null iterator in the original.
    pub fn next(&self) -> Self {
        match self.node {
            Some(n) => Self::new(Arc::clone(&self.container), self.container.list.next(n)),
            None => Self::sentinel(Arc::clone(&self.container)),
        }
    }

    /// `--`: the in-order predecessor, or a sentinel before the first.
    pub fn prev(&self) -> Self {
        match self.node {
            Some(n) => Self::new(Arc::clone(&self.container), self.container.list.prev(n)),
            None => Self::sentinel(Arc::clone(&self.container)),
        }
    }
}

impl<T, C, R> Clone for Cursor<T, C, R> {
    fn clone(&self) -> Self {
        if let Some(n) = self.node {
            self.container.list.grab_node(n);
        }
        Self {
            container: Arc::clone(&self.container),
            node: self.node,
        }
    }
}

impl<T, C, R> PartialEq for Cursor<T, C, R> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}
impl<T, C, R> Eq for Cursor<T, C, R> {}

impl<T, C, R> Drop for Cursor<T, C, R> {
    fn drop(&mut self) {
        if let Some(n) = self.node.take() {
            self.container.list.release_node(n);
        }
    }
}

/// Unifies the set/map façades over one generic engine, parameterized
/// by the payload `T`, comparator `C`, and reclamation strategy `R`.
pub struct Container<T, C, R> {
    list: RawSkipList<T, C>,
    reclaim: R,
}

unsafe impl<T: Send, C: Comparator<T>, R: Send> Send for Container<T, C, R> {}
unsafe impl<T: Send + Sync, C: Comparator<T>, R: Sync> Sync for Container<T, C, R> {}

impl<T, C: Comparator<T>, R: Reclaim<T>> Container<T, C, R> {
    pub(crate) fn new(cmp: C, config: ListConfig, reclaim: R) -> Result<Self> {
        log::debug!(
            "[Container] built with fanout={} max_layer={}",
            config.fanout,
            config.max_layer
        );
        Ok(Self {
            list: RawSkipList::new(cmp, config)?,
            reclaim,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.list.size()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `insert(key) -> (iterator, inserted?)`, rejecting duplicates.
    pub(crate) fn insert(self: &Arc<Self>, payload: T) -> (Cursor<T, C, R>, bool) {
        let node = self.list.alloc_node(payload);
        if self.list.insert_no_dup(node) {
            self.list.grab_node(node);
            (Cursor::new(Arc::clone(self), node), true)
        } else {
            let existing = self.list.find(self.list.payload(node));
            // SAFETY: `node` was never linked (insert_no_dup returned
            // false), so no other thread can observe it.
            unsafe { self.list.free_node(node) };
            (Cursor::new(Arc::clone(self), existing), false)
        }
    }

    pub(crate) fn find<Q>(self: &Arc<Self>, query: &Q) -> Cursor<T, C, R>
    where
        C: KeyQuery<Q, T>,
    {
        Cursor::new(Arc::clone(self), self.list.find(query))
    }

    /// `erase(iterator) -> iterator-to-next`.
    pub(crate) fn erase_cursor(self: &Arc<Self>, mut cursor: Cursor<T, C, R>) -> Cursor<T, C, R> {
        let node = match cursor.node.take() {
            Some(n) => n,
            None => return Cursor::sentinel(Arc::clone(self)),
        };
        let next = self.list.next(node);
        self.list.erase_node(node);
        self.list.release_node(node);
        self.reclaim.reclaim(&self.list, node);
        Cursor::new(Arc::clone(self), next)
    }

    /// `erase(key) -> count-erased`. Keys are unique under
    /// `insert_no_dup`, so this is always `0` or `1`.
    pub(crate) fn erase_key<Q>(&self, query: &Q) -> usize
    where
        C: KeyQuery<Q, T>,
    {
        let found = self.list.find_by_key(query, true);
        if found.is_null() {
            return 0;
        }
        self.list.erase_node(found);
        self.list.release_node(found);
        self.reclaim.reclaim(&self.list, found);
        1
    }

    pub(crate) fn begin(self: &Arc<Self>) -> Cursor<T, C, R> {
        Cursor::new(Arc::clone(self), self.list.begin())
    }

    pub(crate) fn end(self: &Arc<Self>) -> Cursor<T, C, R> {
        Cursor::sentinel(Arc::clone(self))
    }

    /// Reverse-iteration start: the last element. Reuses the raw
    /// engine's `end()` (last valid data node), exactly as
    /// `sl_set::rbegin` wraps `skiplist_end` in the original.
    pub(crate) fn rbegin(self: &Arc<Self>) -> Cursor<T, C, R> {
        Cursor::new(Arc::clone(self), self.list.end())
    }

    pub(crate) fn rend(self: &Arc<Self>) -> Cursor<T, C, R> {
        Cursor::sentinel(Arc::clone(self))
    }
}

impl<T, C: Comparator<T>, R: Reclaim<T>> Drop for Container<T, C, R> {
    fn drop(&mut self) {
        log::debug!("[Container] dropping, {} entries remain", self.list.size());
        self.reclaim.drain(&self.list);

        let mut cursor = self.list.begin();
        while !cursor.is_null() {
            let next = self.list.next(cursor);
            self.list.release_node(cursor);
            // SAFETY: unique ownership at drop time; no concurrent
            // readers can observe these nodes any more.
            unsafe { self.list.free_node(cursor) };
            cursor = next;
        }
    }
}
