//! List core (C2) and mutators/search (C3): the raw skiplist engine.
//!
//! `RawSkipList<T, C>` threads caller-owned node allocations exactly as
//! `examples/original_source/include/skiplist.h`'s `skiplist_raw` does —
//! it never allocates or frees a data node itself, only head/tail.
//! Containers (`set.rs`/`map.rs`) own allocation and call into this
//! engine for linking, search, and unlinking.
//!
//! Grounded line-for-line on `skiplist_insert`, `_sl_find`, and
//! `skiplist_erase_node_passive` in `examples/original_source/src/skiplist.cc`.

use crate::comparator::{Comparator, KeyQuery};
use crate::node::Node;
use rand::Rng;
use skiplist_core::{Error, ListConfig, Result};
use std::cmp::Ordering;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

/// Retry count at which a stuck insert/erase logs a warning. Under
/// ordinary contention a handful of retries is routine; this only fires
/// when something is camping on a node's `being_modified` flag far
/// longer than expected.
const RETRY_WARN_THRESHOLD: u32 = 10_000;

/// Internal retry-drivers for `erase`. Never escapes `skiplist-engine`'s
/// public surface, per spec.md §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EraseError {
    AlreadyRemoved,
    Busy,
    AlreadyUnlinked,
}

/// `SmallerOrEqual`/`Equal`/`GreaterOrEqual` are the public find modes;
/// `Smaller` (exclusive) backs `prev` only, per spec.md §9's resolution
/// of the "is `find_smaller` public" open question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Smaller,
    SmallerOrEqual,
    Equal,
    GreaterOrEqual,
}

/// The raw concurrent skiplist engine (C2 + C3).
///
/// Generic over a payload type `T` and a [`Comparator<T>`]. Nodes are
/// allocated and freed by the caller (typically a container in
/// `set.rs`/`map.rs`); `RawSkipList` only owns the head/tail sentinels.
pub struct RawSkipList<T, C> {
    head: *mut Node<T>,
    tail: *mut Node<T>,
    cmp: C,
    max_layer: usize,
    fanout: AtomicUsize,
    num_entries: AtomicUsize,
}

// SAFETY: the only raw pointers are `head`/`tail`, sentinels owned by
// this struct and never aliased mutably outside the locking protocol
// implemented on `Node`. Sharing across threads is sound whenever `T`
// itself is Send/Sync, same as any other concurrent container over T.
unsafe impl<T: Send, C: Comparator<T>> Send for RawSkipList<T, C> {}
unsafe impl<T: Send + Sync, C: Comparator<T>> Sync for RawSkipList<T, C> {}

impl<T, C: Comparator<T>> RawSkipList<T, C> {
    /// Builds a new list with sentinels linked across every layer,
    /// matching `skiplist_init` in the original.
    pub fn new(cmp: C, config: ListConfig) -> Result<Self> {
        config.validate()?;

        let head = Box::into_raw(Box::new(Node::new_head(config.max_layer)));
        let tail = Box::into_raw(Box::new(Node::new_tail(config.max_layer)));
        for layer in 0..config.max_layer {
            unsafe {
                (*head).next[layer].store(tail, AtomicOrdering::Relaxed);
            }
        }

        Ok(Self {
            head,
            tail,
            cmp,
            max_layer: config.max_layer,
            fanout: AtomicUsize::new(config.fanout),
            num_entries: AtomicUsize::new(0),
        })
    }

    pub fn get_config(&self) -> ListConfig {
        ListConfig {
            fanout: self.fanout.load(AtomicOrdering::Relaxed),
            max_layer: self.max_layer,
        }
    }

    /// Updates `fanout` (affects future random-level draws only).
    /// `max_layer` cannot change post-construction — the head/tail
    /// sentinels are already sized for it — matching spec.md's
    /// non-goal of reconfiguring layer count after first insertion.
    pub fn set_config(&self, config: ListConfig) -> Result<()> {
        config.validate()?;
        if config.max_layer != self.max_layer {
            return Err(Error::InvalidConfig(
                "max_layer cannot change after construction".into(),
            ));
        }
        self.fanout.store(config.fanout, AtomicOrdering::Relaxed);
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.num_entries.load(AtomicOrdering::Relaxed)
    }

    /// Draws a node's top layer from a capped geometric distribution
    /// with success probability `1/fanout`, using a thread-local RNG
    /// (spec.md §9's resolution of the shared-RNG open item).
    pub(crate) fn random_top_layer(&self) -> usize {
        let fanout = self.fanout.load(AtomicOrdering::Relaxed).max(1);
        let mut layer = 0;
        let mut rng = rand::thread_rng();
        while layer + 1 < self.max_layer {
            if rng.gen_range(0..fanout) == 0 {
                layer += 1;
            } else {
                break;
            }
        }
        layer
    }

    pub(crate) fn head(&self) -> *mut Node<T> {
        self.head
    }

    pub(crate) fn tail(&self) -> *mut Node<T> {
        self.tail
    }

    pub(crate) fn alloc_node(&self, payload: T) -> *mut Node<T> {
        let top_layer = self.random_top_layer();
        Box::into_raw(Box::new(Node::new_data(payload, top_layer)))
    }

    /// Frees a node. Caller must guarantee `is_safe_to_free`.
    ///
    /// # Safety
    /// `node` must be a pointer previously returned by `alloc_node` on
    /// this list, not already freed, and `is_safe_to_free(node)` must
    /// hold.
    pub(crate) unsafe fn free_node(&self, node: *mut Node<T>) {
        drop(Box::from_raw(node));
    }

    fn cmp_nodes(&self, a: *mut Node<T>, b: *mut Node<T>) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        // SAFETY: a/b are live nodes reachable through this list.
        unsafe {
            if (*a).is_head() || (*b).is_tail() {
                return Ordering::Less;
            }
            if (*a).is_tail() || (*b).is_head() {
                return Ordering::Greater;
            }
            let pa = (*a).payload.as_data().expect("non-sentinel node has data");
            let pb = (*b).payload.as_data().expect("non-sentinel node has data");
            self.cmp.compare(pa, pb)
        }
    }

    fn cmp_query<Q>(&self, query: &Q, b: *mut Node<T>) -> Ordering
    where
        C: KeyQuery<Q, T>,
    {
        unsafe {
            if (*b).is_head() {
                return Ordering::Greater;
            }
            if (*b).is_tail() {
                return Ordering::Less;
            }
            let pb = (*b).payload.as_data().expect("non-sentinel node has data");
            self.cmp.compare_query(query, pb)
        }
    }

    fn valid_pair(&self, a: *mut Node<T>, b: *mut Node<T>) -> bool {
        unsafe { (*a).is_valid() && (*b).is_valid() }
    }

    fn clear_flags(&self, prevs: &[*mut Node<T>], start_layer: usize, top_layer: usize) {
        for layer in start_layer..=top_layer {
            if layer == top_layer || prevs[layer] != prevs[layer + 1] {
                unsafe { (*prevs[layer]).release_modify() };
            }
        }
    }

    /// The reader hazard-protection helper (C2's `next_at_layer`).
    /// Returns a ref-counted pointer to the next *valid* node at
    /// `layer`, skipping over removed/not-yet-linked nodes. Caller owns
    /// exactly one `release` on the returned pointer.
    ///
    /// # Safety
    /// `cur` must be a live node (head, tail, or a node reachable from
    /// head) whose `next` array has at least `layer + 1` slots.
    unsafe fn next_at_layer(&self, cur: *mut Node<T>, layer: usize) -> *mut Node<T> {
        (*cur).read_lock();
        let mut next = (*cur).next[layer].load(AtomicOrdering::Acquire);
        if !next.is_null() {
            (*next).grab();
        }
        (*cur).read_unlock();

        // Between reading `cur.next[layer]` and grabbing `next`'s ref
        // count, `next` cannot be freed: freeing requires ref_count==0,
        // and we just incremented it. Skip forward past anything that
        // became invalid in the meantime.
        while !next.is_null() && !(*next).is_valid() {
            let stale = next;
            (*stale).read_lock();
            next = (*stale).next[layer].load(AtomicOrdering::Acquire);
            if !next.is_null() {
                (*next).grab();
            }
            (*stale).read_unlock();
            (*stale).release();
        }
        next
    }

    /// Core descending walk shared by insert/erase/find: `cmp_against`
    /// computes `Ordering::cmp(query, candidate)` for any candidate
    /// node, already sentinel-aware.
    fn find_core(&self, cmp_against: impl Fn(*mut Node<T>) -> Ordering, mode: Mode) -> *mut Node<T> {
        let mut cur = self.head;
        unsafe { (*cur).grab() };

        for layer in (0..self.max_layer).rev() {
            loop {
                let next = unsafe { self.next_at_layer(cur, layer) };
                let cmp = cmp_against(next);

                if cmp == Ordering::Greater {
                    let prev_cur = cur;
                    cur = next;
                    unsafe { (*prev_cur).release() };
                    continue;
                } else if matches!(mode, Mode::SmallerOrEqual | Mode::Equal | Mode::GreaterOrEqual)
                    && cmp == Ordering::Equal
                {
                    unsafe { (*cur).release() };
                    return next;
                }

                // cur < query < next
                if layer > 0 {
                    unsafe { (*next).release() };
                    break;
                }

                // bottom layer: resolve by mode
                return unsafe {
                    match mode {
                        Mode::Smaller | Mode::SmallerOrEqual if !(*cur).is_head() => {
                            (*next).release();
                            cur
                        }
                        Mode::GreaterOrEqual if !(*next).is_tail() => {
                            (*cur).release();
                            next
                        }
                        _ => {
                            (*cur).release();
                            (*next).release();
                            ptr::null_mut()
                        }
                    }
                };
            }
        }
        unreachable!("max_layer >= 1, loop always returns from the bottom layer")
    }

    pub(crate) fn find_by_key<Q>(&self, query: &Q, exact: bool) -> *mut Node<T>
    where
        C: KeyQuery<Q, T>,
    {
        let mode = if exact { Mode::Equal } else { Mode::SmallerOrEqual };
        self.find_core(|next| self.cmp_query(query, next), mode)
    }

    pub fn find<Q>(&self, query: &Q) -> *mut Node<T>
    where
        C: KeyQuery<Q, T>,
    {
        self.find_core(|next| self.cmp_query(query, next), Mode::Equal)
    }

    pub fn find_smaller_or_equal<Q>(&self, query: &Q) -> *mut Node<T>
    where
        C: KeyQuery<Q, T>,
    {
        self.find_core(|next| self.cmp_query(query, next), Mode::SmallerOrEqual)
    }

    pub fn find_greater_or_equal<Q>(&self, query: &Q) -> *mut Node<T>
    where
        C: KeyQuery<Q, T>,
    {
        self.find_core(|next| self.cmp_query(query, next), Mode::GreaterOrEqual)
    }

    fn find_smaller_than_node(&self, node: *mut Node<T>) -> *mut Node<T> {
        self.find_core(|next| self.cmp_nodes(node, next), Mode::Smaller)
    }

    /// `begin()`: the first data node, or null if the list is empty.
    pub fn begin(&self) -> *mut Node<T> {
        let next = unsafe { self.next_at_layer(self.head, 0) };
        if next == self.tail {
            unsafe { (*next).release() };
            ptr::null_mut()
        } else {
            next
        }
    }

    /// `end()`: the last data node, or null if the list is empty.
    pub fn end(&self) -> *mut Node<T> {
        self.find_smaller_than_node(self.tail)
    }

    /// `next(node)`: the node's in-order successor, or null at tail.
    pub fn next(&self, node: *mut Node<T>) -> *mut Node<T> {
        let next = unsafe { self.next_at_layer(node, 0) };
        if next == self.tail {
            unsafe { (*next).release() };
            ptr::null_mut()
        } else {
            next
        }
    }

    /// `prev(node)`: the node's in-order predecessor, or null at head.
    pub fn prev(&self, node: *mut Node<T>) -> *mut Node<T> {
        self.find_smaller_than_node(node)
    }

    /// Links `node` into the list. `no_dup` additionally checks for an
    /// existing equal key at layer 0 before committing and, if found,
    /// leaves the list untouched and returns `false`.
    fn insert_impl(&self, node: *mut Node<T>, no_dup: bool) -> bool {
        let top_layer = unsafe { (*node).top_layer as usize };
        unsafe { (*node).write_lock() };

        let mut prevs: Vec<*mut Node<T>> = vec![ptr::null_mut(); self.max_layer];
        let mut nexts: Vec<*mut Node<T>> = vec![ptr::null_mut(); self.max_layer];
        let mut attempt = 0u32;

        'retry: loop {
            attempt += 1;
            if attempt == RETRY_WARN_THRESHOLD {
                log::warn!("[RawSkipList] insert retried {attempt} times, top_layer={top_layer}");
            }
            let mut cur = self.head;
            unsafe { (*cur).grab() };

            for layer in (0..self.max_layer).rev() {
                loop {
                    let next = unsafe { self.next_at_layer(cur, layer) };
                    let cmp = self.cmp_nodes(node, next);

                    if cmp == Ordering::Greater {
                        let prev_cur = cur;
                        cur = next;
                        unsafe { (*prev_cur).release() };
                        continue;
                    }
                    unsafe { (*next).release() };

                    if layer == 0 && no_dup && cmp == Ordering::Equal {
                        self.clear_flags(&prevs, 1, top_layer);
                        unsafe {
                            (*cur).release();
                            (*node).write_unlock();
                        }
                        return false;
                    }

                    if layer <= top_layer {
                        prevs[layer] = cur;
                        nexts[layer] = next;

                        let dup_with_above = layer < top_layer && prevs[layer] == prevs[layer + 1];
                        let mut locked_from = layer + 1;
                        let mut failed = false;

                        if !dup_with_above {
                            if unsafe { (*cur).try_acquire_modify() } {
                                locked_from = layer;
                            } else {
                                failed = true;
                            }
                        }
                        if !failed && !self.valid_pair(cur, next) {
                            failed = true;
                        }

                        if failed {
                            self.clear_flags(&prevs, locked_from, top_layer);
                            unsafe { (*cur).release() };
                            continue 'retry;
                        }

                        unsafe { (*node).next[layer].store(next, AtomicOrdering::Release) };

                        let next_again = unsafe { self.next_at_layer(cur, layer) };
                        unsafe { (*next_again).release() };
                        if next_again != next {
                            self.clear_flags(&prevs, layer, top_layer);
                            unsafe { (*cur).release() };
                            continue 'retry;
                        }
                    }

                    if layer > 0 {
                        break;
                    }

                    // bottom layer: commit the link across 0..=top_layer
                    for l in 0..=top_layer {
                        unsafe {
                            (*prevs[l]).write_lock();
                            (*prevs[l]).next[l].store(node, AtomicOrdering::Release);
                            (*prevs[l]).write_unlock();
                        }
                    }
                    unsafe {
                        (*node).is_fully_linked.store(true, AtomicOrdering::Release);
                        (*node).write_unlock();
                    }
                    self.clear_flags(&prevs, 0, top_layer);
                    unsafe { (*cur).release() };
                    self.num_entries.fetch_add(1, AtomicOrdering::Relaxed);
                    return true;
                }
            }
            unreachable!("max_layer >= 1, loop always commits or retries from the bottom layer")
        }
    }

    /// Inserts `node`, allowing duplicate keys.
    pub fn insert(&self, node: *mut Node<T>) {
        let inserted = self.insert_impl(node, false);
        debug_assert!(inserted, "plain insert never reports a duplicate");
    }

    /// Inserts `node` unless an equal key is already present. Returns
    /// `true` if inserted, `false` if a duplicate was found (in which
    /// case `node` was not linked and is still owned by the caller).
    pub fn insert_no_dup(&self, node: *mut Node<T>) -> bool {
        self.insert_impl(node, true)
    }

    fn erase_node_once(&self, node: *mut Node<T>) -> std::result::Result<(), EraseError> {
        let top_layer = unsafe { (*node).top_layer as usize };

        if unsafe { (*node).removed.load(AtomicOrdering::Relaxed) } {
            return Err(EraseError::AlreadyRemoved);
        }
        if !unsafe { (*node).try_acquire_modify() } {
            return Err(EraseError::Busy);
        }
        unsafe { (*node).removed.store(true, AtomicOrdering::Release) };

        if !unsafe { (*node).is_fully_linked.load(AtomicOrdering::Relaxed) } {
            unsafe { (*node).release_modify() };
            return Err(EraseError::AlreadyUnlinked);
        }

        let mut prevs: Vec<*mut Node<T>> = vec![ptr::null_mut(); self.max_layer];
        let mut nexts: Vec<*mut Node<T>> = vec![ptr::null_mut(); self.max_layer];
        let mut attempt = 0u32;

        'retry: loop {
            attempt += 1;
            if attempt == RETRY_WARN_THRESHOLD {
                log::warn!("[RawSkipList] erase retried {attempt} times, top_layer={top_layer}");
            }
            let mut cur = self.head;
            unsafe { (*cur).grab() };

            for layer in (0..self.max_layer).rev() {
                loop {
                    let next = unsafe { self.next_at_layer(cur, layer) };
                    let cmp = self.cmp_nodes(node, next);

                    if cmp == Ordering::Greater {
                        let prev_cur = cur;
                        cur = next;
                        unsafe { (*prev_cur).release() };
                        continue;
                    }
                    unsafe { (*next).release() };

                    if layer <= top_layer {
                        prevs[layer] = cur;
                        nexts[layer] = next;

                        let dup_with_above = layer < top_layer && prevs[layer] == prevs[layer + 1];
                        let mut locked_from = layer + 1;
                        let mut failed = false;

                        if !dup_with_above {
                            if unsafe { (*cur).try_acquire_modify() } {
                                locked_from = layer;
                            } else {
                                failed = true;
                            }
                        }
                        if !failed && !self.valid_pair(cur, next) {
                            failed = true;
                        }

                        if failed {
                            self.clear_flags(&prevs, locked_from, top_layer);
                            unsafe { (*cur).release() };
                            continue 'retry;
                        }

                        let next_again = unsafe { self.next_at_layer(cur, layer) };
                        unsafe { (*next_again).release() };
                        if next_again != next {
                            self.clear_flags(&prevs, layer, top_layer);
                            unsafe { (*cur).release() };
                            continue 'retry;
                        }
                    }

                    if layer > 0 {
                        break;
                    }

                    // bottom layer: unlink across 0..=top_layer
                    for l in 0..=top_layer {
                        unsafe {
                            (*prevs[l]).write_lock();
                            (*prevs[l]).next[l].store(nexts[l], AtomicOrdering::Release);
                            (*prevs[l]).write_unlock();
                        }
                    }
                    unsafe { (*node).is_fully_linked.store(false, AtomicOrdering::Release) };
                    self.clear_flags(&prevs, 0, top_layer);
                    unsafe { (*cur).release() };
                    unsafe { (*node).release_modify() };
                    self.num_entries.fetch_sub(1, AtomicOrdering::Relaxed);
                    return Ok(());
                }
            }
            unreachable!("max_layer >= 1, loop always commits or retries from the bottom layer")
        }
    }

    /// Erases `node`, retrying transparently while another thread holds
    /// `being_modified` on it. Already-removed/already-unlinked are
    /// benign and leave `size()` unchanged, per spec.md §7.
    pub fn erase_node(&self, node: *mut Node<T>) {
        loop {
            match self.erase_node_once(node) {
                Err(EraseError::Busy) => continue,
                _ => return,
            }
        }
    }

    /// Finds and erases the node matching `query`. Returns `false` if
    /// no such node exists.
    pub fn erase_by_key<Q>(&self, query: &Q) -> bool
    where
        C: KeyQuery<Q, T>,
    {
        let found = self.find_by_key(query, true);
        if found.is_null() {
            return false;
        }
        loop {
            match self.erase_node_once(found) {
                Err(EraseError::Busy) => continue,
                _ => break,
            }
        }
        unsafe { (*found).release() };
        true
    }

    pub fn is_valid_node(&self, node: *mut Node<T>) -> bool {
        unsafe { (*node).is_valid() }
    }

    pub fn is_safe_to_free(&self, node: *mut Node<T>) -> bool {
        unsafe { (*node).safe_to_free() }
    }

    /// Spins until `node` is safe to free, yielding the scheduler
    /// between attempts. Used by the busy-wait container.
    pub fn wait_for_free(&self, node: *mut Node<T>) {
        while !self.is_safe_to_free(node) {
            std::thread::yield_now();
        }
    }

    pub fn grab_node(&self, node: *mut Node<T>) {
        unsafe { (*node).grab() };
    }

    pub fn release_node(&self, node: *mut Node<T>) {
        unsafe { (*node).release() };
    }

    pub(crate) fn payload(&self, node: *mut Node<T>) -> &T {
        unsafe {
            (*node)
                .payload
                .as_data()
                .expect("payload() called on a sentinel node")
        }
    }
}

impl<T, C> Drop for RawSkipList<T, C> {
    fn drop(&mut self) {
        // SAFETY: head/tail were allocated by `Self::new` and never
        // exposed for independent freeing.
        unsafe {
            drop(Box::from_raw(self.head));
            drop(Box::from_raw(self.tail));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::NaturalOrder;

    fn new_list() -> RawSkipList<i32, NaturalOrder<i32>> {
        RawSkipList::new(NaturalOrder::new(), ListConfig::default()).unwrap()
    }

    fn drain(list: &RawSkipList<i32, NaturalOrder<i32>>) {
        let mut cursor = list.begin();
        while !cursor.is_null() {
            let next = list.next(cursor);
            list.erase_node(cursor);
            list.release_node(cursor);
            list.wait_for_free(cursor);
            unsafe { list.free_node(cursor) };
            cursor = next;
        }
    }

    fn collect(list: &RawSkipList<i32, NaturalOrder<i32>>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut cursor = list.begin();
        while !cursor.is_null() {
            out.push(*list.payload(cursor));
            let next = list.next(cursor);
            list.release_node(cursor);
            cursor = next;
        }
        out
    }

    #[test]
    fn basic_insert_find_erase() {
        let list = new_list();
        for &k in &[3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5] {
            let node = list.alloc_node(k);
            if !list.insert_no_dup(node) {
                unsafe { list.free_node(node) };
            }
        }

        assert_eq!(collect(&list), vec![1, 2, 3, 4, 5, 6, 9]);
        assert_eq!(list.size(), 7);

        assert!(list.erase_by_key(&4));
        assert_eq!(collect(&list), vec![1, 2, 3, 5, 6, 9]);
        assert_eq!(list.size(), 6);

        drain(&list);
    }

    #[test]
    fn range_queries() {
        let list = new_list();
        for k in (10..=100).step_by(10) {
            let node = list.alloc_node(k);
            list.insert(node);
        }

        let n = list.find_smaller_or_equal(&25);
        assert_eq!(*list.payload(n), 20);
        list.release_node(n);

        let n = list.find_greater_or_equal(&25);
        assert_eq!(*list.payload(n), 30);
        list.release_node(n);

        assert!(list.find(&25).is_null());
        assert!(list.find_smaller_or_equal(&5).is_null());
        assert!(list.find_greater_or_equal(&105).is_null());

        drain(&list);
    }

    #[test]
    fn reverse_iteration() {
        let list = new_list();
        for k in 0..15 {
            let node = list.alloc_node(k);
            list.insert(node);
        }

        let mut out = Vec::new();
        let mut cursor = list.end();
        while !cursor.is_null() {
            out.push(*list.payload(cursor));
            let prev = list.prev(cursor);
            list.release_node(cursor);
            cursor = prev;
        }
        assert_eq!(out, (0..15).rev().collect::<Vec<_>>());

        drain(&list);
    }

    #[test]
    fn empty_list_boundaries() {
        let list = new_list();
        assert!(list.begin().is_null());
        assert!(list.end().is_null());
        assert!(list.find(&1).is_null());
    }

    #[test]
    fn duplicate_insert_rejected() {
        let list = new_list();
        let a = list.alloc_node(5);
        assert!(list.insert_no_dup(a));

        let b = list.alloc_node(5);
        assert!(!list.insert_no_dup(b));
        unsafe { list.free_node(b) };

        assert_eq!(list.size(), 1);
        drain(&list);
    }

    #[test]
    fn fanout_one_caps_at_max_layer_minus_one() {
        let list: RawSkipList<i32, NaturalOrder<i32>> = RawSkipList::new(
            NaturalOrder::new(),
            ListConfig {
                fanout: 1,
                max_layer: 6,
            },
        )
        .unwrap();
        for _ in 0..50 {
            assert!(list.random_top_layer() <= 5);
        }
    }
}
