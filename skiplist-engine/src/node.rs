//! Node core (C1): storage, flags, reference count, and the per-node
//! readers-writer spinlock that protects a node's `next` array.
//!
//! Grounded on `skiplist_node` and the `_sl_*_an`/`skiplist_*_node`
//! functions in `examples/original_source/src/skiplist.cc`. The
//! intrusive byte-offset recovery of the original (`_get_entry`) is
//! replaced by storing the payload directly inside the node, per
//! spec.md's Design Notes §9(a).

use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, AtomicU32, AtomicUsize, Ordering};

/// What a node actually stores: a sentinel marker, or a user payload.
pub(crate) enum Payload<T> {
    Head,
    Tail,
    Data(T),
}

impl<T> Payload<T> {
    pub(crate) fn as_data(&self) -> Option<&T> {
        match self {
            Payload::Data(v) => Some(v),
            _ => None,
        }
    }
}

/// Low 20 bits: active readers of `next[*]`. Bit 20 and up: writer held.
/// Mirrors the packed `accessing_next` field and `_sl_read_lock_an` /
/// `_sl_write_lock_an` in the original.
const READER_UNIT: u32 = 0x0000_0001;
const READER_MASK: u32 = 0x000f_ffff;
const WRITER_UNIT: u32 = 0x0010_0000;
const WRITER_MASK: u32 = 0xfff0_0000;

/// A node in the skiplist: sentinel or data, with the per-node flags,
/// reference count, and `next` pointer array described in spec.md §3.
pub(crate) struct Node<T> {
    pub(crate) payload: Payload<T>,
    /// `next[l]` for `l` in `0..=top_layer`.
    pub(crate) next: Box<[AtomicPtr<Node<T>>]>,
    pub(crate) top_layer: u8,
    pub(crate) is_fully_linked: AtomicBool,
    pub(crate) being_modified: AtomicBool,
    pub(crate) removed: AtomicBool,
    ref_count: AtomicUsize,
    access: AtomicU32,
}

impl<T> Node<T> {
    /// Builds a node with `top_layer + 1` next-slots, all null, flags
    /// cleared. `top_layer` is clipped to `u8::MAX` per spec.md §4.1.
    fn with_layers(payload: Payload<T>, top_layer: usize) -> Self {
        let top_layer = top_layer.min(u8::MAX as usize) as u8;
        let mut next = Vec::with_capacity(top_layer as usize + 1);
        for _ in 0..=top_layer {
            next.push(AtomicPtr::new(ptr::null_mut()));
        }
        Self {
            payload,
            next: next.into_boxed_slice(),
            top_layer,
            is_fully_linked: AtomicBool::new(false),
            being_modified: AtomicBool::new(false),
            removed: AtomicBool::new(false),
            ref_count: AtomicUsize::new(0),
            access: AtomicU32::new(0),
        }
    }

    pub(crate) fn new_head(max_layer: usize) -> Self {
        let node = Self::with_layers(Payload::Head, max_layer.saturating_sub(1));
        node.is_fully_linked.store(true, Ordering::Relaxed);
        node
    }

    pub(crate) fn new_tail(max_layer: usize) -> Self {
        let node = Self::with_layers(Payload::Tail, max_layer.saturating_sub(1));
        node.is_fully_linked.store(true, Ordering::Relaxed);
        node
    }

    pub(crate) fn new_data(payload: T, top_layer: usize) -> Self {
        Self::with_layers(Payload::Data(payload), top_layer)
    }

    pub(crate) fn is_head(&self) -> bool {
        matches!(self.payload, Payload::Head)
    }

    pub(crate) fn is_tail(&self) -> bool {
        matches!(self.payload, Payload::Tail)
    }

    /// Invariant 1/"valid node": fully linked and not removed.
    pub(crate) fn is_valid(&self) -> bool {
        !self.removed.load(Ordering::Relaxed) && self.is_fully_linked.load(Ordering::Relaxed)
    }

    /// Increments the external reference count. Every `grab` must be
    /// matched by exactly one `release`.
    pub(crate) fn grab(&self) {
        self.ref_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Decrements the external reference count. Releasing a zero count
    /// is a bug in the caller.
    pub(crate) fn release(&self) {
        let prev = self.ref_count.fetch_sub(1, Ordering::Relaxed);
        debug_assert!(prev > 0, "released a node with zero ref_count");
    }

    pub(crate) fn ref_count(&self) -> usize {
        self.ref_count.load(Ordering::Relaxed)
    }

    /// Readers-writer spinlock acquire for `next[*]` reads. Backs off
    /// and yields to the scheduler while a writer holds the lock.
    pub(crate) fn read_lock(&self) {
        loop {
            let mut current = self.access.load(Ordering::Relaxed);
            while current & WRITER_MASK != 0 {
                std::thread::yield_now();
                current = self.access.load(Ordering::Relaxed);
            }

            let observed = self.access.fetch_add(READER_UNIT, Ordering::Relaxed) + READER_UNIT;
            if observed & WRITER_MASK == 0 {
                return;
            }
            self.access.fetch_sub(READER_UNIT, Ordering::Relaxed);
        }
    }

    pub(crate) fn read_unlock(&self) {
        self.access.fetch_sub(READER_UNIT, Ordering::Relaxed);
    }

    /// Writer-exclusive spinlock acquire for swinging `next[*]`. Waits
    /// for any other writer, then drains readers before returning.
    pub(crate) fn write_lock(&self) {
        loop {
            let mut current = self.access.load(Ordering::Relaxed);
            while current & WRITER_MASK != 0 {
                std::thread::yield_now();
                current = self.access.load(Ordering::Relaxed);
            }

            let observed = self.access.fetch_add(WRITER_UNIT, Ordering::Relaxed) + WRITER_UNIT;
            if observed & WRITER_MASK == WRITER_UNIT {
                while self.access.load(Ordering::Relaxed) & READER_MASK != 0 {
                    std::thread::yield_now();
                }
                return;
            }
            self.access.fetch_sub(WRITER_UNIT, Ordering::Relaxed);
        }
    }

    pub(crate) fn write_unlock(&self) {
        self.access.fetch_sub(WRITER_UNIT, Ordering::Relaxed);
    }

    /// `being_modified` CAS-acquire. `true` on success.
    pub(crate) fn try_acquire_modify(&self) -> bool {
        self.being_modified
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed)
            .is_ok()
    }

    pub(crate) fn release_modify(&self) {
        self.being_modified.store(false, Ordering::Release);
    }

    /// Invariant 7: safe to free iff removed, not being modified, no
    /// in-flight readers/writers on `next[*]`, and no external refs.
    pub(crate) fn safe_to_free(&self) -> bool {
        self.access.load(Ordering::Relaxed) == 0
            && !self.being_modified.load(Ordering::Relaxed)
            && self.removed.load(Ordering::Relaxed)
            && self.ref_count() == 0
    }
}
