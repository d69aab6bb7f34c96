//! Three-way comparators for payloads stored in the engine.
//!
//! `examples/original_source/include/skiplist.h` threads an opaque
//! `void *aux` pointer through to a C function pointer comparator.
//! Rust has no need for that indirection: an implementor of
//! [`Comparator`] can simply close over whatever auxiliary state it
//! needs. Sentinel comparisons are never routed through here — the
//! list core (see `raw.rs`) shortcuts them itself, exactly as
//! `_sl_cmp` does in the original.

use std::cmp::Ordering;
use std::marker::PhantomData;

/// Three-way comparator over payload type `T`.
///
/// Implementors must be consistent with a strict total order: for any
/// `a, b, c`, `compare(a, b) == Ordering::Equal` must imply `a` and `b`
/// are interchangeable for ordering purposes (spec.md invariant 4).
pub trait Comparator<T>: Send + Sync {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The default comparator for any `T: Ord`.
pub struct NaturalOrder<T>(PhantomData<fn(&T)>);

impl<T> NaturalOrder<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for NaturalOrder<T> {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: NaturalOrder holds no data; Send/Sync are trivially sound
// regardless of T.
unsafe impl<T> Send for NaturalOrder<T> {}
unsafe impl<T> Sync for NaturalOrder<T> {}

impl<T: Ord> Comparator<T> for NaturalOrder<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Compares a query of type `Q` against a stored payload `T`, so
/// `find`/`find_smaller_or_equal`/`find_greater_or_equal` can search by
/// a bare key without constructing a full `T`. Every `Comparator<T>`
/// can answer `T`-vs-`T` queries via the blanket impl below; the
/// ordered-map façade additionally answers `K`-vs-`MapEntry<K, V>`.
pub trait KeyQuery<Q: ?Sized, T>: Comparator<T> {
    fn compare_query(&self, query: &Q, candidate: &T) -> Ordering;
}

impl<T, C: Comparator<T>> KeyQuery<T, T> for C {
    fn compare_query(&self, query: &T, candidate: &T) -> Ordering {
        self.compare(query, candidate)
    }
}

/// A key/value pair for the ordered-map façade. Ordering compares the
/// key only, per spec.md §4.4 ("Comparator compares keys only").
#[derive(Debug, Clone)]
pub struct MapEntry<K, V> {
    pub key: K,
    pub value: V,
}

/// Wraps a `Comparator<K>` so it can order `MapEntry<K, V>` by key,
/// folding the ordered-map variant into the set engine per spec.md §1.
pub struct KeyComparator<K, V, C> {
    inner: C,
    _marker: PhantomData<fn(&K, &V)>,
}

impl<K, V, C> KeyComparator<K, V, C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

// SAFETY: the only non-phantom field is `inner: C`, and Send/Sync are
// derived from it below via the trait bound forwarding in `compare`.
unsafe impl<K, V, C: Send> Send for KeyComparator<K, V, C> {}
unsafe impl<K, V, C: Sync> Sync for KeyComparator<K, V, C> {}

impl<K, V, C: Comparator<K>> Comparator<MapEntry<K, V>> for KeyComparator<K, V, C> {
    fn compare(&self, a: &MapEntry<K, V>, b: &MapEntry<K, V>) -> Ordering {
        self.inner.compare(&a.key, &b.key)
    }
}

impl<K, V, C: Comparator<K>> KeyQuery<K, MapEntry<K, V>> for KeyComparator<K, V, C> {
    fn compare_query(&self, query: &K, candidate: &MapEntry<K, V>) -> Ordering {
        self.inner.compare(query, &candidate.key)
    }
}
