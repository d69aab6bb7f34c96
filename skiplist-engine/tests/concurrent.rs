//! Multi-threaded behavior: disjoint concurrent inserts, concurrent
//! insert-vs-erase, and cursor safety across a concurrent erase.
//!
//! These mirror the seed scenarios used while designing the engine's
//! retry protocols, scaled down from the original 0..999_999 range so
//! the suite runs quickly without losing the cross-thread contention
//! that actually exercises the retry paths.

use skiplist_engine::{OrderedSet, OrderedSetGc};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const RANGE: usize = 200_000;
const THREADS: usize = 8;

#[test]
fn concurrent_disjoint_insert_forward_walk_is_sorted_and_complete() {
    let set = Arc::new(OrderedSet::new());
    let per_thread = RANGE / THREADS;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for i in (t * per_thread)..((t + 1) * per_thread) {
                    set.insert(i);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(set.len(), RANGE);

    let mut expected = 0usize;
    let mut cursor = set.begin();
    while !cursor.is_sentinel() {
        assert_eq!(*cursor.get().unwrap(), expected);
        expected += 1;
        cursor = cursor.next();
    }
    assert_eq!(expected, RANGE);
}

#[test]
fn concurrent_insert_and_erase_converges_to_expected_content() {
    const STEP: usize = 10;
    const COUNT: usize = 2_000;

    let set = Arc::new(OrderedSet::new());
    for i in 0..COUNT {
        set.insert(i * STEP);
    }

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for i in (t * (COUNT / 4))..((t + 1) * (COUNT / 4)) {
                    set.insert(i * STEP + STEP / 2);
                }
            })
        })
        .collect();

    let erasers: Vec<_> = (0..4)
        .map(|t| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for i in (t * (COUNT / 4))..((t + 1) * (COUNT / 4)) {
                    set.erase_key(&(i * STEP));
                }
            })
        })
        .collect();

    for h in writers.into_iter().chain(erasers) {
        h.join().unwrap();
    }

    assert_eq!(set.len(), COUNT);
    let mut cursor = set.begin();
    let mut seen = 0;
    while !cursor.is_sentinel() {
        let value = *cursor.get().unwrap();
        assert_eq!(value % STEP, STEP / 2);
        seen += 1;
        cursor = cursor.next();
    }
    assert_eq!(seen, COUNT);
}

#[test]
fn cursor_survives_concurrent_erase_and_advances_correctly() {
    let set = Arc::new(OrderedSet::new());
    for k in [10, 20, 30] {
        set.insert(k);
    }

    let reader_set = Arc::clone(&set);
    let reader = thread::spawn(move || {
        let cursor = reader_set.find(&20);
        assert!(!cursor.is_sentinel());
        thread::sleep(Duration::from_millis(50));
        // `cursor` still holds a live reference: the node must not
        // have been freed out from under it even though another
        // thread erased it while we slept.
        assert_eq!(*cursor.get().unwrap(), 20);
        let successor = cursor.next();
        assert_eq!(*successor.get().unwrap(), 30);
    });

    thread::sleep(Duration::from_millis(10));
    set.erase_key(&20);
    reader.join().unwrap();

    assert_eq!(set.len(), 2);
}

#[test]
fn gc_variant_survives_the_same_contention() {
    let set = Arc::new(OrderedSetGc::new());
    let per_thread = 20_000 / THREADS;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for i in (t * per_thread)..((t + 1) * per_thread) {
                    set.insert(i);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(set.len(), per_thread * THREADS);

    let erasers: Vec<_> = (0..THREADS)
        .map(|t| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for i in (t * per_thread)..((t + 1) * per_thread) {
                    if i % 2 == 0 {
                        set.erase_key(&i);
                    }
                }
            })
        })
        .collect();
    for h in erasers {
        h.join().unwrap();
    }

    let mut cursor = set.begin();
    let mut count = 0;
    while !cursor.is_sentinel() {
        assert_eq!(*cursor.get().unwrap() % 2, 1);
        count += 1;
        cursor = cursor.next();
    }
    assert_eq!(count, per_thread * THREADS / 2);
}
