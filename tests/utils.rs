extern crate chalk;
extern crate rand;

use chalk::utils::*;

#[test]
fn handle_pool() {
    let mut set = HandlePool::new();
    assert_eq!(set.len(), 0);

    let e1 = set.create();
    assert!(e1.is_valid());
    assert!(set.is_alive(e1));
    assert_eq!(set.len(), 1);

    let e2 = e1;
    assert!(set.is_alive(e2));
    assert!(!set.is_alive(Handle::nil()));

    assert!(set.free(e2));
    assert!(!set.is_alive(e1));
    assert!(!set.free(e1));
    assert_eq!(set.len(), 0);
}

#[test]
fn index_reuse() {
    let mut set = HandlePool::new();

    let mut v = vec![];
    for _ in 0..10 {
        v.push(set.create());
    }

    assert_eq!(set.len(), 10);
    for e in v.iter() {
        set.free(*e);
    }

    for _ in 0..10 {
        let e = set.create();
        assert!((e.index() as usize) < v.len());
        assert!(v[e.index() as usize].version() != e.version());
        assert!(!set.is_alive(v[e.index() as usize]));
    }
}

#[test]
fn index_compact_reuse() {
    let mut set = HandlePool::new();

    let mut v = vec![];
    for _ in 0..5 {
        for _ in 0..50 {
            v.push(set.create());
        }

        let size = v.len() / 2;
        for _ in 0..size {
            let len = v.len();
            set.free(v.swap_remove(rand::random::<usize>() % len));
        }
    }

    for i in v {
        set.free(i);
    }

    for index in 0..50 {
        let handle = set.create();
        assert_eq!(handle.index(), index);
    }
}

#[test]
fn handle_pool_iter() {
    let mut set = HandlePool::new();
    let v: Vec<_> = (0..10).map(|_| set.create()).collect();

    for (i, h) in v.iter().enumerate() {
        if i % 3 == 0 {
            set.free(*h);
        }
    }

    let alive: Vec<_> = set.iter().collect();
    assert_eq!(alive.len(), 6);
    assert!(alive.iter().all(|h| h.index() % 3 != 0));
    assert!(alive.windows(2).all(|w| w[0].index() < w[1].index()));
}

#[test]
fn object_pool() {
    let mut set = ObjectPool::new();

    let e1 = set.create(3);
    assert_eq!(set.get(e1), Some(&3));
    assert_eq!(set.len(), 1);

    if let Some(v) = set.get_mut(e1) {
        *v += 1;
    }

    assert_eq!(set.free(e1), Some(4));
    assert_eq!(set.len(), 0);
    assert_eq!(set.get(e1), None);
    assert_eq!(set.free(e1), None);

    // A recycled slot never answers to a stale handle.
    let e2 = set.create(5);
    assert_eq!(e2.index(), e1.index());
    assert_eq!(set.get(e1), None);
    assert_eq!(set.get(e2), Some(&5));
}

#[test]
fn object_pool_drain() {
    let mut set = ObjectPool::new();
    let handles: Vec<_> = (0..10).map(|i| set.create(i)).collect();

    assert_eq!(set.iter().count(), 10);

    let drained = set.drain();
    assert_eq!(drained.len(), 10);
    assert!(set.is_empty());

    for h in handles {
        assert!(!set.is_alive(h));
    }
}

#[test]
fn journal() {
    let journal = Journal::new();
    let other = journal.clone();

    other.record("create");
    other.record("delete");
    assert_eq!(journal.len(), 2);
    assert_eq!(journal.count(|v| *v == "delete"), 1);

    journal.raise("GL_INVALID_ENUM");
    assert_eq!(other.take_error(), Some("GL_INVALID_ENUM".to_owned()));
}
