//! A shared, append-only record of the native calls a headless backend has
//! received.
//!
//! The backend keeps one end and hands out clones, so the record stays readable
//! after the backend itself has been boxed into a device. Clones share the same
//! storage and are bound to the thread that created them, like the native
//! context they stand in for.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
struct JournalState<T> {
    calls: Vec<T>,
    error: Option<String>,
    delay: usize,
}

#[derive(Debug)]
pub struct Journal<T> {
    state: Rc<RefCell<JournalState<T>>>,
}

impl<T> Clone for Journal<T> {
    fn clone(&self) -> Self {
        Journal {
            state: self.state.clone(),
        }
    }
}

impl<T> Default for Journal<T> {
    fn default() -> Self {
        Journal::new()
    }
}

impl<T> Journal<T> {
    pub fn new() -> Self {
        let state = JournalState {
            calls: Vec::new(),
            error: None,
            delay: 0,
        };

        Journal {
            state: Rc::new(RefCell::new(state)),
        }
    }

    #[inline]
    pub fn record(&self, call: T) {
        self.state.borrow_mut().calls.push(call);
    }

    /// Returns the number of calls recorded since the last `clear`.
    #[inline]
    pub fn len(&self) -> usize {
        self.state.borrow().calls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of recorded calls matching `predicate`.
    pub fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.state.borrow().calls.iter().filter(|v| predicate(v)).count()
    }

    pub fn clear(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Makes the next error query of the backend fail with `message`.
    pub fn raise<M: Into<String>>(&self, message: M) {
        self.raise_after(0, message);
    }

    /// Makes the error query of the backend fail with `message` once `checks`
    /// queries have passed.
    pub fn raise_after<M: Into<String>>(&self, checks: usize, message: M) {
        let mut state = self.state.borrow_mut();
        state.error = Some(message.into());
        state.delay = checks;
    }

    /// Takes the pending error raised with `raise`, if any is due.
    pub fn take_error(&self) -> Option<String> {
        let mut state = self.state.borrow_mut();
        if state.error.is_some() && state.delay > 0 {
            state.delay -= 1;
            return None;
        }

        state.error.take()
    }
}

impl<T: Clone> Journal<T> {
    /// Returns a snapshot of the recorded calls.
    pub fn calls(&self) -> Vec<T> {
        self.state.borrow().calls.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shared() {
        let journal = Journal::new();
        let other = journal.clone();

        journal.record(1);
        other.record(2);
        assert_eq!(journal.calls(), vec![1, 2]);
        assert_eq!(other.count(|v| *v > 1), 1);

        other.raise("boom");
        assert_eq!(journal.take_error(), Some("boom".to_owned()));
        assert_eq!(journal.take_error(), None);

        other.raise_after(2, "late");
        assert_eq!(journal.take_error(), None);
        assert_eq!(journal.take_error(), None);
        assert_eq!(journal.take_error(), Some("late".to_owned()));
        assert_eq!(journal.take_error(), None);

        journal.clear();
        assert!(other.is_empty());
    }
}
