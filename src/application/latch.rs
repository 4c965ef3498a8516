use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// A value other threads can block on until it changes.
pub struct StateLatch<T> {
    m: Mutex<T>,
    v: Condvar,
}

impl<T: Copy + PartialEq> StateLatch<T> {
    pub fn new(value: T) -> Self {
        StateLatch {
            m: Mutex::new(value),
            v: Condvar::new(),
        }
    }

    #[inline]
    pub fn get(&self) -> T {
        *self.m.lock().unwrap()
    }

    pub fn set(&self, value: T) {
        let mut guard = self.m.lock().unwrap();
        *guard = value;
        self.v.notify_all();
    }

    /// Sets the latch to `to` if it currently holds `from`.
    pub fn transition(&self, from: T, to: T) -> bool {
        let mut guard = self.m.lock().unwrap();
        if *guard != from {
            return false;
        }

        *guard = to;
        self.v.notify_all();
        true
    }

    /// Blocks while `predicate` holds, or until `timeout` elapsed. Returns the
    /// last value observed.
    pub fn wait_while<P>(&self, predicate: P, timeout: Option<Duration>) -> T
    where
        P: Fn(T) -> bool,
    {
        let deadline = timeout.map(|v| Instant::now() + v);
        let mut guard = self.m.lock().unwrap();

        while predicate(*guard) {
            match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }

                    guard = self.v.wait_timeout(guard, deadline - now).unwrap().0;
                }
                None => guard = self.v.wait(guard).unwrap(),
            }
        }

        *guard
    }
}
