use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::handle::{Handle, HandleIndex};

/// `HandlePool` hands out versioned handles and recycles freed indices, lowest
/// index first.
///
/// Even versions mark free slots and odd versions mark live ones, so freeing a
/// handle bumps the version and every copy of it becomes stale at once.
#[derive(Debug, Default)]
pub struct HandlePool {
    versions: Vec<HandleIndex>,
    frees: BinaryHeap<Reverse<HandleIndex>>,
}

impl HandlePool {
    pub fn new() -> Self {
        HandlePool {
            versions: Vec::new(),
            frees: BinaryHeap::new(),
        }
    }

    /// Creates a unused `Handle`.
    pub fn create(&mut self) -> Handle {
        if let Some(Reverse(index)) = self.frees.pop() {
            let version = &mut self.versions[index as usize];
            *version += 1;
            Handle::new(index, *version)
        } else {
            self.versions.push(1);
            Handle::new(self.versions.len() as HandleIndex - 1, 1)
        }
    }

    /// Returns true if this `Handle` was created by this pool and has not been
    /// freed yet.
    #[inline]
    pub fn is_alive(&self, handle: Handle) -> bool {
        let index = handle.index() as usize;
        index < self.versions.len()
            && self.versions[index] & 0x1 == 1
            && self.versions[index] == handle.version()
    }

    /// Recycles the `Handle` index, and mark its version as dead.
    pub fn free(&mut self, handle: Handle) -> bool {
        if !self.is_alive(handle) {
            return false;
        }

        self.versions[handle.index() as usize] += 1;
        self.frees.push(Reverse(handle.index()));
        true
    }

    /// Returns the number of alive handles.
    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the alive handles in index order.
    pub fn iter(&self) -> impl Iterator<Item = Handle> + '_ {
        self.versions
            .iter()
            .enumerate()
            .filter(|(_, &v)| v & 0x1 == 1)
            .map(|(i, &v)| Handle::new(i as HandleIndex, v))
    }
}
