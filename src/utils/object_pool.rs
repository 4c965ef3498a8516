use super::handle::Handle;
use super::handle_pool::HandlePool;

/// A named object collections. Every time u create or free a handle, a
/// attached instance `T` will be created/ freed.
#[derive(Debug)]
pub struct ObjectPool<T: Sized> {
    handles: HandlePool,
    entries: Vec<Option<T>>,
}

impl<T: Sized> Default for ObjectPool<T> {
    fn default() -> Self {
        ObjectPool::new()
    }
}

impl<T: Sized> ObjectPool<T> {
    pub fn new() -> Self {
        ObjectPool {
            handles: HandlePool::new(),
            entries: Vec::new(),
        }
    }

    /// Creates a `T` and named it with `Handle`.
    pub fn create(&mut self, value: T) -> Handle {
        let handle = self.handles.create();

        if handle.index() as usize >= self.entries.len() {
            self.entries.push(Some(value));
        } else {
            self.entries[handle.index() as usize] = Some(value);
        }

        handle
    }

    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if self.handles.is_alive(handle) {
            self.entries[handle.index() as usize].as_ref()
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if self.handles.is_alive(handle) {
            self.entries[handle.index() as usize].as_mut()
        } else {
            None
        }
    }

    #[inline]
    pub fn is_alive(&self, handle: Handle) -> bool {
        self.handles.is_alive(handle)
    }

    /// Recycles the value with name `Handle`.
    pub fn free(&mut self, handle: Handle) -> Option<T> {
        if self.handles.free(handle) {
            self.entries[handle.index() as usize].take()
        } else {
            None
        }
    }

    /// Frees every alive object, returning them in index order.
    pub fn drain(&mut self) -> Vec<(Handle, T)> {
        let handles: Vec<_> = self.handles.iter().collect();
        handles
            .into_iter()
            .filter_map(|h| self.free(h).map(|v| (h, v)))
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the alive objects and their handles.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> + '_ {
        let entries = &self.entries;
        self.handles
            .iter()
            .filter_map(move |h| entries[h.index() as usize].as_ref().map(|v| (h, v)))
    }
}
