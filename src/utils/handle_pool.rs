use std::cmp::Ordering;
use std::collections::binary_heap::BinaryHeap;
use std::marker::PhantomData;

use super::handle::{HandleIndex, HandleLike};

#[derive(PartialEq, Eq)]
struct InverseHandleIndex(HandleIndex);

impl PartialOrd for InverseHandleIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InverseHandleIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

/// `HandlePool` manages a collection of handles with continuous indices. The
/// lowest free index is always recycled first, so iteration order follows
/// the order in which slots were first occupied.
///
/// A version is odd while its slot is alive and even once freed.
pub struct HandlePool<H: HandleLike> {
    versions: Vec<HandleIndex>,
    frees: BinaryHeap<InverseHandleIndex>,
    _phantom: PhantomData<H>,
}

impl<H: HandleLike> Default for HandlePool<H> {
    fn default() -> Self {
        HandlePool::new()
    }
}

impl<H: HandleLike> HandlePool<H> {
    pub fn new() -> Self {
        HandlePool {
            versions: Vec::new(),
            frees: BinaryHeap::new(),
            _phantom: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        HandlePool {
            versions: Vec::with_capacity(capacity),
            frees: BinaryHeap::with_capacity(capacity),
            _phantom: PhantomData,
        }
    }

    /// Creates an unused handle.
    pub fn create(&mut self) -> H {
        if let Some(InverseHandleIndex(index)) = self.frees.pop() {
            let version = &mut self.versions[index as usize];
            *version += 1;
            H::new(index, *version)
        } else {
            self.versions.push(1);
            H::new(self.versions.len() as HandleIndex - 1, 1)
        }
    }

    /// Returns true if this handle was created by this pool, and has not been
    /// freed yet.
    #[inline]
    pub fn is_alive(&self, handle: H) -> bool {
        let index = handle.index() as usize;
        self.is_alive_at(index) && self.versions[index] == handle.version()
    }

    #[inline]
    fn is_alive_at(&self, index: usize) -> bool {
        index < self.versions.len() && (self.versions[index] & 0x1) == 1
    }

    /// Recycles the handle index, and marks its version as dead.
    pub fn free(&mut self, handle: H) -> bool {
        if !self.is_alive(handle) {
            return false;
        }

        self.versions[handle.index() as usize] += 1;
        self.frees.push(InverseHandleIndex(handle.index()));
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over alive handles in index order.
    #[inline]
    pub fn iter(&self) -> Iter<H> {
        Iter {
            versions: &self.versions,
            index: 0,
            _phantom: PhantomData,
        }
    }
}

pub struct Iter<'a, H: HandleLike> {
    versions: &'a [HandleIndex],
    index: usize,
    _phantom: PhantomData<H>,
}

impl<'a, H: HandleLike> Iterator for Iter<'a, H> {
    type Item = H;

    fn next(&mut self) -> Option<H> {
        while self.index < self.versions.len() {
            let index = self.index;
            self.index += 1;

            let version = self.versions[index];
            if version & 0x1 == 1 {
                return Some(H::new(index as HandleIndex, version));
            }
        }

        None
    }
}

#[cfg(test)]
mod test {
    use super::super::handle::Handle;
    use super::*;

    #[test]
    fn basic() {
        let mut pool = HandlePool::<Handle>::new();
        let e1 = pool.create();
        assert!(pool.is_alive(e1));
        assert_eq!(pool.len(), 1);

        let e2 = pool.create();
        assert!(pool.is_alive(e2));
        assert_eq!(pool.len(), 2);

        assert!(pool.free(e1));
        assert!(!pool.is_alive(e1));
        assert!(!pool.free(e1));
        assert_eq!(pool.len(), 1);

        let e3 = pool.create();
        assert_eq!(e3.index(), e1.index());
        assert!(e3.version() > e1.version());
        assert!(!pool.is_alive(e1));
        assert!(pool.is_alive(e3));
    }

    #[test]
    fn recycles_lowest_index() {
        let mut pool = HandlePool::<Handle>::with_capacity(4);
        let handles: Vec<Handle> = (0..4).map(|_| pool.create()).collect();

        pool.free(handles[3]);
        pool.free(handles[1]);
        assert_eq!(pool.create().index(), 1);
        assert_eq!(pool.create().index(), 3);
    }

    #[test]
    fn iter() {
        let mut pool = HandlePool::<Handle>::new();
        let handles: Vec<Handle> = (0..5).map(|_| pool.create()).collect();
        pool.free(handles[0]);
        pool.free(handles[3]);

        let alive: Vec<Handle> = pool.iter().collect();
        assert_eq!(alive, vec![handles[1], handles[2], handles[4]]);
    }
}
