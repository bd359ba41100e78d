use alloc::vec::Vec;

use super::handle::Handle;

/// Slot arena backing the tree's nodes.
///
/// Slot 0 is permanently reserved so that [`Handle::NIL`] never aliases a
/// live node; it is materialized as a vacant slot on first allocation and is
/// neither handed out nor free-listed. Accessing it - or any freed slot -
/// panics, which is how stale handles fail loudly instead of corrupting the
/// tree.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            // One extra slot for the reserved sentinel.
            slots: Vec::with_capacity(capacity.saturating_add(1)),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity().saturating_sub(1)
    }

    /// Number of live elements (the sentinel slot does not count).
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len() + 1)
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot/handle.
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            if self.slots.is_empty() {
                // Materialize the reserved sentinel slot at index 0.
                self.slots.push(None);
            }
            // Use strict less-than to ensure total element count doesn't exceed Size::MAX.
            // Size::MAX == Handle::MAX, so we need slots.len() < Handle::MAX before push,
            // which means at most Handle::MAX elements after push.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns mutable references to two distinct elements at once.
    pub(crate) fn get_pair_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        assert!(a != b, "`Arena::get_pair_mut()` - `a` and `b` must be distinct!");
        let (i, j) = (a.to_index(), b.to_index());
        let invalid = "`Arena::get_pair_mut()` - `handle` is invalid!";
        if i < j {
            let (lo, hi) = self.slots.split_at_mut(j);
            (lo[i].as_mut().expect(invalid), hi[0].as_mut().expect(invalid))
        } else {
            let (lo, hi) = self.slots.split_at_mut(i);
            let (a, b) = (hi[0].as_mut().expect(invalid), lo[j].as_mut().expect(invalid));
            (a, b)
        }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
