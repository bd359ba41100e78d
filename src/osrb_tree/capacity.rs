use super::OSRBTree;
use crate::raw::RawOSRBTree;

impl<T> OSRBTree<T> {
    /// Creates an empty tree with capacity for at least `capacity` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree: OSRBTree<i32> = OSRBTree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSRBTree {
            raw: RawOSRBTree::with_capacity(capacity),
        }
    }

    /// Returns the number of keys the tree can hold without reallocating its
    /// node arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree: OSRBTree<i32> = OSRBTree::with_capacity(32);
    /// assert!(tree.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
