use core::borrow::Borrow;

use super::{OSRBTree, wrap};
use crate::NodeRef;

impl<T: Ord> OSRBTree<T> {
    /// Returns the one-indexed rank of `key`: one plus the number of keys in
    /// the tree strictly less than it. Equivalently, the position `key`
    /// would occupy in the sorted order if it were inserted now.
    ///
    /// The key does not have to be present.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([10, 20, 20, 30]);
    ///
    /// assert_eq!(tree.rank(&10), 1);
    /// assert_eq!(tree.rank(&20), 2);
    /// assert_eq!(tree.rank(&25), 4);
    /// assert_eq!(tree.rank(&31), 5);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }

    /// Returns the node at the one-indexed position `k` in sorted order, or
    /// `None` when `k` is outside `1..=len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([30, 10, 20]);
    ///
    /// let node = tree.find_kth(2).unwrap();
    /// assert_eq!(tree.key(node), &20);
    /// assert!(tree.find_kth(0).is_none());
    /// assert!(tree.find_kth(4).is_none());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn find_kth(&self, k: usize) -> Option<NodeRef> {
        wrap(self.raw.find_kth(k))
    }

    /// Returns the number of keys equal to `key`, computed from the ranks of
    /// the two bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([5, 5, 5, 3]);
    /// assert_eq!(tree.count(&5), 3);
    /// assert_eq!(tree.count(&4), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // rank counts keys strictly below its argument, so the multiplicity
        // is the gap between "below or equal" and "below".
        let below = self.raw.rank(key) - 1;
        let next_above = self.raw.upper_bound(key);
        let below_or_equal = if next_above.is_nil() {
            self.len()
        } else {
            self.raw.rank::<Q>(self.raw.key(next_above).borrow()) - 1
        };
        below_or_equal - below
    }
}
