use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, RbNode};
use super::size::Size;

const NIL: Handle = Handle::NIL;

/// The core order-statistic red-black tree backing `OSRBTree`.
///
/// Works entirely in [`Handle`]s; `NIL` stands in for every missing child and
/// the root's parent, so the structural code never branches on `Option`.
/// Every mutation leaves the red-black invariants and the subtree-size
/// augmentation intact.
#[derive(Clone)]
pub(crate) struct RawOSRBTree<T> {
    /// Arena storing all tree nodes. Slot 0 stays vacant for the sentinel.
    nodes: Arena<RbNode<T>>,
    /// Handle to the root node, `NIL` when the tree is empty.
    root: Handle,
}

impl<T> RawOSRBTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: NIL,
        }
    }

    /// Creates a new tree with the specified capacity.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: NIL,
        }
    }

    /// Returns the number of keys in the tree (the root's subtree size).
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    /// Returns true if the tree contains no keys.
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Returns the capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Releases every node at once; no per-node walk is needed.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = NIL;
    }

    /// Returns a reference to the key stored at `handle`.
    ///
    /// Panics if `handle` is `NIL` or no longer names a live node.
    pub(crate) fn key(&self, handle: Handle) -> &T {
        &self.node(handle).key
    }

    /// Handle of the minimum node, `NIL` when empty.
    pub(crate) fn first(&self) -> Handle {
        if self.root.is_nil() { NIL } else { self.subtree_min(self.root) }
    }

    /// Handle of the maximum node, `NIL` when empty.
    pub(crate) fn last(&self) -> Handle {
        if self.root.is_nil() { NIL } else { self.subtree_max(self.root) }
    }

    /// In-order next node, `NIL` if `handle` is the maximum.
    pub(crate) fn successor(&self, handle: Handle) -> Handle {
        let right = self.node(handle).right;
        if !right.is_nil() {
            return self.subtree_min(right);
        }
        let mut x = handle;
        let mut parent = self.node(x).parent;
        while !parent.is_nil() && x == self.node(parent).right {
            x = parent;
            parent = self.node(parent).parent;
        }
        parent
    }

    /// In-order previous node, `NIL` if `handle` is the minimum.
    pub(crate) fn predecessor(&self, handle: Handle) -> Handle {
        let left = self.node(handle).left;
        if !left.is_nil() {
            return self.subtree_max(left);
        }
        let mut x = handle;
        let mut parent = self.node(x).parent;
        while !parent.is_nil() && x == self.node(parent).left {
            x = parent;
            parent = self.node(parent).parent;
        }
        parent
    }

    /// Drains all keys in sorted order with an explicit stack-based in-order
    /// walk, leaving the tree empty. O(n), no rebalancing.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.len());
        let mut stack: Vec<Handle> = Vec::new();
        let mut current = self.root;
        while !current.is_nil() || !stack.is_empty() {
            while !current.is_nil() {
                stack.push(current);
                current = self.node(current).left;
            }
            if let Some(handle) = stack.pop() {
                current = self.node(handle).right;
                result.push(self.nodes.take(handle).key);
            }
        }
        self.root = NIL;
        self.nodes.clear();
        result
    }

    fn node(&self, handle: Handle) -> &RbNode<T> {
        self.nodes.get(handle)
    }

    fn node_mut(&mut self, handle: Handle) -> &mut RbNode<T> {
        self.nodes.get_mut(handle)
    }

    /// Subtree size, with the sentinel contributing 0.
    fn size_of(&self, handle: Handle) -> usize {
        if handle.is_nil() { 0 } else { self.node(handle).size.to_usize() }
    }

    /// Node color, with the sentinel counting as black.
    fn color_of(&self, handle: Handle) -> Color {
        if handle.is_nil() { Color::Black } else { self.node(handle).color }
    }

    fn subtree_min(&self, mut handle: Handle) -> Handle {
        while !self.node(handle).left.is_nil() {
            handle = self.node(handle).left;
        }
        handle
    }

    fn subtree_max(&self, mut handle: Handle) -> Handle {
        while !self.node(handle).right.is_nil() {
            handle = self.node(handle).right;
        }
        handle
    }

    /// Recomputes `size` from the (already correct) child sizes.
    fn update_size(&mut self, handle: Handle) {
        let (left, right) = {
            let node = self.node(handle);
            (node.left, node.right)
        };
        let size = Size::from_usize(1 + self.size_of(left) + self.size_of(right));
        self.node_mut(handle).size = size;
    }

    /// Recomputes sizes from `handle` up to the root.
    fn update_sizes_to_root(&mut self, mut handle: Handle) {
        while !handle.is_nil() {
            self.update_size(handle);
            handle = self.node(handle).parent;
        }
    }

    /// Swaps `old` for `new` in `parent`'s child slot; `parent == NIL` means
    /// `old` was the root.
    fn replace_child(&mut self, parent: Handle, old: Handle, new: Handle) {
        if parent.is_nil() {
            self.root = new;
        } else if self.node(parent).left == old {
            self.node_mut(parent).left = new;
        } else {
            self.node_mut(parent).right = new;
        }
    }

    /// Left rotation at `x`; `x.right` must be a real node. Sizes of the two
    /// rotated nodes are the only ones affected and are recomputed here.
    fn rotate_left(&mut self, x: Handle) {
        let y = self.node(x).right;
        let parent = self.node(x).parent;
        self.replace_child(parent, x, y);
        self.node_mut(y).parent = parent;
        let moved = self.node(y).left;
        self.node_mut(x).right = moved;
        if !moved.is_nil() {
            self.node_mut(moved).parent = x;
        }
        self.node_mut(y).left = x;
        self.node_mut(x).parent = y;
        self.update_size(x);
        self.update_size(y);
    }

    /// Right rotation at `x`; `x.left` must be a real node.
    fn rotate_right(&mut self, x: Handle) {
        let y = self.node(x).left;
        let parent = self.node(x).parent;
        self.replace_child(parent, x, y);
        self.node_mut(y).parent = parent;
        let moved = self.node(y).right;
        self.node_mut(x).left = moved;
        if !moved.is_nil() {
            self.node_mut(moved).parent = x;
        }
        self.node_mut(y).right = x;
        self.node_mut(x).parent = y;
        self.update_size(x);
        self.update_size(y);
    }

    /// Removes the node at `handle` and returns its key.
    ///
    /// `handle` must name a live node of this tree; a stale handle panics in
    /// the arena. When the node has two real children its key is swapped with
    /// the in-order successor's and the successor is spliced out instead, so
    /// the key observed at the original position changes.
    pub(crate) fn remove(&mut self, mut z: Handle) -> T {
        if !self.node(z).left.is_nil() && !self.node(z).right.is_nil() {
            // Successor-copy deletion: the position keeps its node, the keys
            // trade places, and the successor (which has no left child) is
            // the node actually spliced out.
            let successor = self.subtree_min(self.node(z).right);
            let (a, b) = self.nodes.get_pair_mut(z, successor);
            core::mem::swap(&mut a.key, &mut b.key);
            z = successor;
        }

        let child = {
            let node = self.node(z);
            if !node.left.is_nil() { node.left } else { node.right }
        };
        if !child.is_nil() {
            // A black node with one real child: the child is red, promote it
            // into z's place and recolor it black.
            let parent = self.node(z).parent;
            self.node_mut(child).parent = parent;
            self.node_mut(child).color = Color::Black;
            self.replace_child(parent, z, child);
        } else {
            if self.node(z).color == Color::Black {
                // Splicing a black leaf shortens a black path; repair while
                // z is still linked so its siblings remain reachable.
                self.fix_double_black(z);
            }
            let parent = self.node(z).parent;
            self.replace_child(parent, z, NIL);
        }

        // z is unlinked but still records its old parent.
        let parent = self.node(z).parent;
        self.update_sizes_to_root(parent);
        self.nodes.take(z).key
    }

    /// Restores the red-black invariants after splicing out a black leaf.
    ///
    /// Walks toward the root carrying the "extra black"; each of the sibling
    /// configurations either terminates with at most two rotations or moves
    /// the violation one level up.
    fn fix_double_black(&mut self, mut x: Handle) {
        while x != self.root && self.node(x).color == Color::Black {
            let parent = self.node(x).parent;
            if x == self.node(parent).left {
                let mut sibling = self.node(parent).right;
                if self.node(sibling).color == Color::Red {
                    // Red sibling: rotate to expose a black one.
                    self.node_mut(parent).color = Color::Red;
                    self.node_mut(sibling).color = Color::Black;
                    self.rotate_left(parent);
                    sibling = self.node(parent).right;
                }
                let near = self.node(sibling).left;
                let far = self.node(sibling).right;
                if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                    self.node_mut(sibling).color = Color::Red;
                    if self.node(parent).color == Color::Red {
                        // A red parent absorbs the extra black.
                        self.node_mut(parent).color = Color::Black;
                        break;
                    }
                    x = parent;
                } else {
                    if self.color_of(near) == Color::Red {
                        // Move the red nephew into the far position.
                        self.node_mut(near).color = Color::Black;
                        self.node_mut(sibling).color = Color::Red;
                        self.rotate_right(sibling);
                        sibling = self.node(parent).right;
                    }
                    let far = self.node(sibling).right;
                    let parent_color = self.node(parent).color;
                    self.node_mut(sibling).color = parent_color;
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(far).color = Color::Black;
                    self.rotate_left(parent);
                    break;
                }
            } else {
                let mut sibling = self.node(parent).left;
                if self.node(sibling).color == Color::Red {
                    self.node_mut(parent).color = Color::Red;
                    self.node_mut(sibling).color = Color::Black;
                    self.rotate_right(parent);
                    sibling = self.node(parent).left;
                }
                let near = self.node(sibling).right;
                let far = self.node(sibling).left;
                if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                    self.node_mut(sibling).color = Color::Red;
                    if self.node(parent).color == Color::Red {
                        self.node_mut(parent).color = Color::Black;
                        break;
                    }
                    x = parent;
                } else {
                    if self.color_of(near) == Color::Red {
                        self.node_mut(near).color = Color::Black;
                        self.node_mut(sibling).color = Color::Red;
                        self.rotate_left(sibling);
                        sibling = self.node(parent).left;
                    }
                    let far = self.node(sibling).left;
                    let parent_color = self.node(parent).color;
                    self.node_mut(sibling).color = parent_color;
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(far).color = Color::Black;
                    self.rotate_right(parent);
                    break;
                }
            }
        }
        let root = self.root;
        self.node_mut(root).color = Color::Black;
    }
}

impl<T: Ord> RawOSRBTree<T> {
    /// Inserts `key`, returning the handle of the new node. Always succeeds;
    /// equal keys descend right, so duplicates land after their peers.
    pub(crate) fn insert(&mut self, key: T) -> Handle {
        let mut x = self.root;
        let mut parent = NIL;
        while !x.is_nil() {
            parent = x;
            let node = self.node(x);
            x = if key < node.key { node.left } else { node.right };
        }

        let new = self.nodes.alloc(RbNode::new(key, parent));
        if parent.is_nil() {
            self.root = new;
        } else if self.node(new).key < self.node(parent).key {
            self.node_mut(parent).left = new;
        } else {
            self.node_mut(parent).right = new;
        }

        self.update_sizes_to_root(parent);
        self.fix_double_red(new);
        new
    }

    /// Restores the red-black invariants after attaching a red leaf.
    ///
    /// While the parent is red: a red uncle means recolor and continue from
    /// the grandparent; a black uncle means straighten a zig-zag with one
    /// rotation, then rotate at the grandparent and stop.
    fn fix_double_red(&mut self, mut x: Handle) {
        while x != self.root && self.node(self.node(x).parent).color == Color::Red {
            let parent = self.node(x).parent;
            // The parent is red, so it cannot be the root and the
            // grandparent is a real (black) node.
            let grandparent = self.node(parent).parent;
            if parent == self.node(grandparent).left {
                let uncle = self.node(grandparent).right;
                if self.color_of(uncle) == Color::Red {
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(uncle).color = Color::Black;
                    self.node_mut(grandparent).color = Color::Red;
                    x = grandparent;
                } else {
                    if x == self.node(parent).right {
                        // Zig-zag: rotate the parent to make a straight line.
                        x = parent;
                        self.rotate_left(x);
                    }
                    let parent = self.node(x).parent;
                    let grandparent = self.node(parent).parent;
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(grandparent).color = Color::Red;
                    self.rotate_right(grandparent);
                    break;
                }
            } else {
                let uncle = self.node(grandparent).left;
                if self.color_of(uncle) == Color::Red {
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(uncle).color = Color::Black;
                    self.node_mut(grandparent).color = Color::Red;
                    x = grandparent;
                } else {
                    if x == self.node(parent).left {
                        x = parent;
                        self.rotate_right(x);
                    }
                    let parent = self.node(x).parent;
                    let grandparent = self.node(parent).parent;
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(grandparent).color = Color::Red;
                    self.rotate_left(grandparent);
                    break;
                }
            }
        }
        let root = self.root;
        self.node_mut(root).color = Color::Black;
    }

    /// Exact-match descent. Returns `NIL` when the key is absent.
    pub(crate) fn find<Q>(&self, key: &Q) -> Handle
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut x = self.root;
        while !x.is_nil() {
            let node = self.node(x);
            match key.cmp(node.key.borrow()) {
                Ordering::Less => x = node.left,
                Ordering::Greater => x = node.right,
                Ordering::Equal => return x,
            }
        }
        NIL
    }

    /// One-indexed rank: 1 + the number of keys strictly less than `key`.
    /// Accumulates `1 + size(left)` on every right turn.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut x = self.root;
        let mut rank = 1;
        while !x.is_nil() {
            let node = self.node(x);
            if node.key.borrow() < key {
                rank += 1 + self.size_of(node.left);
                x = node.right;
            } else {
                x = node.left;
            }
        }
        rank
    }

    /// Node at one-indexed in-order position `k`, `NIL` when `k` is outside
    /// `1..=len`.
    pub(crate) fn find_kth(&self, k: usize) -> Handle {
        let mut x = self.root;
        let mut k = k;
        while !x.is_nil() {
            let node = self.node(x);
            let position = 1 + self.size_of(node.left);
            match k.cmp(&position) {
                Ordering::Less => x = node.left,
                Ordering::Greater => {
                    k -= position;
                    x = node.right;
                }
                Ordering::Equal => return x,
            }
        }
        NIL
    }

    /// Leftmost node with key >= `key`, `NIL` when every key is smaller.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Handle
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut x = self.root;
        let mut candidate = NIL;
        while !x.is_nil() {
            let node = self.node(x);
            if node.key.borrow() < key {
                x = node.right;
            } else {
                candidate = x;
                x = node.left;
            }
        }
        candidate
    }

    /// Leftmost node with key > `key`, `NIL` when every key is <= `key`.
    pub(crate) fn upper_bound<Q>(&self, key: &Q) -> Handle
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut x = self.root;
        let mut candidate = NIL;
        while !x.is_nil() {
            let node = self.node(x);
            if node.key.borrow() <= key {
                x = node.right;
            } else {
                candidate = x;
                x = node.left;
            }
        }
        candidate
    }
}
