use super::handle::Handle;
use super::size::Size;

/// Node color tag for the red-black invariants.
///
/// The sentinel is black by definition; the tree's color accessor
/// special-cases it, so the tag is only ever stored on real nodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A red-black tree node with subtree-size augmentation.
///
/// Links are plain [`Handle`]s; "no child"/"no parent" is [`Handle::NIL`].
/// `size` counts the real nodes in the subtree rooted here, including the
/// node itself, and is kept consistent across every structural mutation.
#[derive(Clone)]
pub(crate) struct RbNode<T> {
    pub(crate) parent: Handle,
    pub(crate) left: Handle,
    pub(crate) right: Handle,
    pub(crate) size: Size,
    pub(crate) color: Color,
    pub(crate) key: T,
}

impl<T> RbNode<T> {
    /// A freshly inserted node: red, size 1, both children nil.
    pub(crate) const fn new(key: T, parent: Handle) -> Self {
        Self {
            parent,
            left: Handle::NIL,
            right: Handle::NIL,
            size: Size::ONE,
            color: Color::Red,
            key,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_shape() {
        let node = RbNode::new(42u32, Handle::NIL);
        assert_eq!(node.color, Color::Red);
        assert_eq!(node.size, Size::ONE);
        assert!(node.left.is_nil());
        assert!(node.right.is_nil());
        assert!(node.parent.is_nil());
    }
}
