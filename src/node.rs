//! The node substrate the tree engines are written against.

use core::{fmt, mem, ops::Not};

/// Which child slot of a node is meant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// A binary tree node that is either empty or holds a value and two children.
///
/// Every internal node has exactly two children, either of which may itself be empty. The
/// ordered-tree and balancing engines only ever touch a tree through this trait.
pub trait TreeNode: Sized {
    type Value: Ord;

    /// Returns a new empty node.
    fn empty() -> Self;

    /// Returns `true` if the node holds no value.
    fn is_empty(&self) -> bool;

    /// Returns the node's value, or `None` for an empty node.
    fn value(&self) -> Option<&Self::Value>;

    /// Replaces the node's value, returning the previous one.
    ///
    /// Setting a value on an empty node turns it into a leaf with two empty children. Clearing
    /// the value empties the node in place, dropping whatever children it had.
    fn set_value(&mut self, value: Option<Self::Value>) -> Option<Self::Value>;

    /// Returns the child in direction `dir`, or `None` for an empty node.
    fn child(&self, dir: Dir) -> Option<&Self>;

    /// Mutable counterpart of [`child`](TreeNode::child).
    fn child_mut(&mut self, dir: Dir) -> Option<&mut Self>;

    /// Replaces the child in direction `dir`, returning the previous child.
    ///
    /// # Panics
    ///
    /// Panics if `self` is empty; an empty node has no child slots.
    fn set_child(&mut self, dir: Dir, child: Self) -> Self;

    /// Returns a single-value node with two empty children.
    fn leaf(value: Self::Value) -> Self {
        let mut node = Self::empty();
        node.set_value(Some(value));
        node
    }

    /// Consumes the node, returning its value.
    fn into_value(mut self) -> Option<Self::Value> {
        self.set_value(None)
    }

    #[inline]
    fn left(&self) -> Option<&Self> {
        self.child(Dir::Left)
    }

    #[inline]
    fn right(&self) -> Option<&Self> {
        self.child(Dir::Right)
    }

    #[inline]
    fn set_left(&mut self, left: Self) -> Self {
        self.set_child(Dir::Left, left)
    }

    #[inline]
    fn set_right(&mut self, right: Self) -> Self {
        self.set_child(Dir::Right, right)
    }

    /// Detaches the child in direction `dir`, leaving an empty node in its slot.
    #[inline]
    fn take_child(&mut self, dir: Dir) -> Self {
        self.set_child(dir, Self::empty())
    }

    /// Rebuilds both children of `self` at once.
    fn compose(&mut self, left: Self, right: Self) {
        self.set_left(left);
        self.set_right(right);
    }
}

/// An owned tree node.
///
/// `Node` exclusively owns its children; moving a subtree between slots transfers it, and
/// dropping a node releases its whole subtree.
///
/// Cloning, comparing, formatting and dropping all walk the tree with an explicit stack, so a
/// degenerate chain of any length is handled without deep recursion.
pub struct Node<T> {
    inner: Option<Box<Inner<T>>>,
}

struct Inner<T> {
    value: T,
    children: [Node<T>; 2],
}

impl<T> Node<T> {
    /// Returns a new empty node.
    pub const fn new() -> Node<T> {
        Node { inner: None }
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Node::new()
    }
}

impl<T: Ord> TreeNode for Node<T> {
    type Value = T;

    #[inline]
    fn empty() -> Self {
        Node::new()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    #[inline]
    fn value(&self) -> Option<&T> {
        self.inner.as_ref().map(|inner| &inner.value)
    }

    fn set_value(&mut self, value: Option<T>) -> Option<T> {
        let Some(value) = value else {
            return self.inner.take().map(|inner| inner.value);
        };

        if let Some(inner) = self.inner.as_mut() {
            return Some(mem::replace(&mut inner.value, value));
        }

        self.inner = Some(Box::new(Inner {
            value,
            children: [Node::new(), Node::new()],
        }));

        None
    }

    #[inline]
    fn child(&self, dir: Dir) -> Option<&Self> {
        self.inner.as_ref().map(|inner| &inner.children[dir as usize])
    }

    #[inline]
    fn child_mut(&mut self, dir: Dir) -> Option<&mut Self> {
        self.inner
            .as_mut()
            .map(|inner| &mut inner.children[dir as usize])
    }

    fn set_child(&mut self, dir: Dir, child: Self) -> Self {
        match self.inner.as_mut() {
            Some(inner) => mem::replace(&mut inner.children[dir as usize], child),
            None => panic!("cannot attach a {dir:?} child to an empty node"),
        }
    }
}

// Tears the subtree down with an explicit stack so that long unbalanced chains cannot exhaust
// the call stack.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Inner<T>>> = self.inner.take().into_iter().collect();

        while let Some(mut inner) = stack.pop() {
            for child in &mut inner.children {
                if let Some(grandchild) = child.inner.take() {
                    stack.push(grandchild);
                }
            }
        }
    }
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        enum Step<'a, T> {
            Enter(&'a Node<T>),
            Join(&'a T),
        }

        // Children are cloned before their parent; `built` holds the finished subtrees.
        let mut stack = vec![Step::Enter(self)];
        let mut built: Vec<Node<T>> = Vec::new();

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(node) => match node.inner.as_deref() {
                    None => built.push(Node::new()),
                    Some(inner) => {
                        let [left, right] = &inner.children;
                        stack.push(Step::Join(&inner.value));
                        stack.push(Step::Enter(right));
                        stack.push(Step::Enter(left));
                    }
                },
                Step::Join(value) => {
                    let right = built.pop().unwrap_or_default();
                    let left = built.pop().unwrap_or_default();

                    built.push(Node {
                        inner: Some(Box::new(Inner {
                            value: value.clone(),
                            children: [left, right],
                        })),
                    });
                }
            }
        }

        built.pop().unwrap_or_default()
    }
}

impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];

        while let Some((a, b)) = stack.pop() {
            match (a.inner.as_deref(), b.inner.as_deref()) {
                (None, None) => {}
                (Some(a), Some(b)) if a.value == b.value => {
                    let [a_left, a_right] = &a.children;
                    let [b_left, b_right] = &b.children;
                    stack.push((a_right, b_right));
                    stack.push((a_left, b_left));
                }
                _ => return false,
            }
        }

        true
    }
}

impl<T: Eq> Eq for Node<T> {}

// Renders as `value[left, right]`, with `*` for empty nodes and a bare `value` for leaves.
impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a, T> {
            Node(&'a Node<T>),
            Text(&'static str),
        }

        let mut stack = vec![Piece::Node(self)];

        while let Some(piece) = stack.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };

            let Some(inner) = node.inner.as_deref() else {
                f.write_str("*")?;
                continue;
            };

            write!(f, "{:?}", inner.value)?;

            let [left, right] = &inner.children;
            if left.inner.is_none() && right.inner.is_none() {
                continue;
            }

            stack.extend([
                Piece::Text("]"),
                Piece::Node(right),
                Piece::Text(", "),
                Piece::Node(left),
                Piece::Text("["),
            ]);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_node() {
        let node: Node<u32> = Node::empty();

        assert!(node.is_empty());
        assert_eq!(node.value(), None);
        assert!(node.left().is_none());
        assert!(node.right().is_none());
    }

    #[test]
    fn leaf_has_empty_children() {
        let node = Node::leaf(7);

        assert!(!node.is_empty());
        assert_eq!(node.value(), Some(&7));
        assert!(node.left().unwrap().is_empty());
        assert!(node.right().unwrap().is_empty());
    }

    #[test]
    fn set_value_reinitializes_empty_node() {
        let mut node = Node::empty();

        assert_eq!(node.set_value(Some(3)), None);
        assert_eq!(node.value(), Some(&3));
        assert_eq!(node.set_value(Some(4)), Some(3));
        assert_eq!(node.set_value(None), Some(4));
        assert!(node.is_empty());
    }

    #[test]
    fn set_child_returns_previous() {
        let mut node = Node::leaf(2);

        let old = node.set_left(Node::leaf(1));
        assert!(old.is_empty());

        let old = node.set_left(Node::leaf(0));
        assert_eq!(old.value(), Some(&1));
        assert_eq!(node.left().unwrap().value(), Some(&0));

        let taken = node.take_child(Dir::Left);
        assert_eq!(taken.into_value(), Some(0));
        assert!(node.left().unwrap().is_empty());
    }

    #[test]
    fn compose_replaces_both_children() {
        let mut node = Node::leaf(5);
        node.compose(Node::leaf(3), Node::leaf(8));

        assert_eq!(format!("{node:?}"), "5[3, 8]");

        node.compose(Node::empty(), Node::leaf(9));
        assert_eq!(format!("{node:?}"), "5[*, 9]");
    }

    #[test]
    #[should_panic(expected = "empty node")]
    fn attach_to_empty_panics() {
        let mut node: Node<u32> = Node::empty();
        node.set_child(Dir::Right, Node::leaf(1));
    }

    #[test]
    fn dir_not() {
        assert_eq!(!Dir::Left, Dir::Right);
        assert_eq!(!Dir::Right, Dir::Left);
    }

    #[test]
    fn equality_compares_shape_and_values() {
        let mut a = Node::leaf(2);
        a.compose(Node::leaf(1), Node::empty());

        let mut b = Node::leaf(2);
        b.compose(Node::empty(), Node::leaf(1));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(Node::leaf(1), Node::leaf(2));
        assert_ne!(Node::leaf(1), Node::empty());
    }

    // Root `len - 1` with a left spine running down to 0.
    fn left_chain(len: u32) -> Node<u32> {
        let mut chain = Node::leaf(0u32);

        for value in 1..len {
            let mut parent = Node::leaf(value);
            parent.set_left(chain);
            chain = parent;
        }

        chain
    }

    #[test]
    fn deep_chain_drops() {
        drop(left_chain(200_000));
    }

    #[test]
    fn deep_chain_clone_eq_debug() {
        let chain = left_chain(200_000);
        let copy = chain.clone();

        assert_eq!(chain, copy);

        let rendered = format!("{copy:?}");
        assert!(rendered.starts_with("199999[199998[199997["));
        assert!(rendered.ends_with("2[1[0, *], *], *]"));
    }
}
