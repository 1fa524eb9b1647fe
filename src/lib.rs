//! An owned AVL tree over any totally ordered value type.
//
// Conventions used in comments:
// - The height of an empty tree is 0 and the height of a leaf is 1; heights count nodes, not
//   edges.
// - The balance factor of a node is `h(left) - h(right)`.
// - A node is balanced if its balance factor is -1, 0 or 1.
//
// The tree is built in layers:
// 1. `node`: the `TreeNode` contract and the owned `Node` that implements it.
// 2. `bst`: ordering, traversal and structural edits, written only against `TreeNode`.
// 3. `avl`: the balance factor, the four rotations, and the `Avl` rebalancing policy that the
//    edits in (2) are parameterized over.
//
// Insertion rebalances every node on the path back up to the root. Deletion rebalances only
// the node it was invoked on, so nodes between the deletion site and the promoted value may be
// left out of balance. Deleting from a tree whose nodes are all balanced leaves the root
// balanced; once deeper nodes have drifted, a later delete can leave the root at -2 or 2.

use core::{fmt, mem};

use log::debug;

pub mod avl;
pub mod bst;
pub mod invariants;
pub mod node;

mod debug;

#[cfg(any(test, feature = "model"))]
pub mod model;

#[cfg(test)]
mod tests;

pub use crate::{
    avl::{Avl, Balanced},
    bst::{OrderedTree, Rebalance, Unbalanced},
    invariants::InvariantViolation,
    node::{Dir, Node, TreeNode},
};

/// An AVL tree that owns its root.
///
/// The node-level operations in [`Balanced`] return a new root on every edit; `AvlTree` keeps
/// track of it so that callers can work through `&mut self`.
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Node<T>,
}

impl<T> AvlTree<T> {
    /// Returns a new empty tree.
    pub const fn new() -> AvlTree<T> {
        AvlTree { root: Node::new() }
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// Consumes the tree, returning its root node.
    pub fn into_root(self) -> Node<T> {
        self.root
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        self.root = Node::new();
    }
}

impl<T: Ord> AvlTree<T> {
    /// Returns `true` if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Returns the number of values in the tree.
    ///
    /// This walks the whole tree.
    pub fn len(&self) -> usize {
        self.root.size()
    }

    /// Returns the height of the tree; see [`OrderedTree::height`].
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Returns the balance factor of the root.
    pub fn balance_factor(&self) -> isize {
        self.root.balance_factor()
    }

    /// Returns `true` if the tree contains `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.root.is_member(value)
    }

    /// Inserts `value`. Inserting a value that is already present does nothing.
    pub fn insert(&mut self, value: T) {
        let root = mem::take(&mut self.root);
        self.root = root.insert(value);

        debug!(
            "insert: height {}, root balance factor {}",
            self.root.height(),
            self.root.balance_factor()
        );
    }

    /// Deletes `value`. Deleting a value that is not present does nothing.
    pub fn delete(&mut self, value: &T) {
        let root = mem::take(&mut self.root);
        self.root = root.delete(value);

        debug!(
            "delete: height {}, root balance factor {}",
            self.root.height(),
            self.root.balance_factor()
        );
    }

    /// Returns the values with each node before its subtrees.
    pub fn preorder(&self) -> Vec<&T> {
        self.root.preorder()
    }

    /// Returns the values in ascending order.
    pub fn inorder(&self) -> Vec<&T> {
        self.root.inorder()
    }

    /// Returns the values with each node after its subtrees.
    pub fn postorder(&self) -> Vec<&T> {
        self.root.postorder()
    }

    /// See [`OrderedTree::bfs_order_star`].
    pub fn bfs_order_star(&self) -> Vec<Option<&T>> {
        self.root.bfs_order_star()
    }

    /// Checks ordering and root balance.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        invariants::validate(&self.root)
    }

    /// Checks ordering and the balance of every node.
    pub fn validate_strict(&self) -> Result<(), InvariantViolation> {
        invariants::validate_strict(&self.root)
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        if let Err(violation) = self.validate() {
            panic!("tree invariant violated: {violation}");
        }
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        AvlTree::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AvlTree").field(&self.root).finish()
    }
}

impl<T: Ord> From<Node<T>> for AvlTree<T> {
    /// Wraps an existing root. The tree is used as-is; nothing is rebalanced.
    fn from(root: Node<T>) -> Self {
        AvlTree { root }
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut root = mem::take(&mut self.root);

        for value in iter {
            root = root.insert(value);
        }

        self.root = root;
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}
