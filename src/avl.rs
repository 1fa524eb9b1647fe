//! AVL balancing layered over [`OrderedTree`].
//
// Rotation names follow the usual shorthand:
// - `slr`: single left rotate, the right child moves up.
// - `srr`: single right rotate, the left child moves up.
// - `dlr`: double left rotate, `srr` on the right child followed by `slr`.
// - `drr`: double right rotate, `slr` on the left child followed by `srr`.
//
// For a left-heavy node `z` with left child `x`:
//
//         z               x
//        / \             / \
//       x   d    srr    a   z
//      / \      ---->      / \
//     a   b               b   d
//
// `b` moves across from `x` to `z`, which keeps the in-order sequence `a x b z d` intact.

use log::trace;

use crate::{
    bst::{OrderedTree, Rebalance},
    node::{Dir, TreeNode},
};

/// Restores AVL balance at each node it is applied to.
#[derive(Debug)]
pub enum Avl {}

impl<N: Balanced> Rebalance<N> for Avl {
    #[inline]
    fn rebalance(node: N) -> N {
        node.balance()
    }
}

/// AVL balancing operations, available on every [`TreeNode`].
pub trait Balanced: OrderedTree {
    /// Returns the height of the left subtree minus the height of the right subtree.
    fn balance_factor(&self) -> isize {
        let height = |dir| self.child(dir).map_or(0, Self::height) as isize;
        height(Dir::Left) - height(Dir::Right)
    }

    /// Rotates around `self` if its balance factor is outside `-1..=1`.
    ///
    /// Returns the new subtree root.
    #[must_use = "the returned node is the new subtree root"]
    fn balance(self) -> Self {
        let factor = self.balance_factor();

        if self.is_empty() || factor.abs() <= 1 {
            return self;
        }

        trace!("balance: factor {factor}");

        if factor > 1 {
            if self.left().map_or(0, Self::balance_factor) >= 0 {
                self.rotate_right()
            } else {
                self.rotate_left_right()
            }
        } else if self.right().map_or(0, Self::balance_factor) > 0 {
            self.rotate_right_left()
        } else {
            self.rotate_left()
        }
    }

    /// Single left rotation (`slr`): the right child becomes the subtree root.
    #[must_use = "the returned node is the new subtree root"]
    fn rotate_left(self) -> Self {
        rotate(self, Dir::Left)
    }

    /// Single right rotation (`srr`): the left child becomes the subtree root.
    #[must_use = "the returned node is the new subtree root"]
    fn rotate_right(self) -> Self {
        rotate(self, Dir::Right)
    }

    /// Double left rotation (`dlr`).
    #[must_use = "the returned node is the new subtree root"]
    fn rotate_right_left(self) -> Self {
        rotate_twice(self, Dir::Left)
    }

    /// Double right rotation (`drr`).
    #[must_use = "the returned node is the new subtree root"]
    fn rotate_left_right(self) -> Self {
        rotate_twice(self, Dir::Right)
    }

    /// Inserts `value`, rebalancing every node on the insertion path.
    #[must_use = "the returned node is the new subtree root"]
    fn insert(self, value: Self::Value) -> Self {
        self.insert_with::<Avl>(value)
    }

    /// Deletes `value`, rebalancing only at `self`.
    #[must_use = "the returned node is the new subtree root"]
    fn delete(self, value: &Self::Value) -> Self {
        self.delete_with::<Avl>(value)
    }
}

impl<N: TreeNode> Balanced for N {}

// Rotates `down` toward `dir`, raising its `!dir` child. A node without a `!dir` child is
// returned unchanged.
fn rotate<N: TreeNode>(mut down: N, dir: Dir) -> N {
    if down.child(!dir).map_or(true, TreeNode::is_empty) {
        return down;
    }

    trace!("rotate {dir:?}");

    let mut up = down.take_child(!dir);
    let across = up.take_child(dir);
    down.set_child(!dir, across);
    up.set_child(dir, down);

    up
}

// Rotates the `!dir` child away from `dir`, then rotates `node` toward `dir`.
fn rotate_twice<N: TreeNode>(mut node: N, dir: Dir) -> N {
    if node.is_empty() {
        return node;
    }

    let child = node.take_child(!dir);
    node.set_child(!dir, rotate(child, !dir));

    rotate(node, dir)
}
