//! Binary search tree operations over any [`TreeNode`].

use core::{cmp::Ordering, mem};
use std::collections::VecDeque;

use log::trace;

use crate::node::{Dir, TreeNode};

/// A strategy for restoring a subtree's shape after a structural edit.
///
/// [`OrderedTree::insert_with`] applies the strategy at every node on the insertion path, while
/// [`OrderedTree::delete_with`] applies it once, at the node the deletion was invoked on.
pub trait Rebalance<N> {
    /// Rebalances `node`, returning the new subtree root.
    fn rebalance(node: N) -> N;
}

/// Leaves the tree exactly as the edit left it, giving a plain binary search tree.
#[derive(Debug)]
pub enum Unbalanced {}

impl<N> Rebalance<N> for Unbalanced {
    #[inline]
    fn rebalance(node: N) -> N {
        node
    }
}

/// Ordered-tree queries and edits, available on every [`TreeNode`].
///
/// The edits take the tree by value and return the root of the edited subtree, which may be a
/// different node than the one the call was made on. The returned root must always be used in
/// place of the original.
pub trait OrderedTree: TreeNode {
    /// Returns `true` if `value` is stored anywhere in the tree.
    ///
    /// Every node is visited; the search does not follow the ordering of the tree.
    fn is_member(&self, value: &Self::Value) -> bool {
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            let Some(current) = node.value() else {
                continue;
            };

            if current == value {
                return true;
            }

            stack.extend(node.right());
            stack.extend(node.left());
        }

        false
    }

    /// Returns the number of values in the tree.
    fn size(&self) -> usize {
        let mut stack = vec![self];
        let mut size = 0;

        while let Some(node) = stack.pop() {
            if node.is_empty() {
                continue;
            }

            size += 1;
            stack.extend(node.left());
            stack.extend(node.right());
        }

        size
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// An empty tree has height 0 and a single leaf has height 1.
    fn height(&self) -> usize {
        let mut stack = vec![(self, 1)];
        let mut height = 0;

        while let Some((node, depth)) = stack.pop() {
            if node.is_empty() {
                continue;
            }

            height = height.max(depth);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }

        height
    }

    fn preorder(&self) -> Vec<&Self::Value> {
        let mut out = Vec::new();
        walk(self, Traversal::Pre, &mut out);
        out
    }

    fn inorder(&self) -> Vec<&Self::Value> {
        let mut out = Vec::new();
        walk(self, Traversal::In, &mut out);
        out
    }

    fn postorder(&self) -> Vec<&Self::Value> {
        let mut out = Vec::new();
        walk(self, Traversal::Post, &mut out);
        out
    }

    /// Returns the tree in breadth-first order, padded out to a complete tree of the same height.
    ///
    /// Positions without a node are reported as `None`. The result always has `2^height - 1`
    /// entries; for example the tree
    ///
    /// ```text
    ///         10
    ///     5        15
    ///   *   *    *    20
    /// ```
    ///
    /// yields `[10, 5, 15, *, *, *, 20]`.
    ///
    /// # Panics
    ///
    /// Panics if `2^height - 1` does not fit in a `usize`.
    fn bfs_order_star(&self) -> Vec<Option<&Self::Value>> {
        if self.is_empty() {
            return Vec::new();
        }

        let height = self.height();
        let positions = u32::try_from(height)
            .ok()
            .and_then(|h| 1_usize.checked_shl(h))
            .map(|n| n - 1)
            .unwrap_or_else(|| panic!("a tree of height {height} has too many positions"));

        let mut out = Vec::new();
        let mut queue: VecDeque<Option<&Self>> = VecDeque::new();
        queue.push_back(Some(self));

        while out.len() < positions {
            let Some(slot) = queue.pop_front() else {
                break;
            };

            let node = slot.filter(|node| !node.is_empty());
            out.push(node.and_then(Self::value));

            match node {
                Some(node) => {
                    queue.push_back(node.left());
                    queue.push_back(node.right());
                }
                None => {
                    queue.push_back(None);
                    queue.push_back(None);
                }
            }
        }

        out
    }

    /// Inserts `value`, applying `R` to every node on the way back up.
    ///
    /// Inserting a value that is already present leaves the set of values unchanged, but `R` is
    /// still applied along the search path, so a node left out of balance by an earlier delete
    /// may be rotated.
    #[must_use = "the returned node is the new subtree root"]
    fn insert_with<R: Rebalance<Self>>(self, value: Self::Value) -> Self {
        // Parents detached on the way down, each with the side the descent took.
        let mut path = Vec::new();
        let mut node = self;

        let mut subtree = loop {
            let dir = match node.value() {
                None => {
                    node.set_value(Some(value));
                    break node;
                }
                Some(current) => match value.cmp(current) {
                    Ordering::Less => Dir::Left,
                    Ordering::Greater => Dir::Right,
                    Ordering::Equal => break R::rebalance(node),
                },
            };

            let child = node.take_child(dir);
            path.push((node, dir));
            node = child;
        };

        while let Some((mut parent, dir)) = path.pop() {
            parent.set_child(dir, subtree);
            subtree = R::rebalance(parent);
        }

        subtree
    }

    /// Deletes `value`, then applies `R` to the node the call was made on.
    ///
    /// Nodes below the returned root are not rebalanced. Deleting a value that is not present
    /// leaves the tree unchanged.
    #[must_use = "the returned node is the new subtree root"]
    fn delete_with<R: Rebalance<Self>>(mut self, value: &Self::Value) -> Self {
        if self.is_empty() || !self.is_member(value) {
            return self;
        }

        remove_value(&mut self, value);
        R::rebalance(self)
    }

    /// Removes this node's value by promoting an in-order neighbour into its place.
    ///
    /// The neighbour is taken from the taller subtree, preferring the predecessor when both are
    /// the same height. Returns `None` if the node has no children, in which case the caller
    /// should empty the node.
    fn detach(&mut self) -> Option<Self::Value> {
        let left_height = self.left().map_or(0, Self::height);
        let right_height = self.right().map_or(0, Self::height);

        let dir = match (left_height, right_height) {
            (0, 0) => return None,
            (0, _) => Dir::Right,
            (_, 0) => Dir::Left,
            (left, right) if left < right => Dir::Right,
            _ => Dir::Left,
        };

        trace!("detach: promoting from {dir:?} subtree ({left_height} vs {right_height})");

        let child = self.child_mut(dir)?;
        match dir {
            Dir::Left => child.take_rightmost(),
            Dir::Right => child.take_leftmost(),
        }
    }

    /// Removes and returns the least value in the tree.
    fn take_leftmost(&mut self) -> Option<Self::Value> {
        take_extreme(self, Dir::Left)
    }

    /// Removes and returns the greatest value in the tree.
    fn take_rightmost(&mut self) -> Option<Self::Value> {
        take_extreme(self, Dir::Right)
    }
}

impl<N: TreeNode> OrderedTree for N {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Traversal {
    Pre,
    In,
    Post,
}

enum Visit<'a, N: TreeNode> {
    Node(&'a N),
    Value(&'a N::Value),
}

fn walk<'a, N: TreeNode>(root: &'a N, order: Traversal, out: &mut Vec<&'a N::Value>) {
    let mut stack = vec![Visit::Node(root)];

    while let Some(visit) = stack.pop() {
        let node = match visit {
            Visit::Value(value) => {
                out.push(value);
                continue;
            }
            Visit::Node(node) => node,
        };

        let Some(value) = node.value() else {
            continue;
        };

        // Pushed in reverse of the order they are emitted.
        let left = node.left().map(Visit::Node);
        let right = node.right().map(Visit::Node);
        let value = Some(Visit::Value(value));

        let pending = match order {
            Traversal::Pre => [right, left, value],
            Traversal::In => [right, value, left],
            Traversal::Post => [value, right, left],
        };

        stack.extend(pending.into_iter().flatten());
    }
}

// Descends to the node holding `value` and detaches it. The caller has already checked that
// `value` is a member.
fn remove_value<N: TreeNode>(mut node: &mut N, value: &N::Value) {
    loop {
        let dir = match node.value().map(|current| value.cmp(current)) {
            None => return,
            Some(Ordering::Less) => Dir::Left,
            Some(Ordering::Greater) => Dir::Right,
            Some(Ordering::Equal) => {
                let promoted = node.detach();
                node.set_value(promoted);
                return;
            }
        };

        match node.child_mut(dir) {
            Some(child) => node = child,
            None => return,
        }
    }
}

// Removes the furthest node in direction `dir`, splicing its other child into its place.
fn take_extreme<N: TreeNode>(mut node: &mut N, dir: Dir) -> Option<N::Value> {
    if node.is_empty() {
        return None;
    }

    while node.child(dir).is_some_and(|child| !child.is_empty()) {
        node = node.child_mut(dir)?;
    }

    let rest = node.take_child(!dir);
    mem::replace(node, rest).into_value()
}
