//! Structural checks for trees built by the engines.

use crate::{avl::Balanced, bst::OrderedTree};

/// A broken tree invariant, as reported by [`validate`] and friends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// The in-order sequence is not strictly increasing at `index`.
    #[error("in-order values are not strictly increasing at index {index}")]
    Unordered { index: usize },

    /// A node at `depth` (the root is at depth 0) is out of AVL balance.
    #[error("node at depth {depth} has balance factor {balance_factor}")]
    Unbalanced { depth: usize, balance_factor: isize },
}

/// Checks that the tree is a duplicate-free binary search tree.
pub fn validate_order<N: OrderedTree>(node: &N) -> Result<(), InvariantViolation> {
    let values = node.inorder();

    match values.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(index) => Err(InvariantViolation::Unordered { index: index + 1 }),
        None => Ok(()),
    }
}

/// Checks ordering and the AVL balance of the root.
///
/// A balanced delete makes this guarantee about the node it returns when every node of the
/// tree it was given was balanced.
pub fn validate<N: Balanced>(node: &N) -> Result<(), InvariantViolation> {
    validate_order(node)?;
    check_balance(node, 0)
}

/// Checks ordering and the AVL balance of every node.
///
/// Holds for trees built by balanced inserts alone. Deletes rebalance only where they were
/// invoked, so nodes further down may be left out of balance.
pub fn validate_strict<N: Balanced>(node: &N) -> Result<(), InvariantViolation> {
    validate_order(node)?;

    let mut stack = vec![(node, 0)];

    while let Some((node, depth)) = stack.pop() {
        if node.is_empty() {
            continue;
        }

        check_balance(node, depth)?;

        stack.extend(node.right().map(|right| (right, depth + 1)));
        stack.extend(node.left().map(|left| (left, depth + 1)));
    }

    Ok(())
}

fn check_balance<N: Balanced>(node: &N, depth: usize) -> Result<(), InvariantViolation> {
    let balance_factor = node.balance_factor();

    if balance_factor.abs() > 1 {
        return Err(InvariantViolation::Unbalanced {
            depth,
            balance_factor,
        });
    }

    Ok(())
}
