//! Model checking against `BTreeSet`, shared by the property tests and the fuzz targets.

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::AvlTree;

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Contains(ItemValue),
    Delete(ItemValue),
    Clear,
}

impl Op {
    fn finalize(self, sorted: &[u32]) -> FinalOp {
        fn get_value(v: &[u32], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len()]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Contains(item) => FinalOp::Contains(get_value(sorted, item)),
            Op::Delete(item) => FinalOp::Delete(get_value(sorted, item)),
            Op::Clear => FinalOp::Clear,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Contains(u32),
    Delete(u32),
    Clear,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        4 => value_strategy().prop_map(Op::Insert),
        2 => value_strategy().prop_map(Op::Contains),
        3 => value_strategy().prop_map(Op::Delete),
        1 => Just(Op::Clear),
    ]
}

/// Applies `ops` to both an [`AvlTree`] and a `BTreeSet`, checking after every step that they
/// hold the same values and that the tree is still ordered.
///
/// Whenever every node was balanced before a step, the step is also checked for balance: an
/// insert must keep every node balanced and a delete must leave the root balanced.
pub fn run_btree_equivalence(ops: Vec<Op>) {
    let mut sorted_values = Vec::with_capacity(ops.len());
    let mut btree = BTreeSet::new();
    let mut avl: AvlTree<u32> = AvlTree::new();

    fn insert_sorted(v: &mut Vec<u32>, value: u32) {
        if let Err(idx) = v.binary_search(&value) {
            v.insert(idx, value);
        }
    }

    fn remove_sorted(v: &mut Vec<u32>, value: u32) {
        if let Ok(idx) = v.binary_search(&value) {
            v.remove(idx);
        }
    }

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_values);
        let balanced = avl.validate_strict().is_ok();

        match final_op {
            FinalOp::Insert(value) => {
                insert_sorted(&mut sorted_values, value);

                btree.insert(value);
                avl.insert(value);
            }

            FinalOp::Contains(value) => {
                let from_btree = btree.contains(&value);
                let from_avl = avl.contains(&value);

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Delete(value) => {
                remove_sorted(&mut sorted_values, value);

                btree.remove(&value);
                avl.delete(&value);

                assert!(!avl.contains(&value), "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Clear => {
                sorted_values.clear();
                btree.clear();
                avl.clear();
            }
        }

        let checked = match final_op {
            FinalOp::Insert(_) if balanced => avl.validate_strict(),
            FinalOp::Delete(_) if balanced => avl.validate(),
            _ => crate::invariants::validate_order(avl.root()),
        };

        if let Err(violation) = checked {
            panic!("FinalOp #{op_id}: {final_op:?}: {violation}");
        }

        assert_eq!(btree.len(), avl.len(), "FinalOp #{op_id}: {final_op:?}");
        assert!(btree.iter().eq(avl.inorder()), "FinalOp #{op_id}: {final_op:?}");
    }
}

/// Inserts `values`, checking after every insert that every node is balanced, then deletes each
/// value once from a fresh copy of the full tree and checks the root.
pub fn run_balance_check(values: Vec<u32>) {
    let mut avl: AvlTree<u32> = AvlTree::new();

    for &value in &values {
        avl.insert(value);

        if let Err(violation) = avl.validate_strict() {
            panic!("after inserting {value}: {violation}");
        }
    }

    let expected: BTreeSet<u32> = values.iter().copied().collect();
    assert!(expected.iter().eq(avl.inorder()));

    for value in &expected {
        let mut copy = avl.clone();
        copy.delete(value);

        if let Err(violation) = copy.validate() {
            panic!("after deleting {value}: {violation}");
        }

        assert_eq!(copy.len(), expected.len() - 1);
        assert!(!copy.contains(value));
    }
}
