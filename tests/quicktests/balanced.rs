use avl_bst::{AvlTree, Bst, Mode, NodeRef};

use std::collections::BTreeSet;

use crate::plain::do_ops;
use crate::Op;

/// Checks every node's stored height and balance factor through the public
/// node handles. Returns the subtree's height.
fn checked_height<K, M: Mode>(node: Option<NodeRef<'_, K, M>>) -> Option<usize> {
    let Some(node) = node else {
        return Some(0);
    };
    let left = checked_height(node.left())?;
    let right = checked_height(node.right())?;

    let consistent = node.height() == 1 + left.max(right)
        && node.balance_factor() == left as isize - right as isize
        && node.balance_factor().abs() <= 1;
    consistent.then_some(node.height())
}

fn height_bound(size: usize) -> f64 {
    1.45 * ((size + 2) as f64).log2()
}

#[quickcheck_macros::quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = AvlTree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.size() == set.len()
        && tree.iter().eq(set.iter())
        && checked_height(tree.root()) == Some(tree.height())
}

#[quickcheck_macros::quickcheck]
fn stays_balanced_under_inserts(xs: Vec<i32>) -> bool {
    let tree: AvlTree<_> = xs.into_iter().collect();

    tree.is_balanced() && checked_height(tree.root()).is_some()
}

#[quickcheck_macros::quickcheck]
fn height_is_logarithmic(ops: Vec<Op<i16>>) -> bool {
    let mut tree = AvlTree::new();
    do_ops(&ops, &mut tree, &mut BTreeSet::new());

    tree.height() as f64 <= height_bound(tree.size())
}

#[quickcheck_macros::quickcheck]
fn sorted_input_stays_shallow(n: u16) -> bool {
    let n = usize::from(n % 2048);
    let tree: AvlTree<_> = (0..n).collect();

    tree.height() as f64 <= height_bound(n)
}

#[quickcheck_macros::quickcheck]
fn conversion_keeps_keys(xs: Vec<i16>) -> bool {
    let plain: Bst<_> = xs.into_iter().collect();
    let balanced = plain.convert_to_balanced();

    balanced.in_order() == plain.in_order()
        && balanced.is_balanced()
        && checked_height(balanced.root()) == Some(balanced.height())
}

#[quickcheck_macros::quickcheck]
fn build_ignores_input_order(xs: Vec<i16>) -> bool {
    let mut reversed = xs.clone();
    reversed.reverse();

    let a = AvlTree::build_balanced(xs);
    let b = AvlTree::build_balanced(reversed);
    a.pre_order() == b.pre_order() && a.height() as f64 <= height_bound(a.size())
}

#[quickcheck_macros::quickcheck]
fn parents_point_back(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
    let mut tree: AvlTree<_> = xs.into_iter().collect();
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut stack: Vec<_> = tree.root().into_iter().collect();
    let root_ok = tree.root().map_or(true, |root| root.parent().is_none());
    let mut links_ok = true;
    while let Some(node) = stack.pop() {
        for child in [node.left(), node.right()].into_iter().flatten() {
            links_ok &= child.parent() == Some(node);
            stack.push(child);
        }
    }
    root_ok && links_ok
}

#[quickcheck_macros::quickcheck]
fn insert_then_delete_restores_keys(xs: Vec<i16>, key: i16) -> bool {
    let mut tree: AvlTree<_> = xs.into_iter().filter(|x| *x != key).collect();
    let before: Vec<i16> = tree.iter().copied().collect();

    let inserted = tree.insert(key);
    let deleted = tree.delete(&key);

    inserted
        && deleted
        && tree.iter().copied().eq(before)
        && checked_height(tree.root()).is_some()
}
