use avl_bst::{Bst, Mode, Tree};

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
pub fn do_ops<K, M>(ops: &[Op<K>], tree: &mut Tree<K, M>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone,
    M: Mode,
{
    for op in ops {
        match op {
            Op::Insert(k) => assert_eq!(tree.insert(k.clone()), set.insert(k.clone())),
            Op::Remove(k) => assert_eq!(tree.delete(k), set.remove(k)),
        }
    }
}

#[quickcheck_macros::quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Bst::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.size() == set.len() && tree.iter().eq(set.iter())
}

#[quickcheck_macros::quickcheck]
fn in_order_is_sorted(xs: Vec<i16>) -> bool {
    let tree: Bst<_> = xs.into_iter().collect();

    tree.in_order().windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck_macros::quickcheck]
fn size_matches_traversals(xs: Vec<i16>) -> bool {
    let tree: Bst<_> = xs.into_iter().collect();

    tree.size() == tree.in_order().len()
        && tree.size() == tree.pre_order().len()
        && tree.size() == tree.post_order().len()
}

#[quickcheck_macros::quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Bst<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

#[quickcheck_macros::quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Bst<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.delete(delete);
    }

    deletes.iter().all(|x| !tree.contains(x))
        && xs
            .iter()
            .filter(|x| !deletes.contains(*x))
            .all(|x| tree.contains(x))
}

#[quickcheck_macros::quickcheck]
fn insert_then_delete_restores_keys(xs: Vec<i16>, key: i16) -> bool {
    let mut tree: Bst<_> = xs.into_iter().filter(|x| *x != key).collect();
    let before: Vec<i16> = tree.iter().copied().collect();

    tree.insert(key);
    tree.delete(&key);

    tree.iter().copied().eq(before)
}

#[quickcheck_macros::quickcheck]
fn min_and_max_bound_the_keys(xs: Vec<i16>) -> bool {
    let tree: Bst<_> = xs.iter().copied().collect();

    match (xs.iter().min(), xs.iter().max()) {
        (Some(min), Some(max)) => {
            tree.find_min().ok() == Some(min) && tree.find_max().ok() == Some(max)
        }
        _ => tree.find_min().is_err() && tree.find_max().is_err(),
    }
}
