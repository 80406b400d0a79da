use log::debug;

use super::{AvlTree, NodeId, Tree};
use crate::mode::{Balanced, Mode};

impl<K> Tree<K, Balanced>
where
    K: Ord,
{
    /// Builds an AVL tree from unordered keys in one pass, by sorting them and then
    /// repeatedly making the lower median of a run the root of that run's subtree.
    /// Duplicate keys are kept once.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::AvlTree;
    ///
    /// let tree = AvlTree::build_balanced([5, 3, 8, 1, 4]);
    ///
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(4));
    /// assert_eq!(tree.pre_order(), vec![&4, &1, &3, &5, &8]);
    /// assert_eq!(tree.in_order(), vec![&1, &3, &4, &5, &8]);
    /// ```
    pub fn build_balanced<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        debug!("building a balanced tree from {} keys", keys.len());

        // Slot `i` holds the `i`th smallest key; bisection only links them up.
        let mut tree = Self::new();
        tree.slots.reserve_exact(keys.len());
        for key in keys {
            tree.alloc(key, None);
        }
        let root = tree.bisect(0, tree.slots.len());
        tree.root = root;
        tree
    }

    /// Links up slots `start..end` and returns the root of the resulting subtree.
    fn bisect(&mut self, start: usize, end: usize) -> Option<NodeId> {
        if start == end {
            return None;
        }

        let median = start + (end - start - 1) / 2;
        let id = NodeId(median);
        let left = self.bisect(start, median);
        let right = self.bisect(median + 1, end);

        let node = self.node_mut(id);
        node.left = left;
        node.right = right;
        for child in [left, right].into_iter().flatten() {
            self.node_mut(child).parent = Some(id);
        }

        // Halves never differ by more than one key, so this never rotates. A
        // rotation here would write the detached subtree's root into `self.root`.
        let root = self.rebalance(id);
        debug_assert_eq!(root, id, "bisection produced an unbalanced subtree");
        Some(root)
    }
}

impl<K, M> Tree<K, M>
where
    K: Ord + Clone,
    M: Mode,
{
    /// Builds a new AVL tree holding the same keys. `self` is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::Bst;
    ///
    /// let plain: Bst<_> = (0..100).collect();
    /// assert_eq!(plain.height(), 100);
    ///
    /// let balanced = plain.convert_to_balanced();
    /// assert_eq!(balanced.height(), 7);
    /// assert!(balanced.iter().eq(plain.iter()));
    /// ```
    pub fn convert_to_balanced(&self) -> AvlTree<K> {
        debug!("converting a {} tree of {} keys", M::NAME, self.len);
        AvlTree::build_balanced(self.iter().cloned())
    }
}
