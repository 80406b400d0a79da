//! Height bookkeeping and the AVL fixups.
//!
//! See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.

use log::trace;

use super::{NodeId, Tree};

impl<K, M> Tree<K, M> {
    pub(super) fn height_of(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self.node(id).height)
    }

    /// Adjusts the height of `id` to be the max of its children's heights + 1.
    pub(super) fn update_height(&mut self, id: NodeId) {
        let node = self.node(id);
        let height = self.height_of(node.left).max(self.height_of(node.right)) + 1;
        self.node_mut(id).height = height;
    }

    /// The difference in height between the left and right subtrees. Positive
    /// means left heavy.
    pub(super) fn balance_factor(&self, id: NodeId) -> isize {
        let node = self.node(id);
        self.height_of(node.left) as isize - self.height_of(node.right) as isize
    }

    /// Rotate `x` to the left. This moves the right child up and `x` down. Returns
    /// the new root of the subtree; whatever pointed at `x` (its parent or the tree's
    /// root) now points at that node.
    ///
    /// ## Panics
    ///
    /// When `x` has no right child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///  Option<parent>               Option<parent>
    ///      /                            /
    ///     x                            y
    ///    / \                          / \
    ///   a   y       rotate ->        x   c
    ///      / \                      / \
    ///     b   c                    a   b
    /// ```
    #[must_use = "the returned node is the new root of the rotated subtree"]
    pub(super) fn rotate_left(&mut self, x: NodeId) -> NodeId {
        trace!("rotating left at slot {}", x.0);
        let y = self
            .node(x)
            .right
            .expect("Rotating left requires a right child");
        let inner = self.node(y).left;
        let parent = self.node(x).parent;

        self.node_mut(x).right = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(x);
        }
        self.replace_child(parent, x, Some(y));
        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);

        // `x` is now below `y`, so it goes first.
        self.update_height(x);
        self.update_height(y);
        y
    }

    /// The mirror image of [`Tree::rotate_left`]: the left child of `x` moves up.
    ///
    /// ## Panics
    ///
    /// When `x` has no left child.
    #[must_use = "the returned node is the new root of the rotated subtree"]
    pub(super) fn rotate_right(&mut self, x: NodeId) -> NodeId {
        trace!("rotating right at slot {}", x.0);
        let y = self
            .node(x)
            .left
            .expect("Rotating right requires a left child");
        let inner = self.node(y).right;
        let parent = self.node(x).parent;

        self.node_mut(x).left = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(x);
        }
        self.replace_child(parent, x, Some(y));
        self.node_mut(y).right = Some(x);
        self.node_mut(x).parent = Some(y);

        self.update_height(x);
        self.update_height(y);
        y
    }

    /// Fixes the height of `id` and, if its subtrees differ in height by two,
    /// rotates it back into balance. Both subtrees must already be AVL trees.
    /// Returns the root of the subtree that `id` used to be the root of.
    #[must_use = "a rotation may have replaced the subtree root"]
    pub(super) fn rebalance(&mut self, id: NodeId) -> NodeId {
        self.update_height(id);
        let balance = self.balance_factor(id);

        let root = if balance > 1 {
            let left = self.node(id).left.expect("Left heavy => left child");
            if self.balance_factor(left) < 0 {
                trace!("left-right case at slot {}", id.0);
                let left = self.rotate_left(left);
                debug_assert_eq!(self.node(id).left, Some(left));
            }
            self.rotate_right(id)
        } else if balance < -1 {
            let right = self.node(id).right.expect("Right heavy => right child");
            if self.balance_factor(right) > 0 {
                trace!("right-left case at slot {}", id.0);
                let right = self.rotate_right(right);
                debug_assert_eq!(self.node(id).right, Some(right));
            }
            self.rotate_left(id)
        } else {
            id
        };

        if cfg!(debug_assertions) {
            let node = self.node(root);
            assert_eq!(
                node.height,
                self.height_of(node.left).max(self.height_of(node.right)) + 1
            );
            assert!(self.balance_factor(root).abs() <= 1);
        }
        root
    }

    /// Rebalances every node from `start` up to the root.
    pub(super) fn rebalance_from(&mut self, start: NodeId) {
        let mut current = Some(start);
        while let Some(id) = current {
            // A rotation moves `id` down, so continue from whatever took its place.
            let subtree_root = self.rebalance(id);
            current = self.node(subtree_root).parent;
        }
    }

    /// Recomputes heights from `start` upwards, stopping at the first node whose
    /// height didn't change.
    pub(super) fn fix_heights_from(&mut self, start: NodeId) {
        let mut current = Some(start);
        while let Some(id) = current {
            let before = self.node(id).height;
            self.update_height(id);
            let node = self.node(id);
            if node.height == before {
                break;
            }
            current = node.parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::Bst;

    #[test]
    fn rotating_left_then_right_restores_shape() {
        let mut tree: Bst<_> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
        let pre_order: Vec<i32> = tree.pre_order().into_iter().copied().collect();
        let root = tree.root.unwrap();

        let new_root = tree.rotate_left(root);
        assert_eq!(tree.root, Some(new_root));
        assert_eq!(tree.root().map(|n| *n.key()), Some(6));
        assert_eq!(tree.pre_order(), vec![&6, &4, &2, &1, &3, &5, &7]);
        tree.assert_invariants();

        let back = tree.rotate_right(new_root);
        assert_eq!(back, root);
        assert_eq!(tree.root, Some(root));
        assert_eq!(
            tree.pre_order().into_iter().copied().collect::<Vec<_>>(),
            pre_order
        );
        assert_eq!(tree.in_order(), vec![&1, &2, &3, &4, &5, &6, &7]);
        tree.assert_invariants();
    }

    #[test]
    fn rotating_inside_the_tree_reattaches_to_parent() {
        let mut tree: Bst<_> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
        let two = tree.find_id(&2).unwrap();

        let new_root = tree.rotate_right(two);
        let four = tree.root().unwrap();
        assert_eq!(four.left().map(|n| *n.key()), Some(1));
        assert_eq!(tree.node(new_root).parent, tree.root);
        assert_eq!(tree.pre_order(), vec![&4, &1, &2, &3, &6, &5, &7]);

        // Rotations only fix the two nodes they move; ancestors are the caller's job.
        let top = tree.root.unwrap();
        tree.update_height(top);
        assert_eq!(tree.height(), 4);
        tree.assert_invariants();

        let restored = tree.rotate_left(new_root);
        assert_eq!(restored, two);
        assert_eq!(tree.pre_order(), vec![&4, &2, &1, &3, &6, &5, &7]);
        tree.update_height(top);
        assert_eq!(tree.height(), 3);
        tree.assert_invariants();
    }

    #[test]
    fn rebalance_handles_all_four_cases() {
        // (insertion order, expected root after fixing the top node)
        let cases = [
            ([3, 2, 1], 2), // left-left
            ([3, 1, 2], 2), // left-right
            ([1, 2, 3], 2), // right-right
            ([1, 3, 2], 2), // right-left
        ];
        for (keys, expected_root) in cases {
            let mut tree: Bst<i32> = keys.into_iter().collect();
            assert!(!tree.is_balanced());

            let top = tree.root.unwrap();
            let new_root = tree.rebalance(top);

            assert_eq!(tree.root, Some(new_root));
            assert_eq!(tree.node(new_root).key, expected_root);
            assert_eq!(tree.height(), 2);
            assert!(tree.is_balanced());
            tree.assert_invariants();
        }
    }

    #[test]
    fn plain_heights_shrink_after_removal() {
        let mut tree: Bst<_> = [1, 2, 3, 4].into_iter().collect();
        assert_eq!(tree.height(), 4);

        tree.delete(&4);
        assert_eq!(tree.height(), 3);
        tree.delete(&2);
        assert_eq!(tree.height(), 2);
        tree.assert_invariants();
    }
}
