use log::trace;

use super::{NodeId, Tree};
use crate::mode::Mode;

impl<K, M> Tree<K, M>
where
    K: Ord,
    M: Mode,
{
    /// Deletes `key` from the tree. Returns `false`, without touching the tree, if
    /// the key isn't stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::AvlTree;
    ///
    /// let mut tree: AvlTree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert!(tree.delete(&5));
    /// assert!(!tree.delete(&5));
    /// assert_eq!(tree.in_order(), vec![&3, &8]);
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        let Some(target) = self.find_id(key) else {
            return false;
        };

        let node = self.node(target);
        let parent = match (node.left, node.right) {
            // With two children, the in-order successor (the leftmost node on the
            // right) gives up its key to `target` and is removed instead. It has no
            // left child so it can be spliced out directly.
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                let (successor_key, parent) = self.splice_out(successor);
                self.node_mut(target).key = successor_key;
                parent
            }
            _ => self.splice_out(target).1,
        };

        if let Some(parent) = parent {
            self.repair_from(parent);
        }
        true
    }

    /// Unlinks a node with at most one child, moving the child into its place.
    /// Returns the node's key and its former parent, which is where repairs start.
    fn splice_out(&mut self, id: NodeId) -> (K, Option<NodeId>) {
        let node = self.node(id);
        debug_assert!(node.left.is_none() || node.right.is_none());

        let child = node.left.or(node.right);
        let parent = node.parent;
        trace!("splicing out slot {}", id.0);
        self.replace_child(parent, id, child);
        (self.release(id), parent)
    }
}
