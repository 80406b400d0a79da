//! An arena backed binary search tree that runs either as a plain BST or as an
//! AVL tree, depending on its [`Mode`].
//!
//! Nodes are stored in a `Vec` and refer to each other by index. Every node knows
//! its parent, which is what lets deletion and rotation walk back up the tree
//! without recursion. Parent links are plain indices, so they never own anything.
//!
//! # Examples
//!
//! ```
//! use avl_bst::{AvlTree, Bst};
//!
//! let mut tree = AvlTree::new();
//! for key in 1..=7 {
//!     tree.insert(key);
//! }
//!
//! // Ascending inserts don't degrade an AVL tree.
//! assert_eq!(tree.height(), 3);
//! assert!(tree.contains(&4));
//!
//! // Deleting returns whether the key was there.
//! assert!(tree.delete(&4));
//! assert!(!tree.delete(&4));
//! assert_eq!(tree.in_order(), vec![&1, &2, &3, &5, &6, &7]);
//!
//! // A plain BST fed the same keys turns into a list...
//! let plain: Bst<i32> = (1..=7).collect();
//! assert_eq!(plain.height(), 7);
//!
//! // ...until it is converted.
//! let converted = plain.convert_to_balanced();
//! assert_eq!(converted.height(), 3);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use log::trace;

use crate::error::{Error, Result};
use crate::mode::{Balanced, Mode, Plain};

mod balance;
mod build;
mod delete;

/// A binary search tree that never rebalances.
pub type Bst<K> = Tree<K, Plain>;

/// A binary search tree that keeps itself balanced with AVL rotations.
pub type AvlTree<K> = Tree<K, Balanced>;

/// Index of a slot in [`Tree::slots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeId(usize);

#[derive(Clone)]
struct Node<K> {
    key: K,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

/// An ordered set of keys stored as a binary search tree.
///
/// The mode `M` decides whether the tree rebalances itself; see [`Bst`] and
/// [`AvlTree`]. Keys are unique: inserting a key that is already present leaves
/// the tree untouched.
pub struct Tree<K, M = Balanced> {
    // `None` slots are free and listed in `free`.
    slots: Vec<Option<Node<K>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
    mode: PhantomData<M>,
}

impl<K, M> Default for Tree<K, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, M> Clone for Tree<K, M>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            free: self.free.clone(),
            root: self.root,
            len: self.len,
            mode: PhantomData,
        }
    }
}

impl<K, M> fmt::Debug for Tree<K, M>
where
    K: fmt::Debug,
    M: Mode,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One flat entry per node in pre-order, so tall trees don't recurse.
        let nodes: Vec<NodeRef<'_, K, M>> = self
            .pre_order_ids()
            .into_iter()
            .map(|id| NodeRef { tree: self, id })
            .collect();
        f.debug_struct("Tree")
            .field("mode", &M::NAME)
            .field("nodes", &nodes)
            .finish()
    }
}

impl<K, M> Tree<K, M> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            mode: PhantomData,
        }
    }

    /// The number of keys in the tree.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels in the tree. An empty tree has height 0 and a single
    /// node has height 1.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// Whether every node's subtrees differ in height by at most one. Always true
    /// for an [`AvlTree`]; a [`Bst`] may or may not satisfy it.
    pub fn is_balanced(&self) -> bool {
        self.slots
            .iter()
            .flatten()
            .all(|node| self.height_of(node.left).abs_diff(self.height_of(node.right)) <= 1)
    }

    /// A read-only handle on the root, for walking the tree's shape.
    pub fn root(&self) -> Option<NodeRef<'_, K, M>> {
        self.root.map(|id| NodeRef { tree: self, id })
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if there are no keys.
    pub fn find_min(&self) -> Result<&K> {
        let root = self.root.ok_or(Error::EmptyTree)?;
        Ok(&self.node(self.leftmost(root)).key)
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if there are no keys.
    pub fn find_max(&self) -> Result<&K> {
        let mut current = self.root.ok_or(Error::EmptyTree)?;
        while let Some(right) = self.node(current).right {
            current = right;
        }
        Ok(&self.node(current).key)
    }

    /// Removes every key. The tree can be reused afterwards.
    pub fn clear(&mut self) {
        trace!("tearing down {} nodes", self.len);
        self.slots.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K, M> {
        Iter::new(self)
    }

    /// Keys in pre-order: each node before its left subtree, then its right subtree.
    pub fn pre_order(&self) -> Vec<&K> {
        self.pre_order_ids()
            .into_iter()
            .map(|id| &self.node(id).key)
            .collect()
    }

    /// Keys in in-order, which for a search tree is ascending order.
    pub fn in_order(&self) -> Vec<&K> {
        self.iter().collect()
    }

    /// Keys in post-order: both subtrees of a node before the node itself.
    pub fn post_order(&self) -> Vec<&K> {
        // Collect node, right, left and flip it at the end.
        let mut keys = Vec::with_capacity(self.len);
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            keys.push(&node.key);
            stack.extend(node.left);
            stack.extend(node.right);
        }
        keys.reverse();
        keys
    }

    fn pre_order_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.len);
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            ids.push(id);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        ids
    }

    fn node(&self, id: NodeId) -> &Node<K> {
        self.slots[id.0]
            .as_ref()
            .expect("Node ids only refer to occupied slots")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        self.slots[id.0]
            .as_mut()
            .expect("Node ids only refer to occupied slots")
    }

    /// Stores a new, childless node and returns its id.
    fn alloc(&mut self, key: K, parent: Option<NodeId>) -> NodeId {
        let node = Node {
            key,
            left: None,
            right: None,
            parent,
            height: 1,
        };
        self.len += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Frees the slot of a node that nothing links to anymore and hands back its key.
    fn release(&mut self, id: NodeId) -> K {
        let node = self.slots[id.0]
            .take()
            .expect("Released nodes are occupied");
        self.free.push(id);
        self.len -= 1;
        node.key
    }

    /// Points whatever referred to `old` (its parent's child link, or the root) at
    /// `new`, and makes `parent` the parent of `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            Some(parent) => {
                let parent = self.node_mut(parent);
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    debug_assert_eq!(parent.right, Some(old));
                    parent.right = new;
                }
            }
            None => self.root = new,
        }
        if let Some(new) = new {
            self.node_mut(new).parent = parent;
        }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }
}

impl<K, M> Tree<K, M>
where
    M: Mode,
{
    /// Restores heights (and, for AVL trees, balance) from `id` up to the root
    /// after a node below `id` was attached or removed.
    fn repair_from(&mut self, id: NodeId) {
        if M::BALANCED {
            self.rebalance_from(id);
        } else {
            self.fix_heights_from(id);
        }
    }
}

impl<K, M> Tree<K, M>
where
    K: Ord,
    M: Mode,
{
    /// Inserts `key`. Returns `false`, leaving the tree as it was, if an equal key
    /// is already stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.size(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.alloc(key, None));
            return true;
        };

        loop {
            let node = self.node(current);
            let next = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return false,
                Ordering::Greater => node.right,
            };
            match next {
                Some(next) => current = next,
                None => break,
            }
        }

        // `current` is the attachment point and has a free slot on the side `key` goes.
        let goes_left = key < self.node(current).key;
        let leaf = self.alloc(key, Some(current));
        let parent = self.node_mut(current);
        if goes_left {
            parent.left = Some(leaf);
        } else {
            parent.right = Some(leaf);
        }
        self.repair_from(current);
        true
    }

    /// Finds the node holding `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::AvlTree;
    ///
    /// let tree: AvlTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// let node = tree.search(&1).unwrap();
    /// assert_eq!(node.key(), &1);
    /// assert_eq!(node.parent().map(|p| *p.key()), Some(2));
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K, M>> {
        self.find_id(key).map(|id| NodeRef { tree: self, id })
    }

    /// Whether `key` is stored in the tree.
    pub fn contains(&self, key: &K) -> bool {
        self.find_id(key).is_some()
    }

    fn find_id(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }
}

impl<K, M> Extend<K> for Tree<K, M>
where
    K: Ord,
    M: Mode,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K, M> FromIterator<K> for Tree<K, M>
where
    K: Ord,
    M: Mode,
{
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.extend(keys);
        tree
    }
}

impl<'a, K, M> IntoIterator for &'a Tree<K, M> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`Tree`]'s keys. Uses its own stack, so a degenerate
/// [`Bst`] can be walked no matter how tall it is.
pub struct Iter<'a, K, M> {
    tree: &'a Tree<K, M>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K, M> Iter<'a, K, M> {
    fn new(tree: &'a Tree<K, M>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
            remaining: tree.len,
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.tree.node(id).left;
        }
    }
}

impl<'a, K, M> Iterator for Iter<'a, K, M> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree: &'a Tree<K, M> = self.tree;
        let node = tree.node(id);
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, M> ExactSizeIterator for Iter<'_, K, M> {}

/// A read-only view of one node, for code that needs the tree's shape (such as
/// [`tikz`][crate::tikz]). Links can be followed but never changed.
pub struct NodeRef<'a, K, M> {
    tree: &'a Tree<K, M>,
    id: NodeId,
}

impl<K, M> Clone for NodeRef<'_, K, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, M> Copy for NodeRef<'_, K, M> {}

/// Two handles are equal when they point at the same node of the same tree.
impl<K, M> PartialEq for NodeRef<'_, K, M> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<K, M> Eq for NodeRef<'_, K, M> {}

impl<K, M> fmt::Debug for NodeRef<'_, K, M>
where
    K: fmt::Debug,
{
    /// Children are shown by key only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", self.key())
            .field("height", &self.height())
            .field("left", &self.left().map(|n| n.key()))
            .field("right", &self.right().map(|n| n.key()))
            .finish()
    }
}

impl<'a, K, M> NodeRef<'a, K, M> {
    /// The key stored in this node.
    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<Self> {
        self.node().left.map(|id| self.at(id))
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<Self> {
        self.node().right.map(|id| self.at(id))
    }

    /// The node that has this one as a child. `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| self.at(id))
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        let node = self.node();
        node.left.is_none() && node.right.is_none()
    }

    /// Levels in the subtree rooted here; 1 for a leaf.
    pub fn height(&self) -> usize {
        self.node().height
    }

    /// Height of the left subtree minus height of the right subtree.
    pub fn balance_factor(&self) -> isize {
        self.tree.balance_factor(self.id)
    }

    fn node(&self) -> &'a Node<K> {
        let tree: &'a Tree<K, M> = self.tree;
        tree.node(self.id)
    }

    fn at(&self, id: NodeId) -> Self {
        Self {
            tree: self.tree,
            id,
        }
    }
}

#[cfg(test)]
impl<K, M> Tree<K, M>
where
    K: Ord + fmt::Debug,
    M: Mode,
{
    /// Walks every reachable node and asserts the structural invariants: parent
    /// links mirror child links, keys are in search order, heights are exact,
    /// AVL trees are balanced and the node count matches `size`.
    pub(crate) fn assert_invariants(&self) {
        let mut seen = 0;
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        if let Some(root) = self.root {
            assert_eq!(self.node(root).parent, None, "root has a parent");
        }
        while let Some(id) = stack.pop() {
            seen += 1;
            let node = self.node(id);
            for child in [node.left, node.right].into_iter().flatten() {
                assert_eq!(self.node(child).parent, Some(id), "broken parent link");
                stack.push(child);
            }
            if let Some(left) = node.left {
                assert!(self.node(left).key < node.key);
            }
            if let Some(right) = node.right {
                assert!(self.node(right).key > node.key);
            }
            let expected = self.height_of(node.left).max(self.height_of(node.right)) + 1;
            assert_eq!(node.height, expected, "stale height at {:?}", node.key);
            if M::BALANCED {
                assert!(
                    self.balance_factor(id).abs() <= 1,
                    "unbalanced at {:?}",
                    node.key
                );
            }
        }
        assert_eq!(seen, self.len);
        assert_eq!(self.slots.iter().flatten().count(), self.len);
        assert!(self.in_order().windows(2).all(|w| w[0] < w[1]));
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same set of keys in both.
    fn do_ops<K, M>(ops: &[Op<K>], bst: &mut Tree<K, M>, set: &mut BTreeSet<K>)
    where
        K: Ord + Clone + fmt::Debug,
        M: Mode,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    assert_eq!(bst.insert(k.clone()), set.insert(k.clone()));
                }
                Op::Remove(k) => {
                    assert_eq!(bst.delete(k), set.remove(k));
                }
                Op::Iter => {
                    assert!(bst.iter().eq(set.iter()));
                }
            }
        }
        bst.assert_invariants();
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_avl(ops: Vec<Op<i8>>) -> bool {
            let mut tree = AvlTree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            set.iter().all(|key| tree.contains(key)) && tree.size() == set.len()
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_bst(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Bst::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            set.iter().all(|key| tree.contains(key)) && tree.size() == set.len()
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let mut tree = AvlTree::new();
            for x in &xs {
                tree.insert(*x);
            }

            xs.iter().all(|x| tree.search(x).map(|n| n.key()) == Some(x))
        }
    }
}
