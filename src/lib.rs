//! This crate implements a Binary Search Tree (BST) that can run either as a plain
//! BST or as a self-balancing AVL tree.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of key (the key that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the right
//! subtree.
//!
//! ## AVL trees
//!
//! Inserting already sorted keys into a plain BST produces a tree shaped like a
//! linked list, with a height equal to the number of keys. An AVL tree stores each
//! subtree's height in its root and, after every insertion or deletion, rotates
//! nodes until no node's subtrees differ in height by more than one. That keeps the
//! height at roughly `1.44 * lg N`.
//!
//! The mode is part of the tree's type: [`Bst`] never rotates and [`AvlTree`]
//! always does. [`Tree::convert_to_balanced`] builds an [`AvlTree`] out of any tree,
//! and [`AvlTree::build_balanced`] builds one directly from unsorted keys.
//!
//! ```
//! use avl_bst::{AvlTree, Bst};
//!
//! let mut plain = Bst::new();
//! for key in [5, 3, 8, 1, 4] {
//!     plain.insert(key);
//! }
//! assert_eq!(plain.in_order(), vec![&1, &3, &4, &5, &8]);
//! assert_eq!(plain.find_min().unwrap(), &1);
//! assert_eq!(plain.find_max().unwrap(), &8);
//!
//! let balanced = AvlTree::build_balanced([5, 3, 8, 1, 4]);
//! assert_eq!(balanced.pre_order(), vec![&4, &1, &3, &5, &8]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
pub mod keys;
mod mode;
pub mod tikz;
mod tree;

pub use error::{Error, Result};
pub use mode::{Balanced, Mode, Plain};
pub use tree::{AvlTree, Bst, Iter, NodeRef, Tree};
