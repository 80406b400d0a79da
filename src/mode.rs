//! Tree modes. A [`Tree`][crate::Tree] picks its mode once, as a type parameter,
//! so whether structural changes trigger rebalancing can never change during the
//! tree's lifetime. Moving from [`Plain`] to [`Balanced`] means building a new tree
//! with [`convert_to_balanced`][crate::Tree::convert_to_balanced].

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Plain {}
    impl Sealed for super::Balanced {}
}

/// Behaviour shared by the two marker types. This trait is sealed.
pub trait Mode: sealed::Sealed {
    /// Whether insertions and deletions restore the AVL invariant.
    const BALANCED: bool;

    /// Short human readable name, e.g. for the shell's messages.
    const NAME: &'static str;
}

/// A classic binary search tree. Nothing is rotated, so the height depends on the
/// insertion order and can reach the number of keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Plain;

/// An AVL tree. After every insertion and deletion, every node's left and right
/// subtree heights differ by at most one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Balanced;

impl Mode for Plain {
    const BALANCED: bool = false;
    const NAME: &'static str = "bst";
}

impl Mode for Balanced {
    const BALANCED: bool = true;
    const NAME: &'static str = "avl";
}
